use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use grounds_scraper::config::{DEFAULT_GROUNDS_URL, DEFAULT_TABLE_INDEX, DEFAULT_TIMEOUT_SECS};
use grounds_scraper::store::save_hierarchy;
use grounds_scraper::{OverrideMap, Pipeline, ScrapeConfig, Source};

#[derive(Parser)]
#[command(name = "grounds-scraper")]
#[command(about = "Build a country/city/ground tree of Test matches hosted by cricket grounds", long_about = None)]
struct Cli {
    /// Path to output JSON file
    #[arg(long, default_value = "cricket_grounds_test_matches_hosted.json")]
    output_file_path: PathBuf,

    /// Store the scraped grounds data to this CSV file
    #[arg(long)]
    save_grounds_data_file_path: Option<PathBuf>,

    /// Load previously saved grounds data from this CSV file instead of scraping
    #[arg(long, conflicts_with = "save_grounds_data_file_path")]
    load_grounds_data_file_path: Option<PathBuf>,

    /// Page listing the grounds
    #[arg(long, env = "GROUNDS_URL", default_value = DEFAULT_GROUNDS_URL)]
    url: String,

    /// Position of the grounds table among the page's tables
    #[arg(long, env = "GROUNDS_TABLE_INDEX", default_value_t = DEFAULT_TABLE_INDEX)]
    table_index: usize,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// CSV (name_in_data,alternate_name) replacing the built-in ground names table
    #[arg(long)]
    ground_overrides: Option<PathBuf>,

    /// CSV (name_in_data,alternate_name) replacing the built-in city names table
    #[arg(long)]
    city_overrides: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    log::debug!("Output file path: {}", cli.output_file_path.display());

    let pipeline = build_pipeline(&cli)?;
    let root = pipeline.run().context("Pipeline failed")?;

    save_hierarchy(&root, &cli.output_file_path)
        .with_context(|| format!("Failed to write {}", cli.output_file_path.display()))?;
    log::info!("Data saved to {}", cli.output_file_path.display());

    Ok(())
}

fn build_pipeline(cli: &Cli) -> Result<Pipeline> {
    let source = match &cli.load_grounds_data_file_path {
        Some(path) => Source::File(path.clone()),
        None => Source::Scrape(
            ScrapeConfig::new(
                cli.url.as_str(),
                cli.table_index,
                Duration::from_secs(cli.timeout_secs),
            )
            .context("Invalid scrape configuration")?,
        ),
    };

    let mut pipeline = Pipeline::new(source).context("Failed to load built-in name overrides")?;

    if let Some(path) = &cli.save_grounds_data_file_path {
        pipeline = pipeline.with_save_path(path.clone());
    }
    if let Some(path) = &cli.ground_overrides {
        let overrides = OverrideMap::from_csv_file(path)
            .with_context(|| format!("Failed to read ground overrides {}", path.display()))?;
        pipeline = pipeline.with_ground_overrides(overrides);
    }
    if let Some(path) = &cli.city_overrides {
        let overrides = OverrideMap::from_csv_file(path)
            .with_context(|| format!("Failed to read city overrides {}", path.display()))?;
        pipeline = pipeline.with_city_overrides(overrides);
    }

    Ok(pipeline)
}
