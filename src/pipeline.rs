//! End-to-end run: scrape or load, then build the hierarchy

use crate::clean::{clean, GroundRow};
use crate::config::ScrapeConfig;
use crate::error::Result;
use crate::fetch::fetch_html;
use crate::hierarchy::{build, flatten, Node};
use crate::normalize::normalize;
use crate::overrides::OverrideMap;
use crate::store::{load_grounds, save_grounds};
use crate::table::extract;
use std::path::PathBuf;

/// Where the flat grounds table comes from
#[derive(Debug, Clone)]
pub enum Source {
    /// Fetch and clean the live page
    Scrape(ScrapeConfig),
    /// Read a previously saved table
    File(PathBuf),
}

pub struct Pipeline {
    source: Source,
    save_path: Option<PathBuf>,
    ground_overrides: OverrideMap,
    city_overrides: OverrideMap,
}

impl Pipeline {
    /// Pipeline using the built-in override tables
    pub fn new(source: Source) -> Result<Self> {
        Ok(Self {
            source,
            save_path: None,
            ground_overrides: OverrideMap::grounds()?,
            city_overrides: OverrideMap::cities()?,
        })
    }

    /// Save the cleaned table here after scraping
    pub fn with_save_path(mut self, path: PathBuf) -> Self {
        self.save_path = Some(path);
        self
    }

    pub fn with_ground_overrides(mut self, overrides: OverrideMap) -> Self {
        self.ground_overrides = overrides;
        self
    }

    pub fn with_city_overrides(mut self, overrides: OverrideMap) -> Self {
        self.city_overrides = overrides;
        self
    }

    /// Produce the cleaned flat table
    pub fn grounds(&self) -> Result<Vec<GroundRow>> {
        match &self.source {
            Source::File(path) => {
                log::info!("Loading grounds data from file {}", path.display());
                load_grounds(path)
            }
            Source::Scrape(config) => {
                log::info!("Scraping grounds data from url {}", config.url);
                let html = fetch_html(config)?;
                let rows = self.clean_html(&html, config)?;

                if let Some(path) = &self.save_path {
                    save_grounds(&rows, path)?;
                    log::info!("Grounds data saved to {}", path.display());
                }
                Ok(rows)
            }
        }
    }

    /// Extract, normalize and clean an already fetched page
    pub fn clean_html(&self, html: &str, config: &ScrapeConfig) -> Result<Vec<GroundRow>> {
        let table = extract(html, config)?;
        let named = normalize(table)?;
        clean(&named, &self.ground_overrides, &self.city_overrides)
    }

    /// Run the whole pipeline and return the flattened hierarchy
    pub fn run(&self) -> Result<Node> {
        let rows = self.grounds()?;
        Ok(hierarchy_from_rows(&rows))
    }
}

/// Build and flatten in one step
pub fn hierarchy_from_rows(rows: &[GroundRow]) -> Node {
    let mut root = build(rows);
    flatten(&mut root);
    log::debug!(
        "Hierarchy has {} countries and {} Tests in total",
        root.children().len(),
        root.total_count()
    );
    root
}
