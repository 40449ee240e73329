//! Scrape source configuration

use crate::error::{GroundsError, Result};
use std::time::Duration;

/// Ground list page, restricted to Test match venues
pub const DEFAULT_GROUNDS_URL: &str =
    "https://www.howstat.com/Cricket/Statistics/Grounds/GroundList.asp?Scope=T";

/// Position of the grounds table among all tables on the page
pub const DEFAULT_TABLE_INDEX: usize = 3;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where and how to scrape the grounds table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeConfig {
    pub url: String,
    pub table_index: usize,
    pub timeout: Duration,
}

impl ScrapeConfig {
    pub fn new(url: impl Into<String>, table_index: usize, timeout: Duration) -> Result<Self> {
        let url = url.into();
        let parsed = url::Url::parse(&url)
            .map_err(|e| GroundsError::Config(format!("Invalid URL '{}': {}", url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(GroundsError::Config(format!(
                "Unsupported URL scheme '{}' in {}",
                parsed.scheme(),
                url
            )));
        }

        Ok(Self {
            url,
            table_index,
            timeout,
        })
    }

    pub fn with_table_index(mut self, table_index: usize) -> Self {
        self.table_index = table_index;
        self
    }
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_GROUNDS_URL.to_string(),
            table_index: DEFAULT_TABLE_INDEX,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}
