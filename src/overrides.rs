//! Static name correction tables for grounds and cities

use crate::error::{GroundsError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

const GROUND_NAMES_CSV: &str = include_str!("../data/replace_ground_names.csv");
const CITY_NAMES_CSV: &str = include_str!("../data/replace_city_names.csv");

/// One row of an override file
#[derive(Debug, Clone, Deserialize)]
struct OverrideRow {
    name_in_data: String,
    alternate_name: String,
}

/// Exact-match replacement of names. Names without an entry pass through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideMap {
    names: HashMap<String, String>,
}

impl OverrideMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in ground name corrections
    pub fn grounds() -> Result<Self> {
        Self::from_csv_str(GROUND_NAMES_CSV)
    }

    /// Built-in city name corrections
    pub fn cities() -> Result<Self> {
        Self::from_csv_str(CITY_NAMES_CSV)
    }

    /// Read a `name_in_data,alternate_name` CSV file
    pub fn from_csv_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_csv_str(&content)
            .map_err(|e| GroundsError::Override(format!("{}: {}", path.display(), e)))
    }

    pub fn from_csv_str(content: &str) -> Result<Self> {
        let mut reader = csv::Reader::from_reader(content.as_bytes());
        let mut map = Self::new();

        for result in reader.deserialize() {
            let row: OverrideRow = result?;
            map.insert(row.name_in_data, row.alternate_name)?;
        }

        Ok(map)
    }

    /// Add an entry; keys must be unique
    pub fn insert(&mut self, name: impl Into<String>, alternate: impl Into<String>) -> Result<()> {
        let name = name.into();
        if self.names.contains_key(&name) {
            return Err(GroundsError::Override(format!(
                "Duplicate override for '{}'",
                name
            )));
        }
        self.names.insert(name, alternate.into());
        Ok(())
    }

    /// Replacement for `name`, or `name` itself
    pub fn apply<'a>(&'a self, name: &'a str) -> &'a str {
        self.names.get(name).map(String::as_str).unwrap_or(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_tables_load() {
        let grounds = OverrideMap::grounds().unwrap();
        let cities = OverrideMap::cities().unwrap();
        assert!(!grounds.is_empty());
        assert_eq!(cities.apply("Bombay"), "Mumbai");
    }

    #[test]
    fn test_exact_match_only() {
        let mut map = OverrideMap::new();
        map.insert("Calcutta", "Kolkata").unwrap();

        assert_eq!(map.apply("Calcutta"), "Kolkata");
        assert_eq!(map.apply("North Calcutta"), "North Calcutta");
        assert_eq!(map.apply("calcutta"), "calcutta");
        assert_eq!(map.apply("Delhi"), "Delhi");
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let csv = "name_in_data,alternate_name\nA,B\nA,C\n";
        assert!(matches!(
            OverrideMap::from_csv_str(csv),
            Err(GroundsError::Override(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name_in_data,alternate_name").unwrap();
        writeln!(file, "\"Lord's, London\",Lord's").unwrap();
        let map = OverrideMap::from_csv_file(file.path()).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.apply("Lord's, London"), "Lord's");
    }
}
