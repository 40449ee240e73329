//! Saved grounds table (CSV) and hierarchy output (JSON)

use crate::clean::GroundRow;
use crate::error::{GroundsError, Result};
use crate::hierarchy::Node;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write cleaned rows with a `Country,City,Ground,Tests,ODIs,T20s` header
pub fn save_grounds(rows: &[GroundRow], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read rows written by [`save_grounds`]. The file is taken as already clean.
pub fn load_grounds(path: &Path) -> Result<Vec<GroundRow>> {
    if !path.is_file() {
        return Err(GroundsError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Grounds data file not found: {}", path.display()),
        )));
    }

    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for result in reader.deserialize() {
        rows.push(result?);
    }

    log::debug!("Loaded {} ground rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Write the hierarchy as JSON indented by four spaces
pub fn save_hierarchy(root: &Node, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);

    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    root.serialize(&mut serializer)?;

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<GroundRow> {
        vec![
            GroundRow {
                country: "England".to_string(),
                city: "London".to_string(),
                ground: "Lord's".to_string(),
                tests: 140,
                odis: 67,
                t20s: 12,
            },
            GroundRow::new("Sri Lanka", "Colombo", "Sinhalese Sports Club Ground, Colombo", 45),
        ]
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grounds.csv");

        save_grounds(&rows(), &path).unwrap();
        let loaded = load_grounds(&path).unwrap();
        assert_eq!(loaded, rows());
    }

    #[test]
    fn test_saved_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grounds.csv");

        save_grounds(&rows()[..1], &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "Country,City,Ground,Tests,ODIs,T20s\nEngland,London,Lord's,140,67,12\n"
        );
    }

    #[test]
    fn test_save_hierarchy_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grounds.json");
        let root = Node::Group {
            name: "All".to_string(),
            list: vec![Node::leaf("Eden Gardens, Kolkata", 3)],
        };

        save_hierarchy(&root, &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "{\n    \"name\": \"All\",\n    \"list\": [\n        {\n            \"name\": \"Eden Gardens, Kolkata\",\n            \"count\": 3\n        }\n    ]\n}"
        );
    }

    #[test]
    fn test_save_hierarchy_bad_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("grounds.json");
        assert!(matches!(
            save_hierarchy(&Node::group("All"), &path),
            Err(GroundsError::Io(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_grounds(&dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(err, GroundsError::Io(_)));
    }

    #[test]
    fn test_load_rejects_non_integer_counts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::write(&path, "Country,City,Ground,Tests,ODIs,T20s\nIndia,Pune,MCA,2 Tests,0,0\n")
            .unwrap();
        assert!(matches!(load_grounds(&path), Err(GroundsError::Csv(_))));
    }
}
