//! Column renaming for the grounds table

use crate::error::{GroundsError, Result};
use crate::table::RawTable;

/// Labels given to the three trailing match-count columns
pub const COUNT_COLUMNS: [&str; 3] = ["Tests", "ODIs", "T20s"];

/// A table whose columns have meaningful names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamedTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl NamedTable {
    /// Position of a column by name
    pub fn column(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| {
                GroundsError::Schema(format!(
                    "Column '{}' not found (columns: {})",
                    name,
                    self.columns.join(", ")
                ))
            })
    }
}

/// Rename the columns from the first data row, then drop that row and the
/// trailing summary row.
///
/// The first three names come from the text of the first row, whatever it
/// says. The last three are always `Tests`, `ODIs` and `T20s`, since the page
/// gives them one shared label.
pub fn normalize(table: RawTable) -> Result<NamedTable> {
    let width = table.width();
    if width < 6 {
        return Err(GroundsError::Schema(format!(
            "Grounds table has {} columns, expected at least 6",
            width
        )));
    }
    if table.rows.len() < 2 {
        return Err(GroundsError::Schema(format!(
            "Grounds table has {} rows, expected a header row and a summary row",
            table.rows.len()
        )));
    }

    let mut rows = table.rows;
    let names_row = rows.remove(0);
    rows.pop();

    let mut columns: Vec<String> = table.header;
    for (i, name) in names_row.iter().take(3).enumerate() {
        columns[i] = name.clone().unwrap_or_default();
    }
    for (offset, name) in COUNT_COLUMNS.iter().enumerate() {
        columns[width - 3 + offset] = name.to_string();
    }

    log::debug!("Normalized columns: {}", columns.join(", "));
    Ok(NamedTable { columns, rows })
}
