//! Field cleaning: match counts to integers, name overrides

use crate::error::{GroundsError, Result};
use crate::normalize::NamedTable;
use crate::overrides::OverrideMap;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// A cleaned ground listing; also the row shape of the saved CSV
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundRow {
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Ground")]
    pub ground: String,
    #[serde(rename = "Tests")]
    pub tests: u32,
    #[serde(rename = "ODIs")]
    pub odis: u32,
    #[serde(rename = "T20s")]
    pub t20s: u32,
}

impl GroundRow {
    pub fn new(country: &str, city: &str, ground: &str, tests: u32) -> Self {
        Self {
            country: country.to_string(),
            city: city.to_string(),
            ground: ground.to_string(),
            tests,
            odis: 0,
            t20s: 0,
        }
    }
}

/// Match formats that carry a count column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchFormat {
    Test,
    Odi,
    T20,
}

impl MatchFormat {
    pub const ALL: [MatchFormat; 3] = [MatchFormat::Test, MatchFormat::Odi, MatchFormat::T20];

    pub fn column(&self) -> &'static str {
        match self {
            MatchFormat::Test => "Tests",
            MatchFormat::Odi => "ODIs",
            MatchFormat::T20 => "T20s",
        }
    }

    fn pattern(&self) -> &'static Regex {
        lazy_static::lazy_static! {
            static ref TEST: Regex = Regex::new(r"^(.*?)\s+Tests?$").unwrap();
            static ref ODI: Regex = Regex::new(r"^(.*?)\s+ODIs?$").unwrap();
            static ref T20: Regex = Regex::new(r"^(.*?)\s+T20s?$").unwrap();
        }

        match self {
            MatchFormat::Test => &*TEST,
            MatchFormat::Odi => &*ODI,
            MatchFormat::T20 => &*T20,
        }
    }
}

/// Convert a count cell such as `"15 Tests"` to 15. An absent cell is 0.
///
/// Returns `None` when the text left after removing the unit is not a
/// non-negative integer.
pub fn parse_count(raw: Option<&str>, format: MatchFormat) -> Option<u32> {
    let raw = match raw {
        Some(s) => s.trim(),
        None => return Some(0),
    };

    let number = match format.pattern().captures(raw) {
        Some(caps) => caps.get(1).map_or("", |m| m.as_str()),
        None => raw,
    };

    number.trim().parse::<u32>().ok()
}

struct Columns {
    country: usize,
    city: usize,
    ground: usize,
    counts: [usize; 3],
}

impl Columns {
    fn locate(table: &NamedTable) -> Result<Self> {
        Ok(Self {
            country: table.column("Country")?,
            city: table.column("City")?,
            ground: table.column("Ground")?,
            counts: [
                table.column(MatchFormat::Test.column())?,
                table.column(MatchFormat::Odi.column())?,
                table.column(MatchFormat::T20.column())?,
            ],
        })
    }
}

fn name_cell(row: &[Option<String>], index: usize, column: &str, row_num: usize) -> String {
    match row.get(index).cloned().flatten() {
        Some(value) => value,
        None => {
            log::warn!("Row {}: {} is empty", row_num, column);
            String::new()
        }
    }
}

/// Turn the normalized table into typed rows.
///
/// Count cells are parsed per [`parse_count`]; an unparseable count fails the
/// whole table. City and Ground go through their override maps, Country is
/// kept as is.
pub fn clean(
    table: &NamedTable,
    ground_overrides: &OverrideMap,
    city_overrides: &OverrideMap,
) -> Result<Vec<GroundRow>> {
    let cols = Columns::locate(table)?;
    let mut rows = Vec::with_capacity(table.rows.len());

    for (i, row) in table.rows.iter().enumerate() {
        let row_num = i + 1;

        let mut counts = [0u32; 3];
        for (slot, format) in MatchFormat::ALL.iter().enumerate() {
            let raw = row.get(cols.counts[slot]).and_then(|c| c.as_deref());
            counts[slot] = parse_count(raw, *format).ok_or_else(|| GroundsError::CountParse {
                column: format.column().to_string(),
                row: row_num,
                value: raw.unwrap_or_default().to_string(),
            })?;
        }

        let city = name_cell(row, cols.city, "City", row_num);
        let ground = name_cell(row, cols.ground, "Ground", row_num);

        rows.push(GroundRow {
            country: name_cell(row, cols.country, "Country", row_num),
            city: city_overrides.apply(&city).to_string(),
            ground: ground_overrides.apply(&ground).to_string(),
            tests: counts[0],
            odis: counts[1],
            t20s: counts[2],
        });
    }

    log::debug!("Cleaned {} ground rows", rows.len());
    Ok(rows)
}
