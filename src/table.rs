//! HTML table extraction
//!
//! Reads every `<table>` on a page into a [`RawTable`] of cell text, then
//! picks the grounds table by its position.

use crate::config::ScrapeConfig;
use crate::error::{GroundsError, Result};
use scraper::{ElementRef, Html, Selector};

/// One HTML table as cell text, with no type coercion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    /// Column labels taken from the header rows, or column positions
    pub header: Vec<String>,
    /// Data rows; `None` marks an empty cell
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    pub fn width(&self) -> usize {
        self.header.len()
    }
}

/// Parse all tables that contain any text, in document order
pub fn parse_tables(html: &str) -> Result<Vec<RawTable>> {
    let document = Html::parse_document(html);

    let table_selector = Selector::parse("table")
        .map_err(|e| GroundsError::Parse(format!("Invalid selector: {:?}", e)))?;

    let tables: Vec<RawTable> = document
        .select(&table_selector)
        .filter(|table| table.text().any(|t| !t.trim().is_empty()))
        .map(read_table)
        .collect();

    if tables.is_empty() {
        return Err(GroundsError::Parse("No tables found".to_string()));
    }

    log::debug!("Parsed {} tables", tables.len());
    Ok(tables)
}

/// Pick the grounds table out of the page
pub fn extract(html: &str, config: &ScrapeConfig) -> Result<RawTable> {
    let mut tables = parse_tables(html)?;
    let count = tables.len();

    if config.table_index >= count {
        return Err(GroundsError::Parse(format!(
            "Expected a table at index {} but the page has only {} tables",
            config.table_index, count
        )));
    }

    let table = tables.swap_remove(config.table_index);
    log::debug!(
        "Selected table {} with {} columns and {} rows",
        config.table_index,
        table.width(),
        table.rows.len()
    );
    Ok(table)
}

/// Rows that belong to this table, not to tables nested inside it.
/// The flag is set for rows under `<thead>`. Rows under `<tfoot>` come last
/// wherever the footer sits in the markup.
fn direct_rows(table: ElementRef<'_>) -> Vec<(ElementRef<'_>, bool)> {
    let mut rows = Vec::new();
    let mut footer = Vec::new();

    for child in table.children().filter_map(ElementRef::wrap) {
        match child.value().name() {
            "tr" => rows.push((child, false)),
            section @ ("thead" | "tbody" | "tfoot") => {
                let in_head = section == "thead";
                let section_rows = child
                    .children()
                    .filter_map(ElementRef::wrap)
                    .filter(|e| e.value().name() == "tr")
                    .map(|tr| (tr, in_head));
                if section == "tfoot" {
                    footer.extend(section_rows);
                } else {
                    rows.extend(section_rows);
                }
            }
            _ => {}
        }
    }

    rows.extend(footer);
    rows
}

/// A `<td>` or `<th>` with its spans
#[derive(Debug)]
struct Cell {
    text: Option<String>,
    colspan: usize,
    rowspan: usize,
}

fn span_attr(cell: ElementRef<'_>, name: &str) -> usize {
    cell.value()
        .attr(name)
        .and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(1)
}

/// Cells of a row. The flag is set when there is at least one cell and
/// every cell is a `<th>`.
fn read_row(row: ElementRef<'_>) -> (Vec<Cell>, bool) {
    let mut cells = Vec::new();
    let mut all_th = true;

    for cell in row.children().filter_map(ElementRef::wrap) {
        let tag = cell.value().name();
        if tag != "td" && tag != "th" {
            continue;
        }
        all_th &= tag == "th";

        cells.push(Cell {
            text: cell_text(cell),
            colspan: span_attr(cell, "colspan"),
            rowspan: span_attr(cell, "rowspan"),
        });
    }

    let is_header = !cells.is_empty() && all_th;
    (cells, is_header)
}

/// Cell text with whitespace runs collapsed; empty text is absent
fn cell_text(cell: ElementRef<'_>) -> Option<String> {
    let text = cell.text().collect::<String>();
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}

/// Cells still owed to later rows by a `rowspan`, per column
#[derive(Debug, Default)]
struct RowspanCarry {
    slots: Vec<Option<(usize, Option<String>)>>,
}

impl RowspanCarry {
    /// Take the carried text for `col`, if a cell above still spans it
    fn take(&mut self, col: usize) -> Option<Option<String>> {
        let slot = self.slots.get_mut(col)?;
        let (remaining, text) = slot.as_mut()?;
        let text = text.clone();
        *remaining -= 1;
        if *remaining == 0 {
            *slot = None;
        }
        Some(text)
    }

    fn hold(&mut self, col: usize, rows: usize, text: Option<String>) {
        if self.slots.len() <= col {
            self.slots.resize(col + 1, None);
        }
        self.slots[col] = Some((rows, text));
    }

    fn pending_from(&self, col: usize) -> bool {
        self.slots.iter().skip(col).any(Option::is_some)
    }

    fn clear(&mut self) {
        self.slots.clear();
    }
}

/// Lay a row's own cells out on the grid, filling columns covered by
/// `rowspan` cells from earlier rows first.
fn place_row(cells: Vec<Cell>, carry: &mut RowspanCarry) -> Vec<Option<String>> {
    let mut placed = Vec::new();

    for cell in cells {
        while let Some(text) = carry.take(placed.len()) {
            placed.push(text);
        }
        for _ in 0..cell.colspan {
            if cell.rowspan > 1 {
                carry.hold(placed.len(), cell.rowspan - 1, cell.text.clone());
            }
            placed.push(cell.text.clone());
        }
    }

    while carry.pending_from(placed.len()) {
        let text = carry.take(placed.len()).unwrap_or(None);
        placed.push(text);
    }

    placed
}

fn read_table(table: ElementRef<'_>) -> RawTable {
    let mut header_row: Option<Vec<Option<String>>> = None;
    let mut rows = Vec::new();
    let mut in_header = true;
    let mut carry = RowspanCarry::default();

    for (row, in_head) in direct_rows(table) {
        let (cells, is_header) = read_row(row);

        // A row with no cells of its own and nothing spanning into it is dropped
        if cells.is_empty() && !carry.pending_from(0) {
            continue;
        }

        if in_header && (in_head || is_header) {
            header_row = Some(place_row(cells, &mut carry));
            continue;
        }
        if in_header {
            // Header spans do not reach into the body
            carry.clear();
            in_header = false;
            if cells.is_empty() {
                continue;
            }
        }

        rows.push(place_row(cells, &mut carry));
    }

    let width = rows
        .iter()
        .map(Vec::len)
        .chain(header_row.as_ref().map(Vec::len))
        .max()
        .unwrap_or(0);

    for row in &mut rows {
        row.resize(width, None);
    }

    let header_row = header_row.unwrap_or_default();
    let header = (0..width)
        .map(|i| {
            header_row
                .get(i)
                .cloned()
                .flatten()
                .unwrap_or_else(|| i.to_string())
        })
        .collect();

    RawTable { header, rows }
}
