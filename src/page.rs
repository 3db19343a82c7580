//! Locating stat tables in fetched HTML pages
//!
//! Sports-reference pages render some tables directly and ship others inside
//! HTML comments that are uncommented client-side. Both are found here.

use lazy_static::lazy_static;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

lazy_static! {
    static ref COMMENT_BLOCK: Regex = Regex::new(r"(?s)<!--(.*?)-->").unwrap();
    static ref TABLE: Selector = Selector::parse("table").unwrap();
    static ref HEADER_ROW: Selector = Selector::parse("thead tr").unwrap();
    static ref BODY_ROW: Selector = Selector::parse("tbody tr").unwrap();
    static ref ANY_ROW: Selector = Selector::parse("tr").unwrap();
    static ref CELL: Selector = Selector::parse("th, td").unwrap();
}

/// An untyped table: header labels plus rows of cell text
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub id: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Index of the first column with this header label
    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == label)
    }

    /// Cell text, or "" when the row is shorter than the header
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Find the first `<table id="...">` in the page, or `None` if the page has no
/// such table (rendered or commented out).
pub fn locate_table(html: &str, table_id: &str) -> Option<RawTable> {
    let document = Html::parse_document(html);
    if let Some(table) = find_table(&document, table_id) {
        return Some(table);
    }

    // Fall back to tables hidden in comment blocks
    let marker = format!("id=\"{}\"", table_id);
    for caps in COMMENT_BLOCK.captures_iter(html) {
        let inner = &caps[1];
        if !inner.contains(&marker) {
            continue;
        }
        let fragment = Html::parse_fragment(inner);
        if let Some(table) = find_table(&fragment, table_id) {
            log::debug!("Table '{}' found inside an HTML comment", table_id);
            return Some(table);
        }
    }

    None
}

fn find_table(document: &Html, table_id: &str) -> Option<RawTable> {
    document
        .select(&TABLE)
        .find(|t| t.value().attr("id") == Some(table_id))
        .map(|t| read_table(t, table_id))
}

fn read_table(table: ElementRef, table_id: &str) -> RawTable {
    // The last header row carries the column labels; earlier ones are group headers
    let headers = table
        .select(&HEADER_ROW)
        .last()
        .map(row_cells)
        .unwrap_or_default();

    let mut body: Vec<ElementRef> = table.select(&BODY_ROW).collect();
    let headers = if headers.is_empty() {
        // Tables without a thead: treat the first row as the header
        let mut all: Vec<ElementRef> = table.select(&ANY_ROW).collect();
        if all.is_empty() {
            Vec::new()
        } else {
            let first = all.remove(0);
            body = all;
            row_cells(first)
        }
    } else {
        headers
    };

    let rows = body.into_iter().map(row_cells).collect();

    RawTable {
        id: table_id.to_string(),
        headers,
        rows,
    }
}

/// Cell texts for one row, repeating spanned cells so columns stay aligned
fn row_cells(row: ElementRef) -> Vec<String> {
    let mut cells = Vec::new();
    for cell in row.select(&CELL) {
        let text = cell.text().collect::<String>().trim().to_string();
        let span = cell
            .value()
            .attr("colspan")
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(1)
            .max(1);
        for _ in 0..span {
            cells.push(text.clone());
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    const GAME_LOG: &str = r#"
        <html><body>
        <table id="player_game_log" class="stats_table">
          <thead>
            <tr><th></th><th colspan="2">Shooting</th></tr>
            <tr><th>Rk</th><th>Date</th><th>PTS</th><th>AST</th></tr>
          </thead>
          <tbody>
            <tr><th>1</th><td>2024-11-04</td><td>26</td><td>4</td></tr>
            <tr class="thead"><th>Rk</th><th>Date</th><th>PTS</th><th>AST</th></tr>
            <tr><th>2</th><td>2024-11-08</td><td colspan="2">Did Not Play</td></tr>
            <tr><th>3</th><td>2024-11-12</td></tr>
          </tbody>
        </table>
        </body></html>
    "#;

    #[test]
    fn test_locate_rendered_table() {
        let table = locate_table(GAME_LOG, "player_game_log").unwrap();
        assert_eq!(table.headers, vec!["Rk", "Date", "PTS", "AST"]);
        assert_eq!(table.len(), 4);
        assert_eq!(table.cell(0, 2), "26");
        assert_eq!(table.cell(1, 2), "PTS");
        assert_eq!(table.cell(2, 3), "Did Not Play");
        assert_eq!(table.cell(3, 2), "");
        assert_eq!(table.column_index("AST"), Some(3));
    }

    #[test]
    fn test_missing_table_is_none() {
        assert!(locate_table(GAME_LOG, "players_per_game").is_none());
        assert!(locate_table("", "player_game_log").is_none());
    }

    #[test]
    fn test_locate_commented_table() {
        let html = r#"
            <div id="all_players_per_game"><!--
            <table id="players_per_game">
              <thead><tr><th>Season</th><th>3P%</th><th>FT%</th><th>3PA</th></tr></thead>
              <tbody><tr><th>2024-25</th><td>.385</td><td>.840</td><td>4.3</td></tr></tbody>
            </table>
            --></div>
        "#;
        let table = locate_table(html, "players_per_game").unwrap();
        assert_eq!(table.headers, vec!["Season", "3P%", "FT%", "3PA"]);
        assert_eq!(table.cell(0, 1), ".385");
    }

    #[test]
    fn test_table_without_thead() {
        let html = r#"<table id="t"><tr><td>A</td><td>B</td></tr><tr><td>1</td><td>2</td></tr></table>"#;
        let table = locate_table(html, "t").unwrap();
        assert_eq!(table.headers, vec!["A", "B"]);
        assert_eq!(table.rows, vec![vec!["1".to_string(), "2".to_string()]]);
    }
}
