// ==========================================
// CRM Core - Column index and row view
// ==========================================
// Header name → position, built once per batch from row 0.
// Builders read cells by header name, never by fixed offset.
// ==========================================

use std::collections::HashMap;
use std::fmt;

/// One decoded row: ordered, trimmed cells
pub type RawRow = Vec<Cell>;

// ==========================================
// Cell - trimmed text, plus the native number for typed spreadsheet cells
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cell {
    text: String,
    number: Option<f64>,
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            text: value.into(),
            number: None,
        }
    }

    /// Numeric spreadsheet cell; `rendered` is what the sheet displays
    pub fn number(value: f64, rendered: impl Into<String>) -> Self {
        Self {
            text: rendered.into(),
            number: Some(value),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// None for CSV cells and for spreadsheet cells that are not numbers
    pub fn as_number(&self) -> Option<f64> {
        self.number
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl AsRef<str> for Cell {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::text(value)
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::text(value)
    }
}

impl PartialEq<&str> for Cell {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnIndex {
    positions: HashMap<String, usize>,
}

impl ColumnIndex {
    /// Builds the index from a header row.
    ///
    /// Headers are trimmed; blank headers are ignored; on duplicates the
    /// first occurrence wins.
    pub fn from_header<S: AsRef<str>>(header: &[S]) -> Self {
        let mut positions = HashMap::with_capacity(header.len());
        for (idx, name) in header.iter().enumerate() {
            let name = name.as_ref().trim();
            if name.is_empty() {
                continue;
            }
            positions.entry(name.to_string()).or_insert(idx);
        }
        Self { positions }
    }

    pub fn position(&self, header: &str) -> Option<usize> {
        self.positions.get(header).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

// ==========================================
// RowView - one data row seen through the column index
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    cells: &'a [Cell],
    columns: &'a ColumnIndex,
    line: usize, // 1-based line in the source file (header is line 1)
}

impl<'a> RowView<'a> {
    pub fn new(cells: &'a [Cell], columns: &'a ColumnIndex, line: usize) -> Self {
        Self {
            cells,
            columns,
            line,
        }
    }

    /// Cell under `header`; empty when the header is unknown or the row is
    /// shorter than the header
    pub fn get(&self, header: &str) -> &'a str {
        self.columns
            .position(header)
            .and_then(|idx| self.cells.get(idx))
            .map(Cell::as_str)
            .unwrap_or("")
    }

    /// Native number under `header`, only for typed spreadsheet cells
    pub fn number(&self, header: &str) -> Option<f64> {
        self.columns
            .position(header)
            .and_then(|idx| self.cells.get(idx))
            .and_then(Cell::as_number)
    }

    /// Cell at a raw position, None when out of range
    pub fn at(&self, idx: usize) -> Option<&'a str> {
        self.cells.get(idx).map(Cell::as_str)
    }

    pub fn line(&self) -> usize {
        self.line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> RawRow {
        cells.iter().map(|s| Cell::from(*s)).collect()
    }

    #[test]
    fn test_from_header_trims_and_keeps_first_duplicate() {
        let index = ColumnIndex::from_header(&row(&[" CPF ", "Nome", "", "Nome"]));

        assert_eq!(index.position("CPF"), Some(0));
        assert_eq!(index.position("Nome"), Some(1));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_row_view_tolerates_short_rows() {
        let index = ColumnIndex::from_header(&row(&["A", "B", "C"]));
        let cells = row(&["a", "b"]);
        let view = RowView::new(&cells, &index, 2);

        assert_eq!(view.get("A"), "a");
        assert_eq!(view.get("C"), "");
        assert_eq!(view.get("missing"), "");
        assert_eq!(view.at(5), None);
        assert_eq!(view.line(), 2);
    }

    #[test]
    fn test_numeric_cells_keep_their_value() {
        let index = ColumnIndex::from_header(&row(&["Valor", "Nome"]));
        let cells = vec![Cell::number(1234.56, "1234.56"), Cell::from("Ana")];
        let view = RowView::new(&cells, &index, 2);

        assert_eq!(view.number("Valor"), Some(1234.56));
        assert_eq!(view.get("Valor"), "1234.56");
        assert_eq!(view.number("Nome"), None);
        assert_eq!(view.number("missing"), None);
    }
}
