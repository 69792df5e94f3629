// ==========================================
// CRM Core - Tabular file parsers
// ==========================================
// Input: uploaded bytes + declared file name
// Supports: CSV (.csv) / spreadsheet (.xls/.xlsx)
// Output: rows of trimmed cells, header row included; typed spreadsheet
// numbers keep their native value next to the displayed text
// ==========================================

use crate::importer::column_index::{Cell, RawRow};
use crate::importer::error::{ImportError, ImportResult};
use calamine::{Data, Range, Reader, Xls, Xlsx};
use csv::ReaderBuilder;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

// ==========================================
// FileKind - decided by extension only
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Csv,
    Xls,
    Xlsx,
}

impl FileKind {
    /// # Returns
    /// - Err(UnsupportedFormat) for any extension other than csv/xls/xlsx
    pub fn from_file_name(file_name: &str) -> ImportResult<Self> {
        let ext = Path::new(file_name.trim())
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => Ok(FileKind::Csv),
            "xls" => Ok(FileKind::Xls),
            "xlsx" => Ok(FileKind::Xlsx),
            "" => Err(ImportError::UnsupportedFormat(format!(
                "{} has no extension",
                file_name
            ))),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}

// ==========================================
// FileParser Trait
// ==========================================
pub trait FileParser: Send + Sync {
    /// Decodes the whole file; any failure aborts with no partial rows
    fn parse_rows(&self, bytes: &[u8]) -> ImportResult<Vec<RawRow>>;
}

// ==========================================
// CSV Parser
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_rows(&self, bytes: &[u8]) -> ImportResult<Vec<RawRow>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false) // header is row 0 of the result
            .flexible(true) // rows may differ in length
            .from_reader(bytes);

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut row: RawRow = record.iter().map(|v| Cell::text(v.trim())).collect();

            if rows.is_empty() {
                if let Some(first) = row.first_mut() {
                    *first = Cell::text(first.as_str().trim_start_matches('\u{feff}').trim());
                }
            }

            // drop fully blank rows
            if row.iter().all(|v| v.is_empty()) {
                continue;
            }

            rows.push(row);
        }

        Ok(rows)
    }
}

// ==========================================
// Excel Parser (first worksheet)
// ==========================================
pub struct ExcelParser {
    kind: FileKind,
}

impl ExcelParser {
    pub fn xls() -> Self {
        Self { kind: FileKind::Xls }
    }

    pub fn xlsx() -> Self {
        Self {
            kind: FileKind::Xlsx,
        }
    }
}

impl FileParser for ExcelParser {
    fn parse_rows(&self, bytes: &[u8]) -> ImportResult<Vec<RawRow>> {
        let cursor = Cursor::new(bytes.to_vec());

        let range = match self.kind {
            FileKind::Xls => {
                let mut workbook = Xls::new(cursor)
                    .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;
                first_sheet_range(&mut workbook)?
            }
            _ => {
                let mut workbook = Xlsx::new(cursor)
                    .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;
                first_sheet_range(&mut workbook)?
            }
        };

        let mut rows = Vec::new();
        for data_row in range.rows() {
            let row: RawRow = data_row.iter().map(cell_from_data).collect();

            if row.iter().all(|v| v.is_empty()) {
                continue;
            }

            rows.push(row);
        }

        Ok(rows)
    }
}

/// Float/Int cells stay numeric so a locale convention is never applied to them
fn cell_from_data(data: &Data) -> Cell {
    let rendered = data.to_string().trim().to_string();
    match data {
        Data::Float(value) => Cell::number(*value, rendered),
        Data::Int(value) => Cell::number(*value as f64, rendered),
        _ => Cell::text(rendered),
    }
}

fn first_sheet_range<RS, R>(workbook: &mut R) -> ImportResult<Range<Data>>
where
    RS: Read + Seek,
    R: Reader<RS>,
    R::Error: std::fmt::Display,
{
    let sheet_names = workbook.sheet_names();
    let sheet_name = sheet_names
        .first()
        .cloned()
        .ok_or_else(|| ImportError::ExcelParseError("workbook has no worksheet".to_string()))?;

    workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| ImportError::ExcelParseError(e.to_string()))
}

// ==========================================
// UniversalFileParser (dispatch by extension)
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    /// Picks the decoder from `file_name`'s extension and decodes `bytes`.
    ///
    /// The extension is checked before any byte is read.
    pub fn parse(&self, bytes: &[u8], file_name: &str) -> ImportResult<Vec<RawRow>> {
        let kind = FileKind::from_file_name(file_name)?;
        Self::parser_for(kind).parse_rows(bytes)
    }

    pub fn parser_for(kind: FileKind) -> Box<dyn FileParser> {
        match kind {
            FileKind::Csv => Box::new(CsvParser),
            FileKind::Xls => Box::new(ExcelParser::xls()),
            FileKind::Xlsx => Box::new(ExcelParser::xlsx()),
        }
    }
}
