// ==========================================
// CRM Core - Import layer
// ==========================================
// Uploaded spreadsheet → cases, products and customers
// Supports: CSV, XLS, XLSX
// ==========================================

pub mod builder;
pub mod case_batch_importer;
pub mod column_index;
pub mod customer_resolver;
pub mod error;
pub mod file_parser;
pub mod money;
pub mod state_codes;

pub use builder::{
    AssurantBuilder, BuildContext, CompanyBuilder, CompanyBuilderRegistry, CompanyIdentity,
    CustomerLink, DefaultBuilder, PitziBuilder, ZurichBuilder,
};
pub use case_batch_importer::CaseBatchImporter;
pub use column_index::{Cell, ColumnIndex, RawRow, RowView};
pub use customer_resolver::{CustomerResolutionMap, CustomerResolver};
pub use error::{ErrorKind, ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, FileKind, FileParser, UniversalFileParser};
pub use money::{parse_money, NumberConvention};
pub use state_codes::state_code;
