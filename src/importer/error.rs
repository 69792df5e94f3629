// ==========================================
// CRM Core - Import pipeline error type
// ==========================================
// thiserror-derived; every variant belongs to one ErrorKind,
// which the API layer maps to an HTTP status
// ==========================================

use crate::config::ConfigError;
use crate::repository::RepositoryError;
use thiserror::Error;

/// Classification kept intact while an error travels up the layers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Parser,
    NotFound,
    Conflict,
    Internal,
}

/// Import pipeline error
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== Input shape =====
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("unsupported file format: {0} (only .csv/.xls/.xlsx)")]
    UnsupportedFormat(String),

    // ===== File content =====
    #[error("CSV parse failed: {0}")]
    CsvParseError(String),

    #[error("spreadsheet parse failed: {0}")]
    ExcelParseError(String),

    #[error("value parse failed (row {row}, column {field}): {value:?}")]
    ValueParseError {
        row: usize,
        field: String,
        value: String,
    },

    // ===== Lookups =====
    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    // ===== Infrastructure =====
    #[error("database error: {0}")]
    Database(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("internal error: {0}")]
    InternalError(String),
}

impl ImportError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ImportError::Validation(_) | ImportError::UnsupportedFormat(_) => ErrorKind::Validation,
            ImportError::CsvParseError(_)
            | ImportError::ExcelParseError(_)
            | ImportError::ValueParseError { .. } => ErrorKind::Parser,
            ImportError::NotFound(_) => ErrorKind::NotFound,
            ImportError::Conflict(_) => ErrorKind::Conflict,
            ImportError::Database(_) | ImportError::Config(_) | ImportError::InternalError(_) => {
                ErrorKind::Internal
            }
        }
    }
}

// Keeps the repository error's kind
impl From<RepositoryError> for ImportError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ImportError::NotFound(format!("{} (id={})", entity, id))
            }
            RepositoryError::UniqueConstraintViolation(msg) => ImportError::Conflict(msg),
            RepositoryError::FieldValueError { field, message } => {
                ImportError::Validation(format!("{}: {}", field, message))
            }
            other => ImportError::Database(other.to_string()),
        }
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result alias
pub type ImportResult<T> = Result<T, ImportError>;
