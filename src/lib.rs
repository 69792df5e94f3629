// ==========================================
// CRM Core - library root
// ==========================================
// Batch case ingestion: uploaded spreadsheet → customers,
// products and cases for a partner company
// Stack: axum + rusqlite + calamine/csv
// ==========================================

// Entities and value types
pub mod domain;

// Data access
pub mod repository;

// File import pipeline
pub mod importer;

// Batch tunables and process settings
pub mod config;

// SQLite connection setup and schema
pub mod db;

pub mod logging;

// HTTP boundary
pub mod api;

// Application wiring
pub mod app;

// ==========================================
// Re-exports
// ==========================================

pub use api::{router, ApiError, CaseBatchApi, CaseBatchResponse};
pub use app::AppState;
pub use domain::{
    Case, CaseDraft, CaseStatus, Contractor, Customer, CustomerDraft, DocumentType, Product,
    ProductDraft,
};
pub use importer::{CaseBatchImporter, CompanyBuilder, CompanyBuilderRegistry, ImportError};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_NAME: &str = "crm-core";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
