// ==========================================
// CRM Core - API layer
// ==========================================
// Request validation, error → HTTP mapping, axum routes
// ==========================================

pub mod case_batch_api;
pub mod error;
pub mod routes;

pub use case_batch_api::{CaseBatchApi, CaseBatchResponse, CaseBatchUpload};
pub use error::{ApiError, ApiResult, ErrorBody};
pub use routes::{router, AUTHOR_HEADER, CASE_BATCH_PATH};
