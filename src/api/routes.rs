// ==========================================
// CRM Core - HTTP routes (axum)
// ==========================================

use crate::api::case_batch_api::{CaseBatchResponse, CaseBatchUpload};
use crate::api::error::ApiError;
use crate::app::AppState;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};

pub const CASE_BATCH_PATH: &str = "/crm/core/v1/cases/batch";
pub const AUTHOR_HEADER: &str = "x-author";

/// Upload cap for one batch file
pub const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route(CASE_BATCH_PATH, post(create_case_batch))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

/// POST /crm/core/v1/cases/batch
///
/// multipart fields: `file` (with file name), `company`; header `X-Author`
pub async fn create_case_batch(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<CaseBatchResponse>), ApiError> {
    let mut upload = CaseBatchUpload {
        author: headers
            .get(AUTHOR_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        ..Default::default()
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("malformed multipart body: {}", e)))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                upload.file_name = field.file_name().map(str::to_string);
                upload.content = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::Validation(format!("unreadable file field: {}", e)))?
                    .to_vec();
            }
            Some("company") => {
                upload.company = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::Validation(format!("unreadable company field: {}", e)))?,
                );
            }
            _ => {}
        }
    }

    let response = state.case_batch_api.create_batch(upload).await?;
    Ok((StatusCode::CREATED, Json(response)))
}
