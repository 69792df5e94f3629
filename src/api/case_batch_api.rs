// ==========================================
// CRM Core - Case batch API
// ==========================================
// Request validation in front of CaseBatchImporter
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::importer::CaseBatchImporter;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseBatchResponse {
    pub case_ids: Vec<String>,
}

/// One uploaded batch, as received at the boundary
#[derive(Debug, Clone, Default)]
pub struct CaseBatchUpload {
    pub author: Option<String>,
    pub company: Option<String>,
    pub file_name: Option<String>,
    pub content: Vec<u8>,
}

pub struct CaseBatchApi {
    importer: Arc<CaseBatchImporter>,
}

impl CaseBatchApi {
    pub fn new(importer: Arc<CaseBatchImporter>) -> Self {
        Self { importer }
    }

    /// Validates the upload and imports it.
    ///
    /// # Returns
    /// - Err(Unauthorized): author missing or blank
    /// - Err(Validation): company or file missing
    /// - otherwise whatever the import returns, mapped by error kind
    pub async fn create_batch(&self, upload: CaseBatchUpload) -> ApiResult<CaseBatchResponse> {
        let author = non_blank(upload.author.as_deref())
            .ok_or_else(|| ApiError::Unauthorized("missing author".to_string()))?;
        let company = non_blank(upload.company.as_deref())
            .ok_or_else(|| ApiError::Validation("missing company".to_string()))?;
        let file_name = non_blank(upload.file_name.as_deref())
            .ok_or_else(|| ApiError::Validation("missing file".to_string()))?;

        let case_ids = self
            .importer
            .create_batch(&upload.content, file_name, author, company)
            .await?;

        Ok(CaseBatchResponse { case_ids })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
