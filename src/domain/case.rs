// ==========================================
// CRM Core - Case domain model
// ==========================================
// A case is a support/claim ticket opened for a customer
// on behalf of a contractor
// ==========================================

use crate::domain::types::CaseStatus;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Origin channel of cases created from an uploaded file.
pub const ORIGIN_CHANNEL_CSV: &str = "csv";

/// Case type of every case created by the batch pipeline.
pub const CASE_TYPE_INSURANCE: &str = "insurance";

// ==========================================
// CaseDraft - case not yet persisted
// ==========================================
// Invariant: contractor_id non-empty before persistence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseDraft {
    pub case_id: String, // generated up front, insert is idempotent on it
    pub contractor_id: String,
    pub customer_id: Option<String>,
    pub product_id: Option<String>,
    pub origin_channel: String,
    pub case_type: String,
    pub subject: String,
    pub due_date: DateTime<Utc>,
    pub created_by: String,
    pub external_reference: String,
    pub region: Option<String>,
    pub status: CaseStatus,
}

impl CaseDraft {
    /// Starts a draft with the batch defaults: csv channel, insurance type,
    /// open status and a due date `due_in` from `now`.
    pub fn new(contractor_id: &str, created_by: &str, now: DateTime<Utc>, due_in: Duration) -> Self {
        Self {
            case_id: Uuid::new_v4().to_string(),
            contractor_id: contractor_id.to_string(),
            customer_id: None,
            product_id: None,
            origin_channel: ORIGIN_CHANNEL_CSV.to_string(),
            case_type: CASE_TYPE_INSURANCE.to_string(),
            subject: String::new(),
            due_date: now + due_in,
            created_by: created_by.to_string(),
            external_reference: String::new(),
            region: None,
            status: CaseStatus::Open,
        }
    }

    /// Checks the invariants required before the draft can be persisted.
    pub fn validate(&self) -> Result<(), String> {
        if self.case_id.trim().is_empty() {
            return Err("case_id is empty".to_string());
        }
        if self.contractor_id.trim().is_empty() {
            return Err(format!("case {} has no contractor", self.case_id));
        }
        Ok(())
    }
}

// ==========================================
// Case - persisted case
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub case_id: String,
    pub contractor_id: String,
    pub customer_id: Option<String>,
    pub product_id: Option<String>,
    pub origin_channel: String,
    pub case_type: String,
    pub subject: String,
    pub due_date: DateTime<Utc>,
    pub created_by: String,
    pub external_reference: String,
    pub region: Option<String>,
    pub status: CaseStatus,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_draft_defaults() {
        let now = Utc::now();
        let draft = CaseDraft::new("contractor-1", "ana", now, Duration::days(7));

        assert_eq!(draft.origin_channel, "csv");
        assert_eq!(draft.case_type, "insurance");
        assert_eq!(draft.status, CaseStatus::Open);
        assert_eq!(draft.due_date, now + Duration::days(7));
        assert!(draft.customer_id.is_none());
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_contractor() {
        let draft = CaseDraft::new("  ", "ana", Utc::now(), Duration::days(7));
        assert!(draft.validate().is_err());
    }
}
