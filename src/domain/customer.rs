// ==========================================
// CRM Core - Customer domain model
// ==========================================
// Natural key: document (CPF/CNPJ)
// ==========================================

use crate::domain::types::DocumentType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String, // two-letter code, empty when unknown
    pub zip_code: String,
}

// ==========================================
// CustomerDraft - customer built from a file row
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerDraft {
    pub first_name: String,
    pub last_name: String,
    pub document: String,
    pub document_type: DocumentType,
    pub contact: Contact,
    pub address: Address,
    pub created_by: String,
}

// ==========================================
// Customer - persisted customer
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: String,
    pub first_name: String,
    pub last_name: String,
    pub document: String,
    pub document_type: DocumentType,
    pub contact: Contact,
    pub address: Address,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Builds the persisted form of a draft once its id is known.
    pub fn from_draft(customer_id: String, draft: CustomerDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            customer_id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            document: draft.document,
            document_type: draft.document_type,
            contact: draft.contact,
            address: draft.address,
            created_by: draft.created_by,
            created_at,
        }
    }

    /// Region used to route the customer's cases (state code).
    pub fn region(&self) -> Option<&str> {
        let state = self.address.state.trim();
        if state.is_empty() {
            None
        } else {
            Some(state)
        }
    }
}
