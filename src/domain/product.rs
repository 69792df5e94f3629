// ==========================================
// CRM Core - Product domain model
// ==========================================
// The insured item a case refers to
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub value: f64, // monetary value, 0 when the source cell is empty
    pub brand: String,
    pub model: String,
    pub serial_number: String,
    pub created_by: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: String,
    pub name: String,
    pub description: String,
    pub value: f64,
    pub brand: String,
    pub model: String,
    pub serial_number: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}
