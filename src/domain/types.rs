// ==========================================
// CRM Core - Domain type definitions
// ==========================================
// Case workflow states, document kinds and paging
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// Case status (workflow state)
// ==========================================
// Serialized as snake_case, matching the case_record.status column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    Open,       // initial state, ready for routing
    Draft,      // needs manual completion before routing
    InProgress, // being handled
    Resolved,   // solved, awaiting closure
    Closed,     // terminal
}

impl CaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseStatus::Open => "open",
            CaseStatus::Draft => "draft",
            CaseStatus::InProgress => "in_progress",
            CaseStatus::Resolved => "resolved",
            CaseStatus::Closed => "closed",
        }
    }
}

impl Default for CaseStatus {
    fn default() -> Self {
        CaseStatus::Open
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CaseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(CaseStatus::Open),
            "draft" => Ok(CaseStatus::Draft),
            "in_progress" => Ok(CaseStatus::InProgress),
            "resolved" => Ok(CaseStatus::Resolved),
            "closed" => Ok(CaseStatus::Closed),
            other => Err(format!("unknown case status: {}", other)),
        }
    }
}

// ==========================================
// Document type (Brazilian tax identifiers)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Cpf,  // individual, 11 digits
    Cnpj, // company, 14 digits
}

impl DocumentType {
    /// Infers the document type from its digit count.
    ///
    /// Anything with more than 11 digits is treated as a CNPJ.
    pub fn infer(document: &str) -> Self {
        let digits = document.chars().filter(|c| c.is_ascii_digit()).count();
        if digits > 11 {
            DocumentType::Cnpj
        } else {
            DocumentType::Cpf
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Cpf => "cpf",
            DocumentType::Cnpj => "cnpj",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cpf" => Ok(DocumentType::Cpf),
            "cnpj" => Ok(DocumentType::Cnpj),
            other => Err(format!("unknown document type: {}", other)),
        }
    }
}

// ==========================================
// Page - paged search result
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub limit: usize,
    pub offset: usize,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
