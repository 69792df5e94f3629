// ==========================================
// CRM Core - Contractor domain model
// ==========================================
// A contractor is the partner company that owns a case's
// business relationship (insurer, retailer, ...)
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contractor {
    pub contractor_id: String,
    pub company_name: String,
    pub document: Option<String>, // CNPJ of the legal entity
    pub created_at: DateTime<Utc>,
}

// ==========================================
// ContractorSet - contractors resolved for one batch
// ==========================================
// Lookup is case-insensitive on the company name
#[derive(Debug, Clone, Default)]
pub struct ContractorSet {
    contractors: Vec<Contractor>,
}

impl ContractorSet {
    pub fn new(contractors: Vec<Contractor>) -> Self {
        Self { contractors }
    }

    pub fn by_name(&self, company_name: &str) -> Option<&Contractor> {
        let wanted = company_name.trim();
        self.contractors
            .iter()
            .find(|c| c.company_name.trim().eq_ignore_ascii_case(wanted))
    }

    pub fn is_empty(&self) -> bool {
        self.contractors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.contractors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Contractor> {
        self.contractors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contractor(name: &str) -> Contractor {
        Contractor {
            contractor_id: format!("id-{}", name),
            company_name: name.to_string(),
            document: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_by_name_ignores_case_and_padding() {
        let set = ContractorSet::new(vec![contractor("Zurich Minuano"), contractor("Assurant")]);

        assert_eq!(
            set.by_name("  assurant ").map(|c| c.contractor_id.as_str()),
            Some("id-Assurant")
        );
        assert!(set.by_name("Zurich Santander").is_none());
        assert_eq!(set.len(), 2);
    }
}
