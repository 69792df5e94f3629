// ==========================================
// CRM Core - Company builder strategy
// ==========================================
// One builder per partner company maps a file row into
// CaseDraft / ProductDraft / CustomerDraft.
// Companies without a dedicated builder get DefaultBuilder.
// ==========================================

pub mod assurant;
pub mod common;
pub mod default;
pub mod pitzi;
pub mod zurich;

pub use assurant::AssurantBuilder;
pub use default::DefaultBuilder;
pub use pitzi::PitziBuilder;
pub use zurich::ZurichBuilder;

use crate::domain::{CaseDraft, ContractorSet, CustomerDraft, ProductDraft};
use crate::importer::column_index::{ColumnIndex, RowView};
use crate::importer::error::{ImportError, ImportResult};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

// ==========================================
// Inputs shared by every row of a batch
// ==========================================
#[derive(Debug, Clone)]
pub struct BuildContext {
    pub created_by: String,
    pub now: DateTime<Utc>,
    pub due_in: Duration,
}

impl BuildContext {
    pub fn new(created_by: &str, now: DateTime<Utc>, due_days: i64) -> Self {
        Self {
            created_by: created_by.to_string(),
            now,
            due_in: Duration::days(due_days),
        }
    }
}

/// Customer resolved for a row
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerLink {
    pub customer_id: String,
    pub region: Option<String>,
}

/// Contractor name(s) a builder's rows may belong to
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyIdentity {
    names: Vec<String>,
}

impl CompanyIdentity {
    pub fn single(name: &str) -> Self {
        Self {
            names: vec![name.trim().to_string()],
        }
    }

    /// Two legal entities; the contractor is chosen per row
    pub fn pair(first: &str, second: &str) -> Self {
        Self {
            names: vec![first.to_string(), second.to_string()],
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_composite(&self) -> bool {
        self.names.len() > 1
    }
}

// ==========================================
// CompanyBuilder Trait
// ==========================================
pub trait CompanyBuilder: Send + Sync {
    /// Company name(s) used to look contractors up
    fn identity(&self) -> CompanyIdentity;

    /// Header of the customer document column.
    ///
    /// None means the company's files never carry customer data and the
    /// batch skips customer resolution entirely.
    fn customer_document_header(&self) -> Option<&'static str>;

    /// Position of the document column in this file.
    ///
    /// # Returns
    /// - Ok(None): no document column for this company
    /// - Ok(Some(idx)): position of the declared header
    /// - Err(Validation): header declared but missing from the file
    fn customer_document_column_index(&self, columns: &ColumnIndex) -> ImportResult<Option<usize>> {
        match self.customer_document_header() {
            None => Ok(None),
            Some(header) => columns.position(header).map(Some).ok_or_else(|| {
                ImportError::Validation(format!("missing column '{}' in file header", header))
            }),
        }
    }

    fn build_case(
        &self,
        row: &RowView<'_>,
        contractors: &ContractorSet,
        customer: Option<&CustomerLink>,
        ctx: &BuildContext,
    ) -> ImportResult<CaseDraft>;

    fn build_product(&self, row: &RowView<'_>, ctx: &BuildContext) -> ImportResult<ProductDraft>;

    fn build_customer(&self, row: &RowView<'_>, ctx: &BuildContext) -> ImportResult<CustomerDraft>;
}

// ==========================================
// CompanyBuilderRegistry
// ==========================================
// Company name (case-insensitive) → builder factory.
// Unknown names fall back to DefaultBuilder for that name.
pub type BuilderFactory = fn(&str) -> Box<dyn CompanyBuilder>;

pub struct CompanyBuilderRegistry {
    factories: HashMap<String, BuilderFactory>,
}

impl CompanyBuilderRegistry {
    /// Registry without any dedicated builder
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    pub fn register(&mut self, company_name: &str, factory: BuilderFactory) -> &mut Self {
        self.factories.insert(registry_key(company_name), factory);
        self
    }

    pub fn select(&self, company_name: &str) -> Box<dyn CompanyBuilder> {
        match self.factories.get(&registry_key(company_name)) {
            Some(factory) => factory(company_name),
            None => Box::new(DefaultBuilder::new(company_name)),
        }
    }

    pub fn is_registered(&self, company_name: &str) -> bool {
        self.factories.contains_key(&registry_key(company_name))
    }
}

impl Default for CompanyBuilderRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry
            .register(assurant::COMPANY_NAME, |_| Box::new(AssurantBuilder))
            .register("Zurich", |_| Box::new(ZurichBuilder))
            .register(zurich::SANTANDER_COMPANY, |_| Box::new(ZurichBuilder))
            .register(zurich::MINUANO_COMPANY, |_| Box::new(ZurichBuilder))
            .register(pitzi::COMPANY_NAME, |_| Box::new(PitziBuilder));
        registry
    }
}

fn registry_key(company_name: &str) -> String {
    company_name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_known_companies() {
        let registry = CompanyBuilderRegistry::default();

        assert_eq!(registry.select("assurant").identity().names(), ["Assurant"]);
        assert!(registry.select("Zurich Minuano").identity().is_composite());
        assert_eq!(registry.select(" PITZI ").customer_document_header(), None);
    }

    #[test]
    fn test_unknown_company_falls_back_to_default() {
        let registry = CompanyBuilderRegistry::default();
        let builder = registry.select("Acme Seguros");

        assert!(!registry.is_registered("Acme Seguros"));
        assert_eq!(builder.identity().names(), ["Acme Seguros"]);
        assert_eq!(builder.customer_document_header(), Some(default::DOCUMENT));
    }

    #[test]
    fn test_register_new_company() {
        let mut registry = CompanyBuilderRegistry::empty();
        registry.register("Acme Seguros", |_| Box::new(PitziBuilder));

        assert!(registry.is_registered("acme seguros"));
        assert_eq!(registry.select("ACME SEGUROS").identity().names(), ["Pitzi"]);
    }

    #[test]
    fn test_missing_document_header_is_a_validation_error() {
        let columns = ColumnIndex::from_header(&["Nome Cliente".to_string()]);
        let err = AssurantBuilder
            .customer_document_column_index(&columns)
            .unwrap_err();
        assert!(matches!(err, ImportError::Validation(_)));

        assert_eq!(PitziBuilder.customer_document_column_index(&columns).unwrap(), None);
    }
}
