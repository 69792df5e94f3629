// ==========================================
// CRM Core - Domain layer
// ==========================================
// Entities, drafts and value types
// No data access, no pipeline logic
// ==========================================

pub mod case;
pub mod contractor;
pub mod customer;
pub mod product;
pub mod types;

pub use case::{Case, CaseDraft, CASE_TYPE_INSURANCE, ORIGIN_CHANNEL_CSV};
pub use contractor::{Contractor, ContractorSet};
pub use customer::{Address, Contact, Customer, CustomerDraft};
pub use product::{Product, ProductDraft};
pub use types::{CaseStatus, DocumentType, Page};
