// ==========================================
// CRM Core - Repository layer
// ==========================================
// Data access behind async traits; no business rules here
// All queries are parameterized
// ==========================================

pub mod case_repo;
pub mod contractor_repo;
pub mod customer_repo;
pub mod error;
pub mod product_repo;

pub use case_repo::{
    CaseRepository, CaseRepositoryImpl, DEFAULT_CASE_CHUNK_SIZE, MAX_CASE_CHUNK_SIZE,
};
pub use contractor_repo::{ContractorRepository, ContractorRepositoryImpl};
pub use customer_repo::{CustomerRepository, CustomerRepositoryImpl, MAX_SEARCH_PAGE_LIMIT};
pub use error::{RepositoryError, RepositoryResult};
pub use product_repo::{ProductRepository, ProductRepositoryImpl};
