// ==========================================
// Test helpers
// ==========================================
// Temp database with schema, seeded contractors, wired
// importer and CSV/XLSX fixtures
// ==========================================

#![allow(dead_code)]

use async_trait::async_trait;
use crm_core::config::ConfigManager;
use crm_core::db::{init_schema, open_sqlite_connection};
use crm_core::domain::{Customer, CustomerDraft, Page};
use crm_core::importer::CaseBatchImporter;
use crm_core::repository::{
    CaseRepositoryImpl, ContractorRepository, ContractorRepositoryImpl, CustomerRepository,
    CustomerRepositoryImpl, ProductRepositoryImpl, RepositoryResult,
};
use rusqlite::Connection;
use std::error::Error;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

pub const ASSURANT_HEADER: [&str; 15] = [
    "CPF Cliente",
    "Nome Cliente",
    "Valor Produto",
    "Marca",
    "Produto",
    "Número de Série",
    "Defeito Reclamado",
    "Número Sinistro",
    "Telefone Celular",
    "E-mail",
    "Endereço",
    "Bairro",
    "Cidade",
    "Estado",
    "CEP",
];

/// Creates a temp database file with the schema applied
///
/// # Returns
/// - NamedTempFile: keep it alive for the duration of the test
/// - String: database path
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_str().ok_or("non UTF-8 temp path")?.to_string();

    let conn = open_sqlite_connection(&db_path)?;
    init_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// Repositories sharing one connection, as AppState wires them
pub struct TestRepos {
    pub conn: Arc<Mutex<Connection>>,
    pub contractors: Arc<ContractorRepositoryImpl>,
    pub customers: Arc<CustomerRepositoryImpl>,
    pub products: Arc<ProductRepositoryImpl>,
    pub cases: Arc<CaseRepositoryImpl>,
    pub config: Arc<ConfigManager>,
}

impl TestRepos {
    pub fn open(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = Arc::new(Mutex::new(open_sqlite_connection(db_path)?));
        Ok(Self {
            contractors: Arc::new(ContractorRepositoryImpl::from_connection(conn.clone())),
            customers: Arc::new(CustomerRepositoryImpl::from_connection(conn.clone())),
            products: Arc::new(ProductRepositoryImpl::from_connection(conn.clone())),
            cases: Arc::new(CaseRepositoryImpl::from_connection(conn.clone())),
            config: Arc::new(ConfigManager::from_connection(conn.clone())),
            conn,
        })
    }

    pub fn importer(&self) -> CaseBatchImporter {
        self.importer_with_customers(self.customers.clone())
    }

    pub fn importer_with_customers(
        &self,
        customers: Arc<dyn CustomerRepository>,
    ) -> CaseBatchImporter {
        CaseBatchImporter::new(
            self.contractors.clone(),
            customers,
            self.products.clone(),
            self.cases.clone(),
            self.config.clone(),
        )
    }

    /// (customers, products, cases)
    pub fn counts(&self) -> (i64, i64, i64) {
        (
            self.customers.count().unwrap(),
            self.products.count().unwrap(),
            self.cases.count().unwrap(),
        )
    }
}

pub async fn seed_contractors(repos: &TestRepos, names: &[&str]) -> Vec<String> {
    let mut ids = Vec::new();
    for name in names {
        ids.push(repos.contractors.create(name, None).await.unwrap());
    }
    ids
}

/// CSV bytes for a header plus data rows
pub fn csv_bytes(header: &[&str], rows: &[Vec<&str>]) -> Vec<u8> {
    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(Vec::new());
    writer.write_record(header).unwrap();
    for row in rows {
        writer.write_record(row).unwrap();
    }
    writer.into_inner().unwrap()
}

/// Spreadsheet cell for `xlsx_bytes`
pub enum SheetValue<'a> {
    Text(&'a str),
    Number(f64),
}

/// XLSX bytes (single worksheet) for a header plus data rows
pub fn xlsx_bytes(header: &[&str], rows: &[Vec<SheetValue<'_>>]) -> Vec<u8> {
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, name) in header.iter().enumerate() {
        sheet.write_string(0, col as u16, *name).unwrap();
    }
    for (idx, row) in rows.iter().enumerate() {
        let line = idx as u32 + 1;
        for (col, value) in row.iter().enumerate() {
            match value {
                SheetValue::Text(text) => sheet.write_string(line, col as u16, *text).unwrap(),
                SheetValue::Number(number) => sheet.write_number(line, col as u16, *number).unwrap(),
            };
        }
    }
    workbook.save_to_buffer().unwrap()
}

/// One Assurant data row
pub fn assurant_row<'a>(document: &'a str, name: &'a str, value: &'a str) -> Vec<&'a str> {
    vec![
        document,
        name,
        value,
        "Samsung",
        "Galaxy S21",
        "SN123",
        "Tela quebrada",
        "SIN-001",
        "11999990000",
        "cliente@example.com",
        "Rua A, 10",
        "Centro",
        "São Paulo",
        "São Paulo",
        "01000-000",
    ]
}

// ==========================================
// CountingCustomerRepo - delegates and counts calls
// ==========================================
pub struct CountingCustomerRepo {
    inner: Arc<CustomerRepositoryImpl>,
    pub search_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
}

impl CountingCustomerRepo {
    pub fn new(inner: Arc<CustomerRepositoryImpl>) -> Self {
        Self {
            inner,
            search_calls: AtomicUsize::new(0),
            create_calls: AtomicUsize::new(0),
        }
    }

    pub fn searches(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn creates(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CustomerRepository for CountingCustomerRepo {
    async fn search(
        &self,
        documents: &[String],
        page_limit: usize,
        page_offset: usize,
    ) -> RepositoryResult<Page<Customer>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.search(documents, page_limit, page_offset).await
    }

    async fn create(&self, draft: &CustomerDraft) -> RepositoryResult<String> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.create(draft).await
    }
}
