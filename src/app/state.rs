// ==========================================
// CRM Core - Application state
// ==========================================
// Wires repositories, config and the batch API onto one
// shared SQLite connection; cloned into every request
// ==========================================

use crate::api::CaseBatchApi;
use crate::config::{CaseBatchConfigReader, ConfigManager};
use crate::db::{init_schema, open_sqlite_connection};
use crate::importer::CaseBatchImporter;
use crate::repository::{
    CaseRepositoryImpl, ContractorRepositoryImpl, CustomerRepositoryImpl, ProductRepositoryImpl,
};
use anyhow::Context;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct AppState {
    pub db_path: String,
    pub config_manager: Arc<ConfigManager>,
    pub contractor_repo: Arc<ContractorRepositoryImpl>,
    pub case_batch_api: Arc<CaseBatchApi>,
}

impl AppState {
    /// Opens the database, applies the schema and builds the API objects.
    pub async fn new(db_path: &str) -> anyhow::Result<Self> {
        tracing::info!(db_path = %db_path, "initializing application state");

        let conn = open_sqlite_connection(db_path)
            .with_context(|| format!("cannot open database {}", db_path))?;
        init_schema(&conn).context("schema initialization failed")?;

        Self::from_connection(db_path, Arc::new(Mutex::new(conn))).await
    }

    /// Builds the state on an already initialized connection.
    pub async fn from_connection(db_path: &str, conn: Arc<Mutex<Connection>>) -> anyhow::Result<Self> {
        let config_manager = Arc::new(ConfigManager::from_connection(conn.clone()));
        let chunk_size = config_manager
            .get_case_batch_chunk_size()
            .await
            .context("cannot read case batch chunk size")?;

        let contractor_repo = Arc::new(ContractorRepositoryImpl::from_connection(conn.clone()));
        let customer_repo = Arc::new(CustomerRepositoryImpl::from_connection(conn.clone()));
        let product_repo = Arc::new(ProductRepositoryImpl::from_connection(conn.clone()));
        let case_repo =
            Arc::new(CaseRepositoryImpl::from_connection(conn).with_chunk_size(chunk_size));

        let importer = Arc::new(CaseBatchImporter::new(
            contractor_repo.clone(),
            customer_repo,
            product_repo,
            case_repo,
            config_manager.clone(),
        ));

        tracing::info!(chunk_size = chunk_size, "application state ready");

        Ok(Self {
            db_path: db_path.to_string(),
            config_manager,
            contractor_repo,
            case_batch_api: Arc::new(CaseBatchApi::new(importer)),
        })
    }
}
