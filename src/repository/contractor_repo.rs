// ==========================================
// CRM Core - Contractor repository
// ==========================================
// Contractor lookup by company name (paged)
// Repository holds no business rules, only data access
// ==========================================

use crate::domain::{Contractor, Page};
use crate::repository::error::{parse_timestamp, RepositoryError, RepositoryResult};
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, params_from_iter, Connection};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

// ==========================================
// ContractorRepository Trait
// ==========================================
#[async_trait]
pub trait ContractorRepository: Send + Sync {
    /// Searches contractors whose company name matches any of `company_names`
    /// (case-insensitive).
    ///
    /// # Arguments
    /// - company_names: names to match, must not be empty
    /// - page_limit / page_offset: paging window
    async fn search(
        &self,
        company_names: &[String],
        page_limit: usize,
        page_offset: usize,
    ) -> RepositoryResult<Page<Contractor>>;

    /// Registers a contractor and returns its id
    async fn create(&self, company_name: &str, document: Option<&str>) -> RepositoryResult<String>;
}

// ==========================================
// ContractorRepositoryImpl (rusqlite)
// ==========================================
pub struct ContractorRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

impl ContractorRepositoryImpl {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = crate::db::open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

#[async_trait]
impl ContractorRepository for ContractorRepositoryImpl {
    async fn search(
        &self,
        company_names: &[String],
        page_limit: usize,
        page_offset: usize,
    ) -> RepositoryResult<Page<Contractor>> {
        if company_names.is_empty() {
            return Err(RepositoryError::FieldValueError {
                field: "company_names".to_string(),
                message: "at least one company name is required".to_string(),
            });
        }

        let conn = self.get_conn()?;
        let placeholders = vec!["?"; company_names.len()].join(", ");

        let total: i64 = conn.query_row(
            &format!(
                "SELECT COUNT(*) FROM contractor WHERE company_name IN ({})",
                placeholders
            ),
            params_from_iter(company_names.iter()),
            |row| row.get(0),
        )?;

        let mut stmt = conn.prepare(&format!(
            r#"
            SELECT contractor_id, company_name, document, created_at
            FROM contractor
            WHERE company_name IN ({})
            ORDER BY company_name
            LIMIT {} OFFSET {}
            "#,
            placeholders, page_limit, page_offset
        ))?;

        let rows = stmt
            .query_map(params_from_iter(company_names.iter()), |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<String>>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut items = Vec::with_capacity(rows.len());
        for (contractor_id, company_name, document, created_at) in rows {
            items.push(Contractor {
                contractor_id,
                company_name,
                document,
                created_at: parse_timestamp("created_at", &created_at)?,
            });
        }

        Ok(Page {
            items,
            total,
            limit: page_limit,
            offset: page_offset,
        })
    }

    async fn create(&self, company_name: &str, document: Option<&str>) -> RepositoryResult<String> {
        let conn = self.get_conn()?;
        let contractor_id = Uuid::new_v4().to_string();

        conn.execute(
            r#"
            INSERT INTO contractor (contractor_id, company_name, document, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                contractor_id,
                company_name.trim(),
                document,
                Utc::now().to_rfc3339()
            ],
        )?;

        Ok(contractor_id)
    }
}
