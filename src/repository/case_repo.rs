// ==========================================
// CRM Core - Case repository (bulk persistence)
// ==========================================
// create_batch: chunked multi-row INSERT, one transaction for the
// whole call, explicit rollback on any chunk failure
// ==========================================

use crate::domain::{Case, CaseDraft, CaseStatus};
use crate::repository::error::{parse_timestamp, RepositoryError, RepositoryResult};
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Transaction};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, error, info};

/// Default number of rows per INSERT statement
pub const DEFAULT_CASE_CHUNK_SIZE: usize = 100;

/// SQLite's bound-parameter limit (SQLITE_MAX_VARIABLE_NUMBER since 3.32)
const SQLITE_MAX_VARIABLES: usize = 32766;

/// Largest chunk whose INSERT stays under the parameter limit
pub const MAX_CASE_CHUNK_SIZE: usize = SQLITE_MAX_VARIABLES / INSERT_COLUMNS.len();

const INSERT_COLUMNS: [&str; 13] = [
    "case_id",
    "contractor_id",
    "customer_id",
    "product_id",
    "origin_channel",
    "case_type",
    "subject",
    "due_date",
    "created_by",
    "external_reference",
    "region",
    "status",
    "created_at",
];

// ==========================================
// CaseRepository Trait
// ==========================================
#[async_trait]
pub trait CaseRepository: Send + Sync {
    /// Persists cases in bulk.
    ///
    /// # Returns
    /// - Ok(Vec<String>): ids of every row attempted, in submission order.
    ///   A row whose id already exists is skipped but its id is still listed.
    /// - Err: any statement failure; the whole call is rolled back
    async fn create_batch(&self, cases: Vec<CaseDraft>) -> RepositoryResult<Vec<String>>;
}

// ==========================================
// CaseRepositoryImpl (rusqlite)
// ==========================================
pub struct CaseRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
    chunk_size: usize,
}

impl CaseRepositoryImpl {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = crate::db::open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            chunk_size: DEFAULT_CASE_CHUNK_SIZE,
        })
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self {
            conn,
            chunk_size: DEFAULT_CASE_CHUNK_SIZE,
        }
    }

    /// Overrides the rows-per-statement bound (1..=MAX_CASE_CHUNK_SIZE)
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.clamp(1, MAX_CASE_CHUNK_SIZE);
        self
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// Inserts every chunk inside `tx`; does not commit
    fn insert_chunks_tx(
        tx: &Transaction<'_>,
        cases: &[CaseDraft],
        chunk_size: usize,
    ) -> RepositoryResult<Vec<String>> {
        let created_at = Utc::now().to_rfc3339();
        let mut case_ids = Vec::with_capacity(cases.len());

        for (chunk_no, chunk) in cases.chunks(chunk_size).enumerate() {
            let row_placeholder = format!("({})", vec!["?"; INSERT_COLUMNS.len()].join(", "));
            let sql = format!(
                "INSERT INTO case_record ({}) VALUES {} ON CONFLICT(case_id) DO NOTHING",
                INSERT_COLUMNS.join(", "),
                vec![row_placeholder.as_str(); chunk.len()].join(", ")
            );

            let mut values: Vec<Value> = Vec::with_capacity(chunk.len() * INSERT_COLUMNS.len());
            for case in chunk {
                values.push(Value::Text(case.case_id.clone()));
                values.push(Value::Text(case.contractor_id.clone()));
                values.push(optional_text(&case.customer_id));
                values.push(optional_text(&case.product_id));
                values.push(Value::Text(case.origin_channel.clone()));
                values.push(Value::Text(case.case_type.clone()));
                values.push(Value::Text(case.subject.clone()));
                values.push(Value::Text(case.due_date.to_rfc3339()));
                values.push(Value::Text(case.created_by.clone()));
                values.push(Value::Text(case.external_reference.clone()));
                values.push(optional_text(&case.region));
                values.push(Value::Text(case.status.as_str().to_string()));
                values.push(Value::Text(created_at.clone()));
            }

            let inserted = tx.execute(&sql, params_from_iter(values.iter()))?;
            debug!(
                chunk = chunk_no,
                rows = chunk.len(),
                inserted = inserted,
                "case chunk written"
            );

            case_ids.extend(chunk.iter().map(|c| c.case_id.clone()));
        }

        Ok(case_ids)
    }

    /// Looks a case up by id
    pub fn find_by_id(&self, case_id: &str) -> RepositoryResult<Option<Case>> {
        let conn = self.get_conn()?;
        let row = conn
            .query_row(
                r#"
                SELECT case_id, contractor_id, customer_id, product_id, origin_channel,
                       case_type, subject, due_date, created_by, external_reference,
                       region, status, created_at
                FROM case_record WHERE case_id = ?1
                "#,
                params![case_id],
                |row| {
                    Ok(RawCase {
                        case_id: row.get(0)?,
                        contractor_id: row.get(1)?,
                        customer_id: row.get(2)?,
                        product_id: row.get(3)?,
                        origin_channel: row.get(4)?,
                        case_type: row.get(5)?,
                        subject: row.get(6)?,
                        due_date: row.get(7)?,
                        created_by: row.get(8)?,
                        external_reference: row.get(9)?,
                        region: row.get(10)?,
                        status: row.get(11)?,
                        created_at: row.get(12)?,
                    })
                },
            )
            .optional()?;

        row.map(RawCase::into_case).transpose()
    }

    /// Number of stored cases
    pub fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let n = conn.query_row("SELECT COUNT(*) FROM case_record", [], |row| row.get(0))?;
        Ok(n)
    }
}

fn optional_text(value: &Option<String>) -> Value {
    match value {
        Some(v) if !v.is_empty() => Value::Text(v.clone()),
        _ => Value::Null,
    }
}

struct RawCase {
    case_id: String,
    contractor_id: String,
    customer_id: Option<String>,
    product_id: Option<String>,
    origin_channel: String,
    case_type: String,
    subject: String,
    due_date: String,
    created_by: String,
    external_reference: String,
    region: Option<String>,
    status: String,
    created_at: String,
}

impl RawCase {
    fn into_case(self) -> RepositoryResult<Case> {
        let status = self
            .status
            .parse::<CaseStatus>()
            .map_err(|message| RepositoryError::FieldValueError {
                field: "status".to_string(),
                message,
            })?;

        Ok(Case {
            case_id: self.case_id,
            contractor_id: self.contractor_id,
            customer_id: self.customer_id,
            product_id: self.product_id,
            origin_channel: self.origin_channel,
            case_type: self.case_type,
            subject: self.subject,
            due_date: parse_timestamp("due_date", &self.due_date)?,
            created_by: self.created_by,
            external_reference: self.external_reference,
            region: self.region,
            status,
            created_at: parse_timestamp("created_at", &self.created_at)?,
        })
    }
}

#[async_trait]
impl CaseRepository for CaseRepositoryImpl {
    async fn create_batch(&self, cases: Vec<CaseDraft>) -> RepositoryResult<Vec<String>> {
        if cases.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        match Self::insert_chunks_tx(&tx, &cases, self.chunk_size) {
            Ok(case_ids) => {
                tx.commit()
                    .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
                info!(
                    cases = case_ids.len(),
                    chunk_size = self.chunk_size,
                    "case batch committed"
                );
                Ok(case_ids)
            }
            Err(e) => {
                error!(error = %e, "case batch failed, rolling back");
                if let Err(rollback_err) = tx.rollback() {
                    error!(error = %rollback_err, "case batch rollback failed");
                }
                Err(e)
            }
        }
    }
}
