// ==========================================
// CRM Core - Customer repository
// ==========================================
// Batch lookup by document and single-customer creation
// Repository holds no business rules, only data access
// ==========================================

use crate::domain::{Address, Contact, Customer, CustomerDraft, DocumentType, Page};
use crate::repository::error::{parse_timestamp, RepositoryError, RepositoryResult};
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

/// Upper bound for `page_limit` in one search call
pub const MAX_SEARCH_PAGE_LIMIT: usize = 1000;

// ==========================================
// CustomerRepository Trait
// ==========================================
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Searches customers whose document is one of `documents` (exact match).
    ///
    /// # Arguments
    /// - documents: documents to match, must not be empty
    /// - page_limit: 1..=MAX_SEARCH_PAGE_LIMIT
    /// - page_offset: paging offset
    async fn search(
        &self,
        documents: &[String],
        page_limit: usize,
        page_offset: usize,
    ) -> RepositoryResult<Page<Customer>>;

    /// Creates a customer and returns its id.
    ///
    /// A document that already exists fails with UniqueConstraintViolation.
    async fn create(&self, draft: &CustomerDraft) -> RepositoryResult<String>;
}

// ==========================================
// CustomerRepositoryImpl (rusqlite)
// ==========================================
pub struct CustomerRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

impl CustomerRepositoryImpl {
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

    /// Looks a customer up by id
    pub fn find_by_id(&self, customer_id: &str) -> RepositoryResult<Option<Customer>> {
        let conn = self.get_conn()?;
        let raw = conn
            .query_row(
                &format!("SELECT {} FROM customer WHERE customer_id = ?1", SELECT_COLUMNS),
                params![customer_id],
                RawCustomer::from_row,
            )
            .optional()?;

        raw.map(RawCustomer::into_customer).transpose()
    }

    /// Number of stored customers
    pub fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let n = conn.query_row("SELECT COUNT(*) FROM customer", [], |row| row.get(0))?;
        Ok(n)
    }
}

const SELECT_COLUMNS: &str = "customer_id, first_name, last_name, document, document_type, \
     phone, email, street, neighborhood, city, state, zip_code, created_by, created_at";

// Row image before enum/timestamp parsing, which can fail outside rusqlite
struct RawCustomer {
    customer_id: String,
    first_name: String,
    last_name: String,
    document: String,
    document_type: String,
    contact: Contact,
    address: Address,
    created_by: String,
    created_at: String,
}

impl RawCustomer {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            customer_id: row.get(0)?,
            first_name: row.get(1)?,
            last_name: row.get(2)?,
            document: row.get(3)?,
            document_type: row.get(4)?,
            contact: Contact {
                phone: row.get(5)?,
                email: row.get(6)?,
            },
            address: Address {
                street: row.get(7)?,
                neighborhood: row.get(8)?,
                city: row.get(9)?,
                state: row.get(10)?,
                zip_code: row.get(11)?,
            },
            created_by: row.get(12)?,
            created_at: row.get(13)?,
        })
    }

    fn into_customer(self) -> RepositoryResult<Customer> {
        let document_type = self
            .document_type
            .parse::<DocumentType>()
            .map_err(|message| RepositoryError::FieldValueError {
                field: "document_type".to_string(),
                message,
            })?;

        Ok(Customer {
            customer_id: self.customer_id,
            first_name: self.first_name,
            last_name: self.last_name,
            document: self.document,
            document_type,
            contact: self.contact,
            address: self.address,
            created_by: self.created_by,
            created_at: parse_timestamp("created_at", &self.created_at)?,
        })
    }
}

#[async_trait]
impl CustomerRepository for CustomerRepositoryImpl {
    async fn search(
        &self,
        documents: &[String],
        page_limit: usize,
        page_offset: usize,
    ) -> RepositoryResult<Page<Customer>> {
        if documents.is_empty() {
            return Err(RepositoryError::FieldValueError {
                field: "documents".to_string(),
                message: "at least one document is required".to_string(),
            });
        }
        if page_limit == 0 || page_limit > MAX_SEARCH_PAGE_LIMIT {
            return Err(RepositoryError::FieldValueError {
                field: "page_limit".to_string(),
                message: format!("must be within 1..={}", MAX_SEARCH_PAGE_LIMIT),
            });
        }

        let conn = self.get_conn()?;
        let placeholders = vec!["?"; documents.len()].join(", ");

        let total: i64 = conn.query_row(
            &format!(
                "SELECT COUNT(*) FROM customer WHERE document IN ({})",
                placeholders
            ),
            params_from_iter(documents.iter()),
            |row| row.get(0),
        )?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM customer WHERE document IN ({}) ORDER BY document LIMIT {} OFFSET {}",
            SELECT_COLUMNS, placeholders, page_limit, page_offset
        ))?;

        let raws = stmt
            .query_map(params_from_iter(documents.iter()), RawCustomer::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        let items = raws
            .into_iter()
            .map(RawCustomer::into_customer)
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok(Page {
            items,
            total,
            limit: page_limit,
            offset: page_offset,
        })
    }

    async fn create(&self, draft: &CustomerDraft) -> RepositoryResult<String> {
        let conn = self.get_conn()?;
        let customer_id = Uuid::new_v4().to_string();

        conn.execute(
            r#"
            INSERT INTO customer (
                customer_id, first_name, last_name, document, document_type,
                phone, email, street, neighborhood, city, state, zip_code,
                created_by, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
            "#,
            params![
                customer_id,
                draft.first_name,
                draft.last_name,
                draft.document,
                draft.document_type.as_str(),
                draft.contact.phone,
                draft.contact.email,
                draft.address.street,
                draft.address.neighborhood,
                draft.address.city,
                draft.address.state,
                draft.address.zip_code,
                draft.created_by,
                Utc::now().to_rfc3339(),
            ],
        )?;

        Ok(customer_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> CustomerRepositoryImpl {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::configure_sqlite_connection(&conn).unwrap();
        crate::db::init_schema(&conn).unwrap();
        CustomerRepositoryImpl::from_connection(Arc::new(Mutex::new(conn)))
    }

    fn draft(document: &str) -> CustomerDraft {
        CustomerDraft {
            first_name: "Maria".to_string(),
            last_name: "da Silva".to_string(),
            document: document.to_string(),
            document_type: DocumentType::infer(document),
            contact: Contact {
                phone: "11999990000".to_string(),
                email: "maria@example.com".to_string(),
            },
            address: Address {
                state: "SP".to_string(),
                ..Default::default()
            },
            created_by: "tester".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_then_search_by_document() {
        let repo = repo();
        let id = repo.create(&draft("11122233344")).await.unwrap();
        repo.create(&draft("55566677788")).await.unwrap();

        let page = repo
            .search(&["11122233344".to_string(), "00000000000".to_string()], 1000, 0)
            .await
            .unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].customer_id, id);
        assert_eq!(page.items[0].region(), Some("SP"));

        let found = repo.find_by_id(&id).unwrap().unwrap();
        assert_eq!(found.last_name, "da Silva");
        assert_eq!(repo.count().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_document_is_a_conflict() {
        let repo = repo();
        repo.create(&draft("11122233344")).await.unwrap();

        let err = repo.create(&draft("11122233344")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::UniqueConstraintViolation(_)));
    }

    #[tokio::test]
    async fn test_search_rejects_oversized_page() {
        let repo = repo();
        let err = repo
            .search(&["1".to_string()], MAX_SEARCH_PAGE_LIMIT + 1, 0)
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::FieldValueError { .. }));
    }
}
