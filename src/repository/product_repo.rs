// ==========================================
// CRM Core - Product repository
// ==========================================

use crate::domain::{Product, ProductDraft};
use crate::repository::error::{parse_timestamp, RepositoryError, RepositoryResult};
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Persists a product and returns its generated id
    async fn create(&self, draft: &ProductDraft) -> RepositoryResult<String>;
}

pub struct ProductRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

impl ProductRepositoryImpl {
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

    pub fn find_by_id(&self, product_id: &str) -> RepositoryResult<Option<Product>> {
        let conn = self.get_conn()?;
        let row = conn
            .query_row(
                r#"
                SELECT product_id, name, description, value, brand, model,
                       serial_number, created_by, created_at
                FROM product WHERE product_id = ?1
                "#,
                params![product_id],
                |row| {
                    Ok((
                        Product {
                            product_id: row.get(0)?,
                            name: row.get(1)?,
                            description: row.get(2)?,
                            value: row.get(3)?,
                            brand: row.get(4)?,
                            model: row.get(5)?,
                            serial_number: row.get(6)?,
                            created_by: row.get(7)?,
                            created_at: Utc::now(),
                        },
                        row.get::<_, String>(8)?,
                    ))
                },
            )
            .optional()?;

        match row {
            Some((mut product, created_at)) => {
                product.created_at = parse_timestamp("created_at", &created_at)?;
                Ok(Some(product))
            }
            None => Ok(None),
        }
    }

    pub fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let n = conn.query_row("SELECT COUNT(*) FROM product", [], |row| row.get(0))?;
        Ok(n)
    }
}

#[async_trait]
impl ProductRepository for ProductRepositoryImpl {
    async fn create(&self, draft: &ProductDraft) -> RepositoryResult<String> {
        let conn = self.get_conn()?;
        let product_id = Uuid::new_v4().to_string();

        conn.execute(
            r#"
            INSERT INTO product (
                product_id, name, description, value, brand, model,
                serial_number, created_by, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                product_id,
                draft.name,
                draft.description,
                draft.value,
                draft.brand,
                draft.model,
                draft.serial_number,
                draft.created_by,
                Utc::now().to_rfc3339(),
            ],
        )?;

        Ok(product_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_read_back() {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::init_schema(&conn).unwrap();
        let repo = ProductRepositoryImpl::from_connection(Arc::new(Mutex::new(conn)));

        let draft = ProductDraft {
            name: "Galaxy S23".to_string(),
            description: "Tela quebrada".to_string(),
            value: 1234.56,
            brand: "Samsung".to_string(),
            model: "SM-S911B".to_string(),
            serial_number: "R58T".to_string(),
            created_by: "tester".to_string(),
        };

        let id = repo.create(&draft).await.unwrap();
        let product = repo.find_by_id(&id).unwrap().unwrap();

        assert_eq!(product.name, "Galaxy S23");
        assert_eq!(product.value, 1234.56);
        assert_eq!(repo.count().unwrap(), 1);
        assert!(repo.find_by_id("missing").unwrap().is_none());
    }
}
