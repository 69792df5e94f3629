// ==========================================
// CRM Core - Config manager
// ==========================================
// Storage: config_kv table (key-value + scope), global scope only
// Missing keys fall back to defaults; malformed values are errors
// ==========================================

use crate::config::batch_config_trait::CaseBatchConfigReader;
use crate::config::error::{ConfigError, ConfigResult};
use crate::db::open_sqlite_connection;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::str::FromStr;
use std::sync::{Arc, Mutex};

// ==========================================
// ConfigManager
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// # Arguments
    /// - db_path: database file path
    pub fn new(db_path: &str) -> ConfigResult<Self> {
        let conn = open_sqlite_connection(db_path).map_err(|e| ConfigError::ConfigReadError {
            key: "<connection>".to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Reads a global-scope value
    ///
    /// # Returns
    /// - Some(String): stored value
    /// - None: key absent
    pub fn get_global_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        let conn = self.conn.lock().map_err(|e| ConfigError::ConfigReadError {
            key: key.to_string(),
            message: format!("lock poisoned: {}", e),
        })?;

        conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        )
        .optional()
        .map_err(|e| ConfigError::ConfigReadError {
            key: key.to_string(),
            message: e.to_string(),
        })
    }

    /// Writes a global-scope value (upsert)
    pub fn set_global_config_value(&self, key: &str, value: &str) -> ConfigResult<()> {
        let conn = self.conn.lock().map_err(|e| ConfigError::ConfigReadError {
            key: key.to_string(),
            message: format!("lock poisoned: {}", e),
        })?;

        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )
        .map_err(|e| ConfigError::ConfigReadError {
            key: key.to_string(),
            message: e.to_string(),
        })?;

        Ok(())
    }

    /// Parses a stored value, or returns `default` when the key is absent
    fn get_parsed_or_default<T>(&self, key: &str, default: T) -> ConfigResult<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get_global_config_value(key)? {
            None => Ok(default),
            Some(raw) => raw.trim().parse::<T>().map_err(|e| ConfigError::ConfigValueError {
                key: key.to_string(),
                value: raw.clone(),
                message: e.to_string(),
            }),
        }
    }

    fn get_positive_or_default(&self, key: &str, default: usize) -> ConfigResult<usize> {
        let value = self.get_parsed_or_default(key, default)?;
        if value == 0 {
            return Err(ConfigError::ConfigValueError {
                key: key.to_string(),
                value: "0".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(value)
    }
}

#[async_trait]
impl CaseBatchConfigReader for ConfigManager {
    async fn get_case_batch_chunk_size(&self) -> ConfigResult<usize> {
        let size = self.get_positive_or_default(
            config_keys::CASE_BATCH_CHUNK_SIZE,
            defaults::CASE_BATCH_CHUNK_SIZE,
        )?;
        Ok(size.min(crate::repository::MAX_CASE_CHUNK_SIZE))
    }

    async fn get_customer_search_page_limit(&self) -> ConfigResult<usize> {
        let limit = self.get_positive_or_default(
            config_keys::CUSTOMER_SEARCH_PAGE_LIMIT,
            defaults::CUSTOMER_SEARCH_PAGE_LIMIT,
        )?;
        Ok(limit.min(crate::repository::MAX_SEARCH_PAGE_LIMIT))
    }

    async fn get_case_due_days(&self) -> ConfigResult<i64> {
        let days = self.get_parsed_or_default(config_keys::CASE_DUE_DAYS, defaults::CASE_DUE_DAYS)?;
        if days < 0 {
            return Err(ConfigError::ConfigValueError {
                key: config_keys::CASE_DUE_DAYS.to_string(),
                value: days.to_string(),
                message: "must not be negative".to_string(),
            });
        }
        Ok(days)
    }
}

// ==========================================
// Config keys
// ==========================================
pub mod config_keys {
    pub const CASE_BATCH_CHUNK_SIZE: &str = "case_batch_chunk_size";
    pub const CUSTOMER_SEARCH_PAGE_LIMIT: &str = "customer_search_page_limit";
    pub const CASE_DUE_DAYS: &str = "case_due_days";
}

pub mod defaults {
    pub const CASE_BATCH_CHUNK_SIZE: usize = 100;
    pub const CUSTOMER_SEARCH_PAGE_LIMIT: usize = 1000;
    pub const CASE_DUE_DAYS: i64 = 7;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> ConfigManager {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::init_schema(&conn).unwrap();
        ConfigManager::from_connection(Arc::new(Mutex::new(conn)))
    }

    #[tokio::test]
    async fn test_defaults_when_keys_absent() {
        let config = manager();

        assert_eq!(config.get_case_batch_chunk_size().await.unwrap(), 100);
        assert_eq!(config.get_customer_search_page_limit().await.unwrap(), 1000);
        assert_eq!(config.get_case_due_days().await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_stored_values_override_defaults() {
        let config = manager();
        config.set_global_config_value(config_keys::CASE_BATCH_CHUNK_SIZE, "25").unwrap();
        config.set_global_config_value(config_keys::CASE_DUE_DAYS, " 3 ").unwrap();
        config
            .set_global_config_value(config_keys::CUSTOMER_SEARCH_PAGE_LIMIT, "5000")
            .unwrap();

        assert_eq!(config.get_case_batch_chunk_size().await.unwrap(), 25);
        assert_eq!(config.get_case_due_days().await.unwrap(), 3);
        // clamped to what the repository accepts
        assert_eq!(config.get_customer_search_page_limit().await.unwrap(), 1000);
    }

    #[tokio::test]
    async fn test_chunk_size_is_clamped_to_insert_limit() {
        let config = manager();
        config.set_global_config_value(config_keys::CASE_BATCH_CHUNK_SIZE, "5000").unwrap();

        assert_eq!(config.get_case_batch_chunk_size().await.unwrap(), 2520);
    }

    #[tokio::test]
    async fn test_malformed_values_are_errors() {
        let config = manager();
        config.set_global_config_value(config_keys::CASE_BATCH_CHUNK_SIZE, "many").unwrap();
        config.set_global_config_value(config_keys::CASE_DUE_DAYS, "-1").unwrap();

        assert!(matches!(
            config.get_case_batch_chunk_size().await,
            Err(ConfigError::ConfigValueError { .. })
        ));
        assert!(config.get_case_due_days().await.is_err());
    }
}
