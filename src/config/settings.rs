// ==========================================
// CRM Core - Process settings
// ==========================================
// Read from the environment (a .env file is loaded first when present)
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use std::net::SocketAddr;

pub const ENV_DB_PATH: &str = "CRM_DB_PATH";
pub const ENV_BIND_ADDR: &str = "CRM_BIND_ADDR";

const DEFAULT_DB_PATH: &str = "crm.db";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    pub db_path: String,
    pub bind_addr: SocketAddr,
}

impl AppSettings {
    /// Loads `.env` (if any) and reads the settings from the environment
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds settings from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = lookup(ENV_DB_PATH)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_DB_PATH.to_string());

        let raw_addr = lookup(ENV_BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::EnvError {
                name: ENV_BIND_ADDR.to_string(),
                message: format!("{} ({})", e, raw_addr),
            })?;

        Ok(Self { db_path, bind_addr })
    }
}
