// ==========================================
// CRM Core - Configuration errors
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config read failed (key: {key}): {message}")]
    ConfigReadError { key: String, message: String },

    #[error("config value malformed (key: {key}, value: {value}): {message}")]
    ConfigValueError {
        key: String,
        value: String,
        message: String,
    },

    #[error("environment setting invalid ({name}): {message}")]
    EnvError { name: String, message: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;
