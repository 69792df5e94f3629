// ==========================================
// CRM Core - Configuration layer
// ==========================================
// Batch tunables: config_kv table
// Process settings: environment
// ==========================================

pub mod batch_config_trait;
pub mod config_manager;
pub mod error;
pub mod settings;

pub use batch_config_trait::CaseBatchConfigReader;
pub use config_manager::{config_keys, ConfigManager};
pub use error::{ConfigError, ConfigResult};
pub use settings::AppSettings;
