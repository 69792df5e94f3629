// ==========================================
// CRM Core - Case batch config reader trait
// ==========================================
// Tunables the batch pipeline reads before a run
// Read-only: no config writes, no business logic
// ==========================================

use crate::config::error::ConfigResult;
use async_trait::async_trait;

// ==========================================
// CaseBatchConfigReader Trait
// ==========================================
// Implementor: ConfigManager (config_kv table)
#[async_trait]
pub trait CaseBatchConfigReader: Send + Sync {
    /// Rows per bulk INSERT statement
    ///
    /// # Default
    /// - 100
    async fn get_case_batch_chunk_size(&self) -> ConfigResult<usize>;

    /// Documents per customer search call
    ///
    /// # Default
    /// - 1000 (also the repository's upper bound)
    async fn get_customer_search_page_limit(&self) -> ConfigResult<usize>;

    /// Days between case creation and its due date
    ///
    /// # Default
    /// - 7
    async fn get_case_due_days(&self) -> ConfigResult<i64>;
}
