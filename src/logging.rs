// ==========================================
// Logging setup
// ==========================================
// tracing + tracing-subscriber
// Level filter configurable through RUST_LOG
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// Output format switch: `CRM_LOG_FORMAT=json` for structured logs
pub const ENV_LOG_FORMAT: &str = "CRM_LOG_FORMAT";

/// Installs the global subscriber.
///
/// # Environment
/// - RUST_LOG: level filter (default: info)
///   e.g. RUST_LOG=debug or RUST_LOG=crm_core=trace
/// - CRM_LOG_FORMAT: `json` for one JSON object per line, text otherwise
///
/// # Example
/// ```no_run
/// use crm_core::logging;
/// logging::init();
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let json = std::env::var(ENV_LOG_FORMAT)
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Subscriber for tests: debug level, captured by the test harness
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
