// ==========================================
// CRM Core - HTTP server entry point
// ==========================================

use crm_core::app::AppState;
use crm_core::config::AppSettings;
use crm_core::{logging, router};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = AppSettings::from_env()?;
    logging::init();

    tracing::info!("{} {}", crm_core::APP_NAME, crm_core::VERSION);
    tracing::info!(db_path = %settings.db_path, "using database");

    let state = AppState::new(&settings.db_path).await?;
    let app = router(state);

    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!(addr = %settings.bind_addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
