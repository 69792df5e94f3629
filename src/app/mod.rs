// ==========================================
// CRM Core - Application layer
// ==========================================

pub mod state;

pub use state::AppState;
