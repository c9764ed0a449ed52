use std::sync::Arc;

use tanmia_db::storage::Storage;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Persistence gateway. `MemStorage` in tests and bootstrap runs,
    /// `PgStorage` when a `DATABASE_URL` is configured.
    pub store: Arc<dyn Storage>,
    /// Server configuration (JWT settings, timeouts, CORS origins).
    pub config: Arc<ServerConfig>,
}
