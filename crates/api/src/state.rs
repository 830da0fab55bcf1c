use std::sync::Arc;

use crate::config::ServerConfig;
use crate::email::Mailer;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: revue_db::DbPool,
    /// Server configuration (JWT secret, CORS, email).
    pub config: Arc<ServerConfig>,
    /// Outbound email delivery (confirmation codes).
    pub mailer: Arc<Mailer>,
}
