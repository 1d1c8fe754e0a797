use std::sync::Arc;

use hiit_core::webhook::WebhookVerifier;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: hiit_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Signature verifier for `POST /user`; `None` accepts unsigned bodies.
    pub webhook_verifier: Option<Arc<WebhookVerifier>>,
}
