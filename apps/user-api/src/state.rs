//! Application state management.
//!
//! Shared state passed to request handlers that are wired at the app level
//! (the readiness probe). Domain routers carry their own state.

/// Shared application state.
///
/// Cloning is cheap: the database connection is an Arc-backed pool handle.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL database connection pool
    pub db: database::postgres::DatabaseConnection,
}
