//! Shared application state for request handlers.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::Database;

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Built once at startup and handed to the router; nothing here mutates
/// afterwards. `database_connected` is the result of the one-time startup
/// probe and deliberately does not track reachability changes after
/// startup, so a database outage mid-flight leaves the reported flag stale
/// until the process restarts.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: Option<Arc<Database>>,
    pub database_connected: bool,
}

impl AppState {
    /// Creates application state from the configuration, the database handle
    /// (if credentials were present), and the startup probe result.
    pub fn new(config: AppConfig, db: Option<Database>, database_connected: bool) -> Self {
        Self {
            config: Arc::new(config),
            db: db.map(Arc::new),
            database_connected,
        }
    }
}
