//! Shared state available to all request handlers.

use crate::auth::IdentityProvider;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Shared data available to all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection for all ledger and catalog operations
    pub db: DatabaseConnection,
    /// External identity provider used to validate bearer tokens
    pub identity: Arc<dyn IdentityProvider>,
}

impl AppState {
    /// Creates the shared handler state.
    #[must_use]
    pub fn new(db: DatabaseConnection, identity: Arc<dyn IdentityProvider>) -> Self {
        Self { db, identity }
    }
}
