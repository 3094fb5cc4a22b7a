use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::auth::password;
use crate::config::AuthConfig;
use crate::error::AuthError;

/// Shared, read-only application state handed to every worker.
#[derive(Debug, Clone)]
pub struct AppState {
    pub auth: Arc<AuthConfig>,
    pub db: DatabaseConnection,
    /// Verified against when a login names an unknown user.
    pub decoy_hash: Arc<str>,
}

impl AppState {
    pub fn new(auth: AuthConfig, db: DatabaseConnection) -> Result<Self, AuthError> {
        let decoy_hash = password::decoy_hash(&auth.password_hash)?;
        Ok(Self {
            auth: Arc::new(auth),
            db,
            decoy_hash: decoy_hash.into(),
        })
    }
}
