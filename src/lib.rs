pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod models;
pub mod products;
pub mod routes;
pub mod state;
pub mod telemetry;

pub use auth::{CurrentUser, Principal, PrincipalRegistry};
pub use config::{AuthConfig, ConfigError, Settings};
pub use error::{AppError, AuthError};
pub use state::AppState;
