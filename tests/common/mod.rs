#![allow(dead_code)]

use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App};
use actix_http::Request;
use once_cell::sync::OnceCell;
use product_api::{db, routes, AppState, AuthConfig};
use tracing_subscriber::{fmt, EnvFilter};

pub const USERNAME: &str = "testuser";
pub const PASSWORD: &str = "password";
pub const SECRET: &[u8] = b"test_secret_key_for_testing_purposes_only";

static LOGGING: OnceCell<()> = OnceCell::new();

/// Test subscriber; level from `TEST_LOG`, then `RUST_LOG`, default `warn`.
pub fn init_logging() {
    LOGGING.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

pub fn auth_config() -> AuthConfig {
    let hash = bcrypt::hash(PASSWORD, 4).expect("hash test password");
    AuthConfig::new(USERNAME, hash, SECRET.to_vec())
}

pub async fn test_state() -> AppState {
    test_state_with(auth_config()).await
}

pub async fn test_state_with(auth: AuthConfig) -> AppState {
    init_logging();
    let db = db::connect("sqlite::memory:")
        .await
        .expect("open in-memory database");
    AppState::new(auth, db).expect("build app state")
}

pub async fn test_app(
    state: AppState,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}
