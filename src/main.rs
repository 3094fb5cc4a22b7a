use actix_web::{middleware::Logger, web, App, HttpServer};
use product_api::{db, routes, telemetry, AppState, Settings};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let db = match db::connect(&settings.database_url).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!(error = %e, "failed to connect to database");
            std::process::exit(1);
        }
    };

    let addr = (settings.host.clone(), settings.port);
    tracing::info!(
        app = %settings.app_name,
        host = %addr.0,
        port = addr.1,
        username = %settings.auth.username,
        "starting server"
    );

    let state = match AppState::new(settings.auth, db) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "failed to prepare authentication state");
            std::process::exit(1);
        }
    };
    let data = web::Data::new(state);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind(addr)?
    .run()
    .await
}
