use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema};

use crate::entities::product;

/// Opens the pool and makes sure the product table exists.
pub async fn connect(url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(url.to_owned());
    options.sqlx_logging(false);
    // Each in-memory SQLite connection is its own database.
    if url.contains(":memory:") {
        options.max_connections(1).min_connections(1);
    }

    let db = Database::connect(options).await?;
    ensure_schema(&db).await?;
    Ok(db)
}

pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    let mut create = schema.create_table_from_entity(product::Entity);
    create.if_not_exists();

    db.execute(backend.build(&create)).await?;
    tracing::info!(table = "products", "schema ready");
    Ok(())
}
