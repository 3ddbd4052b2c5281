pub mod entities;
pub mod repositories;

pub use repositories::SeaOrmRepositoryProvider;

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait, Schema,
};
use tracing::{debug, info};

use entities::{course, piste, registration, skier, skier_piste, subscription};

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "sqlite://./ski-station.db?mode=rwc")
    pub url: String,
    /// Pool size cap. In-memory SQLite needs 1 so every query sees the same database.
    pub max_connections: Option<u32>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::sqlite("./ski-station.db")
    }
}

impl DatabaseConfig {
    /// Create config for SQLite
    pub fn sqlite(path: &str) -> Self {
        Self {
            url: format!("sqlite://{}?mode=rwc", path),
            max_connections: None,
        }
    }

    /// Private in-memory SQLite database
    pub fn memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: Some(1),
        }
    }
}

/// Initialize database connection
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    info!("Connecting to database: {}", config.url);
    let mut opts = ConnectOptions::new(config.url.clone());
    opts.sqlx_logging(false);
    if let Some(max) = config.max_connections {
        opts.max_connections(max).min_connections(max);
    }
    let db = Database::connect(opts).await?;
    info!("Database connected successfully");
    Ok(db)
}

async fn create_table<C, E>(db: &C, schema: &Schema, entity: E) -> Result<(), DbErr>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let mut stmt = schema.create_table_from_entity(entity);
    stmt.if_not_exists();
    db.execute(db.get_database_backend().build(&stmt)).await?;
    debug!("Table ensured: {}", entity.table_name());
    Ok(())
}

/// Create any missing tables from the entity definitions.
///
/// Referenced tables come first so foreign keys resolve.
pub async fn create_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let schema = Schema::new(db.get_database_backend());
    create_table(db, &schema, subscription::Entity).await?;
    create_table(db, &schema, skier::Entity).await?;
    create_table(db, &schema, piste::Entity).await?;
    create_table(db, &schema, course::Entity).await?;
    create_table(db, &schema, registration::Entity).await?;
    create_table(db, &schema, skier_piste::Entity).await?;
    info!("Database schema ready");
    Ok(())
}
