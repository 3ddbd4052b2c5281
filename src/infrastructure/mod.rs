//! Infrastructure layer - external concerns

pub mod database;
pub mod storage;

pub use database::{create_schema, init_database, DatabaseConfig, SeaOrmRepositoryProvider};
pub use storage::InMemoryRepositoryProvider;
