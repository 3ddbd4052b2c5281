//! # Ski Station
//!
//! Skier management for a ski station: skiers, their subscription, the
//! pistes they ride and the courses they are registered for.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, value types and repository traits
//! - **application**: Use cases (`SkierService`)
//! - **infrastructure**: SeaORM (SQLite) and in-memory repository implementations
//! - **config**: TOML configuration
//! - **runtime**: Store selection, schema bootstrap and logging setup

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod runtime;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{
    create_schema, init_database, DatabaseConfig, InMemoryRepositoryProvider,
    SeaOrmRepositoryProvider,
};

pub use application::SkierService;
pub use runtime::{init_tracing, seed_catalogue, RuntimeHandle};
