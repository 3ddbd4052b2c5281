//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod course_repository;
pub mod piste_repository;
pub mod registration_repository;
pub mod repository_provider;
pub mod skier_repository;
pub mod subscription_repository;

pub use repository_provider::SeaOrmRepositoryProvider;

use crate::domain::DomainError;

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(format!("Database error: {}", e))
}
