//! Piste repository interface

use async_trait::async_trait;

use super::model::Piste;
use crate::domain::DomainResult;

#[async_trait]
pub trait PisteRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Piste>>;
    async fn find_all(&self) -> DomainResult<Vec<Piste>>;
    async fn save(&self, piste: Piste) -> DomainResult<Piste>;
    async fn delete_by_id(&self, id: i64) -> DomainResult<()>;
}
