//! Registration repository interface

use async_trait::async_trait;

use super::model::Registration;
use crate::domain::DomainResult;

#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Registration>>;
    async fn find_all(&self) -> DomainResult<Vec<Registration>>;
    async fn save(&self, registration: Registration) -> DomainResult<Registration>;
    async fn delete_by_id(&self, id: i64) -> DomainResult<()>;
}
