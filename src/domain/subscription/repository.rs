//! Subscription repository interface

use async_trait::async_trait;

use super::model::Subscription;
use crate::domain::DomainResult;

#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Subscription>>;
    async fn find_all(&self) -> DomainResult<Vec<Subscription>>;
    async fn save(&self, subscription: Subscription) -> DomainResult<Subscription>;
    async fn delete_by_id(&self, id: i64) -> DomainResult<()>;
}
