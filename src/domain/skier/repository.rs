//! Skier repository interface

use async_trait::async_trait;

use super::model::Skier;
use crate::domain::subscription::SubscriptionType;
use crate::domain::DomainResult;

/// Persistence port for skiers.
///
/// `save` cascades the skier's subscription and piste memberships.
/// Registrations are persisted through their own repository.
#[async_trait]
pub trait SkierRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Skier>>;
    async fn find_all(&self) -> DomainResult<Vec<Skier>>;
    async fn save(&self, skier: Skier) -> DomainResult<Skier>;
    /// Deleting an unknown id is a no-op.
    async fn delete_by_id(&self, id: i64) -> DomainResult<()>;
    async fn find_by_subscription_type(
        &self,
        type_sub: &SubscriptionType,
    ) -> DomainResult<Vec<Skier>>;
}
