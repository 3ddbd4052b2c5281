//! Repository provider for the domain layer
//!
//! Contains:
//! - `RepositoryProvider`: unified access to all per-aggregate repositories
//! - `DomainResult`: standard result type for domain operations

use std::sync::Arc;

use super::course::CourseRepository;
use super::piste::PisteRepository;
use super::registration::RegistrationRepository;
use super::skier::SkierRepository;
use super::subscription::SubscriptionRepository;
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

// ── RepositoryProvider ──────────────────────────────────────────

/// Provides access to all domain repositories.
///
/// Accessors hand out shared handles so services can hold the stores
/// they need for their whole lifetime:
///
/// ```ignore
/// let skiers = repos.skiers();
/// let skier = skiers.find_by_id(1).await?;
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn skiers(&self) -> Arc<dyn SkierRepository>;
    fn pistes(&self) -> Arc<dyn PisteRepository>;
    fn courses(&self) -> Arc<dyn CourseRepository>;
    fn registrations(&self) -> Arc<dyn RegistrationRepository>;
    fn subscriptions(&self) -> Arc<dyn SubscriptionRepository>;
}
