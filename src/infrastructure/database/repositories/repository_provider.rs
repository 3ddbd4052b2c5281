//! SeaORM implementation of RepositoryProvider

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::domain::{
    CourseRepository, PisteRepository, RegistrationRepository, RepositoryProvider,
    SkierRepository, SubscriptionRepository,
};

use super::course_repository::SeaOrmCourseRepository;
use super::piste_repository::SeaOrmPisteRepository;
use super::registration_repository::SeaOrmRegistrationRepository;
use super::skier_repository::SeaOrmSkierRepository;
use super::subscription_repository::SeaOrmSubscriptionRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let skier = repos.skiers().find_by_id(1).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    skiers: Arc<SeaOrmSkierRepository>,
    pistes: Arc<SeaOrmPisteRepository>,
    courses: Arc<SeaOrmCourseRepository>,
    registrations: Arc<SeaOrmRegistrationRepository>,
    subscriptions: Arc<SeaOrmSubscriptionRepository>,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            skiers: Arc::new(SeaOrmSkierRepository::new(db.clone())),
            pistes: Arc::new(SeaOrmPisteRepository::new(db.clone())),
            courses: Arc::new(SeaOrmCourseRepository::new(db.clone())),
            registrations: Arc::new(SeaOrmRegistrationRepository::new(db.clone())),
            subscriptions: Arc::new(SeaOrmSubscriptionRepository::new(db)),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn skiers(&self) -> Arc<dyn SkierRepository> {
        self.skiers.clone()
    }

    fn pistes(&self) -> Arc<dyn PisteRepository> {
        self.pistes.clone()
    }

    fn courses(&self) -> Arc<dyn CourseRepository> {
        self.courses.clone()
    }

    fn registrations(&self) -> Arc<dyn RegistrationRepository> {
        self.registrations.clone()
    }

    fn subscriptions(&self) -> Arc<dyn SubscriptionRepository> {
        self.subscriptions.clone()
    }
}
