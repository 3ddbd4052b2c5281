//! Skier management service
//!
//! Orchestrates reads, writes and association updates between a skier and
//! its subscription, pistes and course registrations.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{
    CourseRepository, DomainError, DomainResult, EndDateDerivation, PisteRepository,
    RegistrationRepository, RepositoryProvider, Skier, SkierRepository, SubscriptionRepository,
    SubscriptionType,
};

/// Service for skier business operations
pub struct SkierService {
    skiers: Arc<dyn SkierRepository>,
    pistes: Arc<dyn PisteRepository>,
    courses: Arc<dyn CourseRepository>,
    registrations: Arc<dyn RegistrationRepository>,
    subscriptions: Arc<dyn SubscriptionRepository>,
}

impl SkierService {
    pub fn new(
        skiers: Arc<dyn SkierRepository>,
        pistes: Arc<dyn PisteRepository>,
        courses: Arc<dyn CourseRepository>,
        registrations: Arc<dyn RegistrationRepository>,
        subscriptions: Arc<dyn SubscriptionRepository>,
    ) -> Self {
        Self {
            skiers,
            pistes,
            courses,
            registrations,
            subscriptions,
        }
    }

    pub fn from_repositories(repos: &dyn RepositoryProvider) -> Self {
        Self::new(
            repos.skiers(),
            repos.pistes(),
            repos.courses(),
            repos.registrations(),
            repos.subscriptions(),
        )
    }

    /// List every persisted skier
    pub async fn retrieve_all_skiers(&self) -> DomainResult<Vec<Skier>> {
        info!("Retrieving all skiers");
        self.skiers.find_all().await
    }

    /// Persist a new skier, deriving its subscription end date first.
    pub async fn add_skier(&self, mut skier: Skier) -> DomainResult<Skier> {
        info!("Adding new skier: {}", skier.full_name());

        if let Some(subscription) = skier.subscription.as_mut() {
            match subscription.derive_end_date()? {
                EndDateDerivation::Derived(end) => {
                    info!(
                        "Subscription {} valid until {}",
                        subscription.type_sub, end
                    );
                }
                EndDateDerivation::UnhandledType(tag) => {
                    warn!("Unknown subscription type: {}", tag);
                }
                EndDateDerivation::MissingStartDate => {}
            }
        }

        self.skiers.save(skier).await
    }

    /// Attach an existing subscription to an existing skier.
    pub async fn assign_skier_to_subscription(
        &self,
        num_skier: i64,
        num_subscription: i64,
    ) -> DomainResult<Skier> {
        info!(
            "Assigning skier with ID {} to subscription {}",
            num_skier, num_subscription
        );

        let skier = self.skiers.find_by_id(num_skier).await?;
        let subscription = self.subscriptions.find_by_id(num_subscription).await?;

        match (skier, subscription) {
            (Some(mut skier), Some(subscription)) => {
                skier.subscription = Some(subscription);
                self.skiers.save(skier).await
            }
            (skier, _) => {
                warn!(
                    "Skier or Subscription not found for IDs {}, {}",
                    num_skier, num_subscription
                );
                if skier.is_none() {
                    Err(DomainError::not_found_id("Skier", num_skier))
                } else {
                    Err(DomainError::not_found_id("Subscription", num_subscription))
                }
            }
        }
    }

    /// Persist a skier, then point each of its registrations at the course.
    ///
    /// A missing course is not an error: the saved skier is returned with
    /// its registrations untouched.
    pub async fn add_skier_and_assign_to_course(
        &self,
        skier: Skier,
        num_course: i64,
    ) -> DomainResult<Skier> {
        info!("Adding skier and assigning to course {}", num_course);

        let mut saved = self.skiers.save(skier).await?;

        let Some(course) = self.courses.find_by_id(num_course).await? else {
            warn!("Course not found for ID {}", num_course);
            return Ok(saved);
        };

        let skier_id = saved.num_skier.ok_or_else(|| {
            DomainError::Storage("Saved skier has no identifier".to_string())
        })?;
        let course_id = course.num_course.unwrap_or(num_course);

        let pending = std::mem::take(&mut saved.registrations);
        let mut assigned = Vec::with_capacity(pending.len());
        for mut registration in pending {
            registration.assign(skier_id, course_id);
            assigned.push(self.registrations.save(registration).await?);
        }
        saved.registrations = assigned;

        Ok(saved)
    }

    /// Delete a skier by id. Unknown ids are left to the store.
    pub async fn remove_skier(&self, num_skier: i64) -> DomainResult<()> {
        info!("Removing skier with ID {}", num_skier);
        self.skiers.delete_by_id(num_skier).await
    }

    pub async fn retrieve_skier(&self, num_skier: i64) -> DomainResult<Skier> {
        info!("Retrieving skier with ID {}", num_skier);
        self.skiers
            .find_by_id(num_skier)
            .await?
            .ok_or_else(|| DomainError::not_found_id("Skier", num_skier))
    }

    /// Add a piste to a skier's piste set. Assigning twice is a no-op on the set.
    pub async fn assign_skier_to_piste(
        &self,
        num_skier: i64,
        num_piste: i64,
    ) -> DomainResult<Skier> {
        info!("Assigning skier {} to piste {}", num_skier, num_piste);

        let skier = self.skiers.find_by_id(num_skier).await?;
        let piste = self.pistes.find_by_id(num_piste).await?;

        match (skier, piste) {
            (Some(mut skier), Some(piste)) => {
                skier.add_piste(piste);
                self.skiers.save(skier).await
            }
            (skier, _) => {
                warn!(
                    "Skier or Piste not found for IDs {}, {}",
                    num_skier, num_piste
                );
                if skier.is_none() {
                    Err(DomainError::not_found_id("Skier", num_skier))
                } else {
                    Err(DomainError::not_found_id("Piste", num_piste))
                }
            }
        }
    }

    pub async fn retrieve_skiers_by_subscription_type(
        &self,
        type_sub: &SubscriptionType,
    ) -> DomainResult<Vec<Skier>> {
        info!("Retrieving skiers by subscription type: {}", type_sub);
        self.skiers.find_by_subscription_type(type_sub).await
    }
}

// ── Tests ──────────────────────────────────────────────────────
