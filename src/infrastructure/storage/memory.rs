//! In-memory storage implementation
//!
//! Rows are kept in relational shape (skiers reference their subscription
//! and pistes by id, registrations reference their skier) and are
//! materialised into domain values on read, so the cascade rules match the
//! SeaORM store.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use crate::domain::{
    Course, CourseRepository, DomainError, DomainResult, Piste, PisteRepository, Registration,
    RegistrationRepository, RepositoryProvider, Skier, SkierRepository, Subscription,
    SubscriptionRepository, SubscriptionType,
};

// ── Tables ──────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct SkierRow {
    skier: Skier,
    subscription_id: Option<i64>,
    piste_ids: BTreeSet<i64>,
}

struct Tables {
    skiers: DashMap<i64, SkierRow>,
    subscriptions: DashMap<i64, Subscription>,
    pistes: DashMap<i64, Piste>,
    courses: DashMap<i64, Course>,
    registrations: DashMap<i64, Registration>,
    skier_seq: AtomicI64,
    subscription_seq: AtomicI64,
    piste_seq: AtomicI64,
    course_seq: AtomicI64,
    registration_seq: AtomicI64,
}

impl Tables {
    fn new() -> Self {
        Self {
            skiers: DashMap::new(),
            subscriptions: DashMap::new(),
            pistes: DashMap::new(),
            courses: DashMap::new(),
            registrations: DashMap::new(),
            skier_seq: AtomicI64::new(1),
            subscription_seq: AtomicI64::new(1),
            piste_seq: AtomicI64::new(1),
            course_seq: AtomicI64::new(1),
            registration_seq: AtomicI64::new(1),
        }
    }

    /// Use the caller's id if present, keeping the sequence ahead of it.
    fn assign_id(seq: &AtomicI64, id: Option<i64>) -> i64 {
        match id {
            Some(id) => {
                seq.fetch_max(id.saturating_add(1), Ordering::SeqCst);
                id
            }
            None => seq.fetch_add(1, Ordering::SeqCst),
        }
    }

    fn save_subscription(&self, mut subscription: Subscription) -> Subscription {
        let id = Self::assign_id(&self.subscription_seq, subscription.num_sub);
        subscription.num_sub = Some(id);
        self.subscriptions.insert(id, subscription.clone());
        subscription
    }

    fn materialise(&self, row: &SkierRow) -> Skier {
        let mut skier = row.skier.clone();
        skier.subscription = row
            .subscription_id
            .and_then(|id| self.subscriptions.get(&id).map(|s| s.clone()));
        skier.pistes = row
            .piste_ids
            .iter()
            .filter_map(|id| self.pistes.get(id).map(|p| p.clone()))
            .collect();

        let mut registrations: Vec<Registration> = self
            .registrations
            .iter()
            .filter(|r| r.skier_id.is_some() && r.skier_id == skier.num_skier)
            .map(|r| r.value().clone())
            .collect();
        registrations.sort_by_key(|r| r.num_registration);
        skier.registrations = registrations;
        skier
    }

    fn all_skiers(&self) -> Vec<Skier> {
        let rows: Vec<SkierRow> = self.skiers.iter().map(|e| e.value().clone()).collect();
        let mut skiers: Vec<Skier> = rows.iter().map(|row| self.materialise(row)).collect();
        skiers.sort_by_key(|s| s.num_skier);
        skiers
    }
}

// ── Repositories ────────────────────────────────────────────────

pub struct InMemorySkierRepository {
    tables: Arc<Tables>,
}

#[async_trait]
impl SkierRepository for InMemorySkierRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Skier>> {
        let row = self.tables.skiers.get(&id).map(|r| r.clone());
        Ok(row.map(|row| self.tables.materialise(&row)))
    }

    async fn find_all(&self) -> DomainResult<Vec<Skier>> {
        Ok(self.tables.all_skiers())
    }

    async fn save(&self, mut skier: Skier) -> DomainResult<Skier> {
        let mut piste_ids = BTreeSet::new();
        for piste in &skier.pistes {
            let id = piste.num_piste.ok_or_else(|| {
                DomainError::Validation(format!(
                    "Piste '{}' must be saved before it is assigned",
                    piste.name_piste
                ))
            })?;
            piste_ids.insert(id);
        }

        let id = Tables::assign_id(&self.tables.skier_seq, skier.num_skier);
        skier.num_skier = Some(id);

        let subscription_id = match skier.subscription.take() {
            Some(subscription) => {
                let saved = self.tables.save_subscription(subscription);
                let sub_id = saved.num_sub;
                skier.subscription = Some(saved);
                sub_id
            }
            None => None,
        };

        let mut stored = skier.clone();
        stored.subscription = None;
        stored.pistes.clear();
        stored.registrations.clear();
        self.tables.skiers.insert(
            id,
            SkierRow {
                skier: stored,
                subscription_id,
                piste_ids,
            },
        );

        debug!("Skier {} stored in memory", id);
        Ok(skier)
    }

    async fn delete_by_id(&self, id: i64) -> DomainResult<()> {
        let Some((_, row)) = self.tables.skiers.remove(&id) else {
            return Ok(());
        };
        if let Some(sub_id) = row.subscription_id {
            let shared = self
                .tables
                .skiers
                .iter()
                .any(|other| other.subscription_id == Some(sub_id));
            if shared {
                debug!("Subscription {} still held by another skier, kept", sub_id);
            } else {
                self.tables.subscriptions.remove(&sub_id);
            }
        }
        for mut registration in self.tables.registrations.iter_mut() {
            if registration.skier_id == Some(id) {
                registration.skier_id = None;
            }
        }
        Ok(())
    }

    async fn find_by_subscription_type(
        &self,
        type_sub: &SubscriptionType,
    ) -> DomainResult<Vec<Skier>> {
        Ok(self
            .tables
            .all_skiers()
            .into_iter()
            .filter(|s| {
                s.subscription
                    .as_ref()
                    .is_some_and(|sub| &sub.type_sub == type_sub)
            })
            .collect())
    }
}

pub struct InMemorySubscriptionRepository {
    tables: Arc<Tables>,
}

#[async_trait]
impl SubscriptionRepository for InMemorySubscriptionRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Subscription>> {
        Ok(self.tables.subscriptions.get(&id).map(|s| s.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<Subscription>> {
        let mut all: Vec<Subscription> = self
            .tables
            .subscriptions
            .iter()
            .map(|e| e.value().clone())
            .collect();
        all.sort_by_key(|s| s.num_sub);
        Ok(all)
    }

    async fn save(&self, subscription: Subscription) -> DomainResult<Subscription> {
        Ok(self.tables.save_subscription(subscription))
    }

    async fn delete_by_id(&self, id: i64) -> DomainResult<()> {
        self.tables.subscriptions.remove(&id);
        for mut row in self.tables.skiers.iter_mut() {
            if row.subscription_id == Some(id) {
                row.subscription_id = None;
            }
        }
        Ok(())
    }
}

pub struct InMemoryPisteRepository {
    tables: Arc<Tables>,
}

#[async_trait]
impl PisteRepository for InMemoryPisteRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Piste>> {
        Ok(self.tables.pistes.get(&id).map(|p| p.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<Piste>> {
        let mut all: Vec<Piste> = self.tables.pistes.iter().map(|e| e.value().clone()).collect();
        all.sort();
        Ok(all)
    }

    async fn save(&self, mut piste: Piste) -> DomainResult<Piste> {
        let id = Tables::assign_id(&self.tables.piste_seq, piste.num_piste);
        piste.num_piste = Some(id);
        self.tables.pistes.insert(id, piste.clone());
        Ok(piste)
    }

    async fn delete_by_id(&self, id: i64) -> DomainResult<()> {
        self.tables.pistes.remove(&id);
        for mut row in self.tables.skiers.iter_mut() {
            row.piste_ids.remove(&id);
        }
        Ok(())
    }
}

pub struct InMemoryCourseRepository {
    tables: Arc<Tables>,
}

#[async_trait]
impl CourseRepository for InMemoryCourseRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Course>> {
        Ok(self.tables.courses.get(&id).map(|c| c.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<Course>> {
        let mut all: Vec<Course> = self.tables.courses.iter().map(|e| e.value().clone()).collect();
        all.sort_by_key(|c| c.num_course);
        Ok(all)
    }

    async fn save(&self, mut course: Course) -> DomainResult<Course> {
        let id = Tables::assign_id(&self.tables.course_seq, course.num_course);
        course.num_course = Some(id);
        self.tables.courses.insert(id, course.clone());
        Ok(course)
    }

    async fn delete_by_id(&self, id: i64) -> DomainResult<()> {
        self.tables.courses.remove(&id);
        for mut registration in self.tables.registrations.iter_mut() {
            if registration.course_id == Some(id) {
                registration.course_id = None;
            }
        }
        Ok(())
    }
}

pub struct InMemoryRegistrationRepository {
    tables: Arc<Tables>,
}

#[async_trait]
impl RegistrationRepository for InMemoryRegistrationRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Registration>> {
        Ok(self.tables.registrations.get(&id).map(|r| r.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<Registration>> {
        let mut all: Vec<Registration> = self
            .tables
            .registrations
            .iter()
            .map(|e| e.value().clone())
            .collect();
        all.sort_by_key(|r| r.num_registration);
        Ok(all)
    }

    async fn save(&self, mut registration: Registration) -> DomainResult<Registration> {
        let id = Tables::assign_id(&self.tables.registration_seq, registration.num_registration);
        registration.num_registration = Some(id);
        self.tables.registrations.insert(id, registration.clone());
        Ok(registration)
    }

    async fn delete_by_id(&self, id: i64) -> DomainResult<()> {
        self.tables.registrations.remove(&id);
        Ok(())
    }
}

// ── Provider ────────────────────────────────────────────────────

/// In-memory storage for development and testing
pub struct InMemoryRepositoryProvider {
    skiers: Arc<InMemorySkierRepository>,
    pistes: Arc<InMemoryPisteRepository>,
    courses: Arc<InMemoryCourseRepository>,
    registrations: Arc<InMemoryRegistrationRepository>,
    subscriptions: Arc<InMemorySubscriptionRepository>,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        let tables = Arc::new(Tables::new());
        Self {
            skiers: Arc::new(InMemorySkierRepository {
                tables: tables.clone(),
            }),
            pistes: Arc::new(InMemoryPisteRepository {
                tables: tables.clone(),
            }),
            courses: Arc::new(InMemoryCourseRepository {
                tables: tables.clone(),
            }),
            registrations: Arc::new(InMemoryRegistrationRepository {
                tables: tables.clone(),
            }),
            subscriptions: Arc::new(InMemorySubscriptionRepository { tables }),
        }
    }
}

impl Default for InMemoryRepositoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Color;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn annual() -> Subscription {
        Subscription::new(
            SubscriptionType::Annual,
            NaiveDate::from_ymd_opt(2024, 1, 15),
            Decimal::new(90000, 2),
        )
    }

    #[tokio::test]
    async fn save_assigns_ids_and_cascades_subscription() {
        let repos = InMemoryRepositoryProvider::new();
        let saved = repos
            .skiers()
            .save(Skier::new("Ana", "Ben", None, "Tunis").with_subscription(annual()))
            .await
            .unwrap();

        let id = saved.num_skier.unwrap();
        let sub_id = saved.subscription.as_ref().unwrap().num_sub.unwrap();
        assert!(repos.subscriptions().find_by_id(sub_id).await.unwrap().is_some());

        let loaded = repos.skiers().find_by_id(id).await.unwrap().unwrap();
        assert_eq!(loaded.subscription, saved.subscription);
    }

    #[tokio::test]
    async fn registrations_are_loaded_by_skier_reference() {
        let repos = InMemoryRepositoryProvider::new();
        let skier = repos
            .skiers()
            .save(Skier::new("Ana", "Ben", None, "Tunis"))
            .await
            .unwrap();
        let id = skier.num_skier.unwrap();

        let mut r = Registration::new(2);
        r.assign(id, 5);
        repos.registrations().save(r).await.unwrap();
        repos.registrations().save(Registration::new(3)).await.unwrap();

        let loaded = repos.skiers().find_by_id(id).await.unwrap().unwrap();
        assert_eq!(loaded.registrations.len(), 1);
        assert_eq!(loaded.registrations[0].num_week, 2);
    }

    #[tokio::test]
    async fn delete_cascades_and_detaches() {
        let repos = InMemoryRepositoryProvider::new();
        let skier = repos
            .skiers()
            .save(Skier::new("Ana", "Ben", None, "Tunis").with_subscription(annual()))
            .await
            .unwrap();
        let id = skier.num_skier.unwrap();
        let sub_id = skier.subscription.unwrap().num_sub.unwrap();

        let mut r = Registration::new(2);
        r.assign(id, 5);
        let r = repos.registrations().save(r).await.unwrap();

        repos.skiers().delete_by_id(id).await.unwrap();
        assert!(repos.skiers().find_by_id(id).await.unwrap().is_none());
        assert!(repos.subscriptions().find_by_id(sub_id).await.unwrap().is_none());
        let r = repos
            .registrations()
            .find_by_id(r.num_registration.unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(r.skier_id, None);

        // unknown id is a no-op
        repos.skiers().delete_by_id(999).await.unwrap();
    }

    #[tokio::test]
    async fn unsaved_piste_is_rejected() {
        let repos = InMemoryRepositoryProvider::new();
        let mut skier = Skier::new("Ana", "Ben", None, "Tunis");
        skier.add_piste(Piste::new("Draft", Color::Green, 100, 5));
        let err = repos.skiers().save(skier).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn delete_keeps_subscription_held_by_another_skier() {
        let repos = InMemoryRepositoryProvider::new();
        let first = repos
            .skiers()
            .save(Skier::new("Ana", "Ben", None, "Tunis").with_subscription(annual()))
            .await
            .unwrap();
        let shared = first.subscription.clone().unwrap();
        let second = repos
            .skiers()
            .save(Skier::new("Sami", "Ben", None, "Tunis").with_subscription(shared.clone()))
            .await
            .unwrap();

        repos.skiers().delete_by_id(first.num_skier.unwrap()).await.unwrap();

        let sub_id = shared.num_sub.unwrap();
        assert!(repos.subscriptions().find_by_id(sub_id).await.unwrap().is_some());
        let loaded = repos
            .skiers()
            .find_by_id(second.num_skier.unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.subscription.and_then(|s| s.num_sub), Some(sub_id));

        // last holder gone, subscription goes with it
        repos.skiers().delete_by_id(second.num_skier.unwrap()).await.unwrap();
        assert!(repos.subscriptions().find_by_id(sub_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn caller_supplied_max_id_does_not_overflow() {
        let repos = InMemoryRepositoryProvider::new();
        let mut skier = Skier::new("Ana", "Ben", None, "Tunis");
        skier.num_skier = Some(i64::MAX);

        let saved = repos.skiers().save(skier).await.unwrap();
        assert_eq!(saved.num_skier, Some(i64::MAX));
        assert!(repos.skiers().find_by_id(i64::MAX).await.unwrap().is_some());
    }
}
