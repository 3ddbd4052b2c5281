//! Reusable ski station runtime.
//!
//! Provides [`RuntimeHandle`] that encapsulates store selection, schema
//! bootstrap and service wiring, so the CLI (and tests) do not duplicate
//! bootstrap code.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::application::SkierService;
use crate::config::AppConfig;
use crate::domain::{
    Color, Course, DomainResult, Piste, RepositoryProvider, Subscription, SubscriptionType,
    Support, TypeCourse,
};
use crate::infrastructure::{
    create_schema, init_database, InMemoryRepositoryProvider, SeaOrmRepositoryProvider,
};
use crate::shared::errors::AppError;

// ── Logging ────────────────────────────────────────────────────────

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over `logging.level`. Output goes to stderr so command
/// results on stdout stay machine-readable. A second call is ignored.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    let result = if config.logging.is_json() {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };

    if result.is_err() {
        warn!("Tracing subscriber already installed");
    }
}

// ── RuntimeHandle ──────────────────────────────────────────────────

/// Handle to an initialised ski station.
///
/// # Examples
///
/// ```rust,no_run
/// use ski_station::config::AppConfig;
/// use ski_station::runtime::RuntimeHandle;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = RuntimeHandle::start(AppConfig::default()).await?;
///     let skiers = handle.service.retrieve_all_skiers().await?;
///     println!("{} skiers", skiers.len());
///     handle.shutdown().await;
///     Ok(())
/// }
/// ```
pub struct RuntimeHandle {
    /// Skier operations over the selected store.
    pub service: SkierService,
    /// Repository provider for direct data access.
    pub repos: Arc<dyn RepositoryProvider>,
    /// The configuration the runtime was started with.
    pub config: AppConfig,

    db: Option<DatabaseConnection>,
}

impl RuntimeHandle {
    /// Open the configured store and wire the service.
    ///
    /// For the sqlite backend this connects and creates missing tables.
    pub async fn start(config: AppConfig) -> Result<Self, AppError> {
        config.validate()?;

        let (repos, db): (Arc<dyn RepositoryProvider>, Option<DatabaseConnection>) =
            if config.database.is_memory() {
                info!("Using in-memory store");
                (Arc::new(InMemoryRepositoryProvider::new()), None)
            } else {
                let db = init_database(&config.database.to_database_config()).await?;
                create_schema(&db).await?;
                (Arc::new(SeaOrmRepositoryProvider::new(db.clone())), Some(db))
            };

        let service = SkierService::from_repositories(repos.as_ref());
        info!("Ski station runtime ready");

        Ok(Self {
            service,
            repos,
            config,
            db,
        })
    }

    /// Close the database connection, if any.
    pub async fn shutdown(self) {
        if let Some(db) = self.db {
            if let Err(e) = db.close().await {
                warn!("Error closing database connection: {}", e);
            } else {
                info!("Database connection closed");
            }
        }
    }
}

// ── Demo catalogue ─────────────────────────────────────────────────

/// Ids created by [`seed_catalogue`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct SeedSummary {
    pub pistes: Vec<i64>,
    pub courses: Vec<i64>,
    pub subscriptions: Vec<i64>,
}

/// Insert a small set of pistes, courses and subscriptions.
pub async fn seed_catalogue(repos: &dyn RepositoryProvider) -> DomainResult<SeedSummary> {
    let mut summary = SeedSummary::default();

    let pistes = [
        Piste::new("Bambi", Color::Green, 800, 8),
        Piste::new("Edelweiss", Color::Blue, 1500, 15),
        Piste::new("Chamois", Color::Red, 2100, 28),
        Piste::new("Face Nord", Color::Black, 2600, 45),
    ];
    for piste in pistes {
        let saved = repos.pistes().save(piste).await?;
        summary.pistes.extend(saved.num_piste);
    }

    let courses = [
        Course::new(1, TypeCourse::CollectiveChildren, Support::Ski, Decimal::new(12000, 2), 1),
        Course::new(2, TypeCourse::CollectiveAdult, Support::Snowboard, Decimal::new(15000, 2), 2),
        Course::new(3, TypeCourse::Individual, Support::Ski, Decimal::new(40000, 2), 3),
    ];
    for course in courses {
        let saved = repos.courses().save(course).await?;
        summary.courses.extend(saved.num_course);
    }

    let start = NaiveDate::from_ymd_opt(2024, 12, 1);
    let subscriptions = [
        (SubscriptionType::Monthly, Decimal::new(9000, 2)),
        (SubscriptionType::Semestriel, Decimal::new(45000, 2)),
        (SubscriptionType::Annual, Decimal::new(80000, 2)),
    ];
    for (type_sub, price) in subscriptions {
        let mut subscription = Subscription::new(type_sub, start, price);
        subscription.derive_end_date()?;
        let saved = repos.subscriptions().save(subscription).await?;
        summary.subscriptions.extend(saved.num_sub);
    }

    info!(
        "Seeded {} pistes, {} courses, {} subscriptions",
        summary.pistes.len(),
        summary.courses.len(),
        summary.subscriptions.len()
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Skier;

    fn memory_config() -> AppConfig {
        let mut cfg = AppConfig::default();
        cfg.database.backend = "memory".into();
        cfg
    }

    #[tokio::test]
    async fn memory_runtime_starts_empty() {
        let handle = RuntimeHandle::start(memory_config()).await.unwrap();
        assert!(handle.service.retrieve_all_skiers().await.unwrap().is_empty());
        handle.shutdown().await;
    }

    #[tokio::test]
    async fn invalid_config_is_rejected() {
        let mut cfg = memory_config();
        cfg.database.backend = "oracle".into();
        assert!(RuntimeHandle::start(cfg).await.is_err());
    }

    #[tokio::test]
    async fn seeded_catalogue_is_assignable() {
        let handle = RuntimeHandle::start(memory_config()).await.unwrap();
        let seed = seed_catalogue(handle.repos.as_ref()).await.unwrap();
        assert_eq!(seed.pistes.len(), 4);
        assert_eq!(seed.courses.len(), 3);
        assert_eq!(seed.subscriptions.len(), 3);

        let skier = handle
            .service
            .add_skier(Skier::new("Lena", "Moser", None, "Annecy"))
            .await
            .unwrap();
        let id = skier.num_skier.unwrap();

        let updated = handle
            .service
            .assign_skier_to_piste(id, seed.pistes[2])
            .await
            .unwrap();
        assert_eq!(updated.pistes.len(), 1);

        let updated = handle
            .service
            .assign_skier_to_subscription(id, seed.subscriptions[2])
            .await
            .unwrap();
        let sub = updated.subscription.unwrap();
        assert_eq!(sub.type_sub, SubscriptionType::Annual);
        assert_eq!(sub.end_date, NaiveDate::from_ymd_opt(2025, 12, 1));
    }
}
