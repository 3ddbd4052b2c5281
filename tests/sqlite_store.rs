//! SkierService against the SeaORM store on an in-memory SQLite database.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, EntityTrait};

use ski_station::domain::{
    Color, Course, DomainError, Piste, Registration, RepositoryProvider, Skier, Subscription,
    SubscriptionType, Support, TypeCourse,
};
use ski_station::infrastructure::database::entities::{registration, skier_piste, subscription};
use ski_station::{create_schema, init_database, DatabaseConfig, SeaOrmRepositoryProvider, SkierService};

struct Harness {
    db: DatabaseConnection,
    repos: SeaOrmRepositoryProvider,
    service: SkierService,
}

async fn harness() -> Harness {
    let db = init_database(&DatabaseConfig::memory()).await.unwrap();
    create_schema(&db).await.unwrap();
    let repos = SeaOrmRepositoryProvider::new(db.clone());
    let service = SkierService::from_repositories(&repos);
    Harness { db, repos, service }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn annual_skier() -> Skier {
    Skier::new("Lena", "Moser", Some(date(1998, 3, 4)), "Annecy").with_subscription(
        Subscription::new(
            SubscriptionType::Annual,
            Some(date(2024, 1, 15)),
            Decimal::new(80000, 2),
        ),
    )
}

#[tokio::test]
async fn schema_bootstrap_is_idempotent() {
    let h = harness().await;
    create_schema(&h.db).await.unwrap();
    assert!(h.service.retrieve_all_skiers().await.unwrap().is_empty());
}

#[tokio::test]
async fn add_skier_persists_subscription_with_end_date() {
    let h = harness().await;
    let saved = h.service.add_skier(annual_skier()).await.unwrap();
    let id = saved.num_skier.unwrap();

    let fetched = h.service.retrieve_skier(id).await.unwrap();
    assert_eq!(fetched.first_name, "Lena");
    assert_eq!(fetched.date_of_birth, Some(date(1998, 3, 4)));
    let sub = fetched.subscription.unwrap();
    assert_eq!(sub.type_sub, SubscriptionType::Annual);
    assert_eq!(sub.end_date, Some(date(2025, 1, 15)));
    assert_eq!(sub.price, Decimal::new(800, 0));
}

#[tokio::test]
async fn unknown_subscription_tag_survives_storage() {
    let h = harness().await;
    let skier = Skier::new("Tom", "Blanc", None, "Chamonix").with_subscription(
        Subscription::new(
            SubscriptionType::parse("WEEKLY"),
            Some(date(2024, 1, 15)),
            Decimal::ZERO,
        ),
    );
    let saved = h.service.add_skier(skier).await.unwrap();

    let fetched = h.service.retrieve_skier(saved.num_skier.unwrap()).await.unwrap();
    let sub = fetched.subscription.unwrap();
    assert_eq!(sub.type_sub, SubscriptionType::Unrecognized("WEEKLY".into()));
    assert_eq!(sub.end_date, None);
}

#[tokio::test]
async fn piste_assignment_is_a_set() {
    let h = harness().await;
    let skier = h.service.add_skier(annual_skier()).await.unwrap();
    let piste = h
        .repos
        .pistes()
        .save(Piste::new("Face Nord", Color::Black, 2600, 45))
        .await
        .unwrap();
    let (skier_id, piste_id) = (skier.num_skier.unwrap(), piste.num_piste.unwrap());

    h.service.assign_skier_to_piste(skier_id, piste_id).await.unwrap();
    h.service.assign_skier_to_piste(skier_id, piste_id).await.unwrap();

    let fetched = h.service.retrieve_skier(skier_id).await.unwrap();
    assert_eq!(fetched.pistes.len(), 1);
    assert!(fetched.has_piste(piste_id));

    let rows = skier_piste::Entity::find().all(&h.db).await.unwrap();
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn saving_skier_with_unsaved_piste_is_rejected() {
    let h = harness().await;
    let mut skier = annual_skier();
    skier.add_piste(Piste::new("Bambi", Color::Green, 800, 8));

    let err = h.service.add_skier(skier).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
    assert!(h.service.retrieve_all_skiers().await.unwrap().is_empty());
}

#[tokio::test]
async fn enroll_links_registrations_to_skier_and_course() {
    let h = harness().await;
    let course = h
        .repos
        .courses()
        .save(Course::new(
            1,
            TypeCourse::CollectiveChildren,
            Support::Ski,
            Decimal::new(12000, 2),
            1,
        ))
        .await
        .unwrap();
    let course_id = course.num_course.unwrap();

    let skier = Skier::new("Ana", "Roux", None, "Grenoble")
        .with_registrations(vec![Registration::new(3), Registration::new(4)]);
    let saved = h
        .service
        .add_skier_and_assign_to_course(skier, course_id)
        .await
        .unwrap();
    let skier_id = saved.num_skier.unwrap();

    let fetched = h.service.retrieve_skier(skier_id).await.unwrap();
    assert_eq!(fetched.registrations.len(), 2);
    assert!(fetched
        .registrations
        .iter()
        .all(|r| r.course_id == Some(course_id) && r.skier_id == Some(skier_id)));
}

#[tokio::test]
async fn remove_skier_cascades_and_detaches_registrations() {
    let h = harness().await;
    let course = h
        .repos
        .courses()
        .save(Course::new(
            3,
            TypeCourse::Individual,
            Support::Snowboard,
            Decimal::new(40000, 2),
            2,
        ))
        .await
        .unwrap();
    let piste = h
        .repos
        .pistes()
        .save(Piste::new("Chamois", Color::Red, 2100, 28))
        .await
        .unwrap();

    let skier = annual_skier().with_registrations(vec![Registration::new(1)]);
    let saved = h
        .service
        .add_skier_and_assign_to_course(skier, course.num_course.unwrap())
        .await
        .unwrap();
    let skier_id = saved.num_skier.unwrap();
    h.service
        .assign_skier_to_piste(skier_id, piste.num_piste.unwrap())
        .await
        .unwrap();

    h.service.remove_skier(skier_id).await.unwrap();

    assert!(h.service.retrieve_skier(skier_id).await.unwrap_err().is_not_found());
    assert!(subscription::Entity::find().all(&h.db).await.unwrap().is_empty());
    assert!(skier_piste::Entity::find().all(&h.db).await.unwrap().is_empty());

    let registrations = registration::Entity::find().all(&h.db).await.unwrap();
    assert_eq!(registrations.len(), 1);
    assert_eq!(registrations[0].skier_id, None);
    assert_eq!(registrations[0].course_id, course.num_course);

    // piste catalogue is untouched
    assert!(h.repos.pistes().find_by_id(piste.num_piste.unwrap()).await.unwrap().is_some());

    // second delete is a no-op
    h.service.remove_skier(skier_id).await.unwrap();
}

#[tokio::test]
async fn filter_by_subscription_type_uses_join() {
    let h = harness().await;
    h.service.add_skier(annual_skier()).await.unwrap();
    h.service
        .add_skier(Skier::new("Tom", "Blanc", None, "Chamonix").with_subscription(
            Subscription::new(SubscriptionType::Monthly, Some(date(2024, 1, 31)), Decimal::ONE),
        ))
        .await
        .unwrap();
    h.service
        .add_skier(Skier::new("Ana", "Roux", None, "Grenoble"))
        .await
        .unwrap();

    let monthly = h
        .service
        .retrieve_skiers_by_subscription_type(&SubscriptionType::Monthly)
        .await
        .unwrap();
    assert_eq!(monthly.len(), 1);
    assert_eq!(monthly[0].last_name, "Blanc");
    assert_eq!(
        monthly[0].subscription.as_ref().unwrap().end_date,
        Some(date(2024, 2, 29))
    );

    let semestriel = h
        .service
        .retrieve_skiers_by_subscription_type(&SubscriptionType::Semestriel)
        .await
        .unwrap();
    assert!(semestriel.is_empty());
}

#[tokio::test]
async fn assign_existing_subscription() {
    let h = harness().await;
    let skier = h
        .service
        .add_skier(Skier::new("Tom", "Blanc", None, "Chamonix"))
        .await
        .unwrap();
    let sub = h
        .repos
        .subscriptions()
        .save(Subscription::new(
            SubscriptionType::Semestriel,
            Some(date(2024, 9, 1)),
            Decimal::new(45000, 2),
        ))
        .await
        .unwrap();

    let updated = h
        .service
        .assign_skier_to_subscription(skier.num_skier.unwrap(), sub.num_sub.unwrap())
        .await
        .unwrap();
    assert_eq!(updated.subscription.as_ref().unwrap().num_sub, sub.num_sub);
    assert_eq!(subscription::Entity::find().all(&h.db).await.unwrap().len(), 1);

    let err = h
        .service
        .assign_skier_to_subscription(skier.num_skier.unwrap(), 999)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn removing_one_holder_keeps_shared_subscription() {
    let h = harness().await;
    let first = h.service.add_skier(annual_skier()).await.unwrap();
    let second = h
        .service
        .add_skier(Skier::new("Tom", "Blanc", None, "Chamonix"))
        .await
        .unwrap();
    let sub_id = first.subscription.as_ref().unwrap().num_sub.unwrap();

    h.service
        .assign_skier_to_subscription(second.num_skier.unwrap(), sub_id)
        .await
        .unwrap();
    h.service.remove_skier(first.num_skier.unwrap()).await.unwrap();

    let remaining = h.service.retrieve_skier(second.num_skier.unwrap()).await.unwrap();
    assert_eq!(remaining.subscription.and_then(|s| s.num_sub), Some(sub_id));
    assert_eq!(subscription::Entity::find().all(&h.db).await.unwrap().len(), 1);

    h.service.remove_skier(second.num_skier.unwrap()).await.unwrap();
    assert!(subscription::Entity::find().all(&h.db).await.unwrap().is_empty());
}
