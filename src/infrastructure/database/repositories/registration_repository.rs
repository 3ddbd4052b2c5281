//! SeaORM implementation of RegistrationRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::debug;

use super::db_err;
use crate::domain::{DomainResult, Registration, RegistrationRepository};
use crate::infrastructure::database::entities::registration;

// ── Conversion helpers ──────────────────────────────────────────

fn entity_to_domain(m: registration::Model) -> Registration {
    Registration {
        num_registration: Some(m.num_registration),
        num_week: m.num_week,
        skier_id: m.skier_id,
        course_id: m.course_id,
    }
}

/// Registrations currently pointing at `skier_id`, oldest first.
pub(super) async fn find_for_skier<C: ConnectionTrait>(
    db: &C,
    skier_id: i64,
) -> DomainResult<Vec<Registration>> {
    let models = registration::Entity::find()
        .filter(registration::Column::SkierId.eq(skier_id))
        .order_by_asc(registration::Column::NumRegistration)
        .all(db)
        .await
        .map_err(db_err)?;
    Ok(models.into_iter().map(entity_to_domain).collect())
}

// ── SeaOrmRegistrationRepository ────────────────────────────────

pub struct SeaOrmRegistrationRepository {
    db: DatabaseConnection,
}

impl SeaOrmRegistrationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RegistrationRepository for SeaOrmRegistrationRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Registration>> {
        let model = registration::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(entity_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Registration>> {
        let models = registration::Entity::find()
            .order_by_asc(registration::Column::NumRegistration)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(entity_to_domain).collect())
    }

    async fn save(&self, r: Registration) -> DomainResult<Registration> {
        let existing = match r.num_registration {
            Some(id) => registration::Entity::find_by_id(id)
                .one(&self.db)
                .await
                .map_err(db_err)?,
            None => None,
        };

        let model = registration::ActiveModel {
            num_registration: r.num_registration.map(Set).unwrap_or(NotSet),
            num_week: Set(r.num_week),
            skier_id: Set(r.skier_id),
            course_id: Set(r.course_id),
        };
        let saved = if existing.is_some() {
            model.update(&self.db).await.map_err(db_err)?
        } else {
            model.insert(&self.db).await.map_err(db_err)?
        };
        debug!(
            "Registration {} saved (skier={:?}, course={:?})",
            saved.num_registration, saved.skier_id, saved.course_id
        );
        Ok(entity_to_domain(saved))
    }

    async fn delete_by_id(&self, id: i64) -> DomainResult<()> {
        registration::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
