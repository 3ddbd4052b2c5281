//! SeaORM implementation of SubscriptionRepository

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::debug;

use super::db_err;
use crate::domain::{DomainResult, Subscription, SubscriptionRepository, SubscriptionType};
use crate::infrastructure::database::entities::{skier, subscription};

// ── Conversion helpers ──────────────────────────────────────────

pub(super) fn entity_to_domain(m: subscription::Model) -> Subscription {
    Subscription {
        num_sub: Some(m.num_sub),
        start_date: m.start_date,
        end_date: m.end_date,
        price: m.price,
        type_sub: SubscriptionType::parse(&m.type_sub),
    }
}

/// Insert or update a subscription row, returning it with its id.
///
/// Shared with the skier repository, which cascades subscriptions on save.
pub(super) async fn upsert<C: ConnectionTrait>(
    db: &C,
    s: Subscription,
) -> DomainResult<Subscription> {
    let existing = match s.num_sub {
        Some(id) => subscription::Entity::find_by_id(id)
            .one(db)
            .await
            .map_err(db_err)?,
        None => None,
    };

    let model = subscription::ActiveModel {
        num_sub: s.num_sub.map(Set).unwrap_or(NotSet),
        start_date: Set(s.start_date),
        end_date: Set(s.end_date),
        price: Set(s.price),
        type_sub: Set(s.type_sub.as_str().to_string()),
    };

    let saved = if existing.is_some() {
        model.update(db).await.map_err(db_err)?
    } else {
        model.insert(db).await.map_err(db_err)?
    };
    debug!("Subscription saved: {} ({})", saved.type_sub, saved.num_sub);
    Ok(entity_to_domain(saved))
}

// ── SeaOrmSubscriptionRepository ────────────────────────────────

pub struct SeaOrmSubscriptionRepository {
    db: DatabaseConnection,
}

impl SeaOrmSubscriptionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SubscriptionRepository for SeaOrmSubscriptionRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Subscription>> {
        let model = subscription::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(entity_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Subscription>> {
        let models = subscription::Entity::find()
            .order_by_asc(subscription::Column::NumSub)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(entity_to_domain).collect())
    }

    async fn save(&self, s: Subscription) -> DomainResult<Subscription> {
        upsert(&self.db, s).await
    }

    async fn delete_by_id(&self, id: i64) -> DomainResult<()> {
        // Skiers holding this subscription lose it rather than blocking the delete.
        skier::Entity::update_many()
            .col_expr(skier::Column::SubscriptionId, Expr::value(Option::<i64>::None))
            .filter(skier::Column::SubscriptionId.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        subscription::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
