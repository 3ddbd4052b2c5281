//! SeaORM implementation of SkierRepository
//!
//! A skier is spread over `skiers`, `subscriptions` (one-to-one, cascaded),
//! `skier_pistes` (membership set) and `registrations` (read-only here).

use std::collections::BTreeSet;

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
    TransactionTrait,
};
use tracing::{debug, info};

use super::{db_err, piste_repository, registration_repository, subscription_repository};
use crate::domain::{DomainError, DomainResult, Piste, Skier, SkierRepository, SubscriptionType};
use crate::infrastructure::database::entities::{
    piste, registration, skier, skier_piste, subscription,
};

// ── Loading ─────────────────────────────────────────────────────

async fn load_pistes<C: ConnectionTrait>(db: &C, skier_id: i64) -> DomainResult<BTreeSet<Piste>> {
    let piste_ids: Vec<i64> = skier_piste::Entity::find()
        .filter(skier_piste::Column::SkierId.eq(skier_id))
        .all(db)
        .await
        .map_err(db_err)?
        .into_iter()
        .map(|m| m.piste_id)
        .collect();

    if piste_ids.is_empty() {
        return Ok(BTreeSet::new());
    }

    let models = piste::Entity::find()
        .filter(piste::Column::NumPiste.is_in(piste_ids))
        .all(db)
        .await
        .map_err(db_err)?;
    Ok(models
        .into_iter()
        .map(piste_repository::entity_to_domain)
        .collect())
}

/// Materialise a skier row with its subscription, pistes and registrations.
async fn load<C: ConnectionTrait>(db: &C, m: skier::Model) -> DomainResult<Skier> {
    let subscription = match m.subscription_id {
        Some(id) => subscription::Entity::find_by_id(id)
            .one(db)
            .await
            .map_err(db_err)?
            .map(subscription_repository::entity_to_domain),
        None => None,
    };

    Ok(Skier {
        num_skier: Some(m.num_skier),
        first_name: m.first_name,
        last_name: m.last_name,
        date_of_birth: m.date_of_birth,
        city: m.city,
        subscription,
        pistes: load_pistes(db, m.num_skier).await?,
        registrations: registration_repository::find_for_skier(db, m.num_skier).await?,
    })
}

async fn load_all<C: ConnectionTrait>(db: &C, models: Vec<skier::Model>) -> DomainResult<Vec<Skier>> {
    let mut skiers = Vec::with_capacity(models.len());
    for m in models {
        skiers.push(load(db, m).await?);
    }
    Ok(skiers)
}

// ── SeaOrmSkierRepository ───────────────────────────────────────

pub struct SeaOrmSkierRepository {
    db: DatabaseConnection,
}

impl SeaOrmSkierRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SkierRepository for SeaOrmSkierRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Skier>> {
        let model = skier::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        match model {
            Some(m) => Ok(Some(load(&self.db, m).await?)),
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> DomainResult<Vec<Skier>> {
        let models = skier::Entity::find()
            .order_by_asc(skier::Column::NumSkier)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        load_all(&self.db, models).await
    }

    async fn save(&self, mut s: Skier) -> DomainResult<Skier> {
        let mut piste_ids = Vec::with_capacity(s.pistes.len());
        for p in &s.pistes {
            let id = p.num_piste.ok_or_else(|| {
                DomainError::Validation(format!(
                    "Piste '{}' must be saved before it is assigned",
                    p.name_piste
                ))
            })?;
            piste_ids.push(id);
        }

        let txn = self.db.begin().await.map_err(db_err)?;

        if let Some(sub) = s.subscription.take() {
            s.subscription = Some(subscription_repository::upsert(&txn, sub).await?);
        }
        let subscription_id = s.subscription.as_ref().and_then(|sub| sub.num_sub);

        let existing = match s.num_skier {
            Some(id) => skier::Entity::find_by_id(id)
                .one(&txn)
                .await
                .map_err(db_err)?,
            None => None,
        };

        let model = skier::ActiveModel {
            num_skier: s.num_skier.map(Set).unwrap_or(NotSet),
            first_name: Set(s.first_name.clone()),
            last_name: Set(s.last_name.clone()),
            date_of_birth: Set(s.date_of_birth),
            city: Set(s.city.clone()),
            subscription_id: Set(subscription_id),
        };
        let saved = if existing.is_some() {
            model.update(&txn).await.map_err(db_err)?
        } else {
            model.insert(&txn).await.map_err(db_err)?
        };
        let skier_id = saved.num_skier;

        skier_piste::Entity::delete_many()
            .filter(skier_piste::Column::SkierId.eq(skier_id))
            .exec(&txn)
            .await
            .map_err(db_err)?;
        if !piste_ids.is_empty() {
            let rows = piste_ids.iter().map(|&piste_id| skier_piste::ActiveModel {
                skier_id: Set(skier_id),
                piste_id: Set(piste_id),
            });
            skier_piste::Entity::insert_many(rows)
                .exec_without_returning(&txn)
                .await
                .map_err(db_err)?;
        }

        txn.commit().await.map_err(db_err)?;

        info!("Skier saved: {} ({})", s.full_name(), skier_id);
        s.num_skier = Some(skier_id);
        Ok(s)
    }

    async fn delete_by_id(&self, id: i64) -> DomainResult<()> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let Some(existing) = skier::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(db_err)?
        else {
            debug!("Skier {} not found, nothing to delete", id);
            return Ok(());
        };

        registration::Entity::update_many()
            .col_expr(registration::Column::SkierId, Expr::value(Option::<i64>::None))
            .filter(registration::Column::SkierId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err)?;
        skier_piste::Entity::delete_many()
            .filter(skier_piste::Column::SkierId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err)?;
        skier::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(db_err)?;
        if let Some(sub_id) = existing.subscription_id {
            let holders = skier::Entity::find()
                .filter(skier::Column::SubscriptionId.eq(sub_id))
                .count(&txn)
                .await
                .map_err(db_err)?;
            if holders == 0 {
                subscription::Entity::delete_by_id(sub_id)
                    .exec(&txn)
                    .await
                    .map_err(db_err)?;
            } else {
                debug!("Subscription {} still held by {} skier(s), kept", sub_id, holders);
            }
        }

        txn.commit().await.map_err(db_err)?;
        info!("Skier deleted: {}", id);
        Ok(())
    }

    async fn find_by_subscription_type(
        &self,
        type_sub: &SubscriptionType,
    ) -> DomainResult<Vec<Skier>> {
        let models = skier::Entity::find()
            .join(JoinType::InnerJoin, skier::Relation::Subscription.def())
            .filter(subscription::Column::TypeSub.eq(type_sub.as_str()))
            .order_by_asc(skier::Column::NumSkier)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        load_all(&self.db, models).await
    }
}
