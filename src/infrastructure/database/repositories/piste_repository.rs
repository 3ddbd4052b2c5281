//! SeaORM implementation of PisteRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, EntityTrait, QueryOrder, Set,
};
use tracing::info;

use super::db_err;
use crate::domain::{Color, DomainResult, Piste, PisteRepository};
use crate::infrastructure::database::entities::piste;

// ── Conversion helpers ──────────────────────────────────────────

pub(super) fn entity_to_domain(m: piste::Model) -> Piste {
    Piste {
        num_piste: Some(m.num_piste),
        name_piste: m.name_piste,
        color: match m.color {
            piste::Color::Green => Color::Green,
            piste::Color::Blue => Color::Blue,
            piste::Color::Red => Color::Red,
            piste::Color::Black => Color::Black,
        },
        length: m.length,
        slope: m.slope,
    }
}

fn color_to_entity(c: Color) -> piste::Color {
    match c {
        Color::Green => piste::Color::Green,
        Color::Blue => piste::Color::Blue,
        Color::Red => piste::Color::Red,
        Color::Black => piste::Color::Black,
    }
}

// ── SeaOrmPisteRepository ───────────────────────────────────────

pub struct SeaOrmPisteRepository {
    db: DatabaseConnection,
}

impl SeaOrmPisteRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PisteRepository for SeaOrmPisteRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Piste>> {
        let model = piste::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(entity_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Piste>> {
        let models = piste::Entity::find()
            .order_by_asc(piste::Column::NumPiste)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(entity_to_domain).collect())
    }

    async fn save(&self, p: Piste) -> DomainResult<Piste> {
        let existing = match p.num_piste {
            Some(id) => piste::Entity::find_by_id(id)
                .one(&self.db)
                .await
                .map_err(db_err)?,
            None => None,
        };

        let model = piste::ActiveModel {
            num_piste: p.num_piste.map(Set).unwrap_or(NotSet),
            name_piste: Set(p.name_piste),
            color: Set(color_to_entity(p.color)),
            length: Set(p.length),
            slope: Set(p.slope),
        };
        let saved = if existing.is_some() {
            model.update(&self.db).await.map_err(db_err)?
        } else {
            model.insert(&self.db).await.map_err(db_err)?
        };
        info!("Piste saved: {} ({})", saved.name_piste, saved.num_piste);
        Ok(entity_to_domain(saved))
    }

    async fn delete_by_id(&self, id: i64) -> DomainResult<()> {
        // skier_pistes rows go with it (ON DELETE CASCADE)
        piste::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
