//! Skier ↔ piste membership (many-to-many join table)

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "skier_pistes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub skier_id: i64,

    #[sea_orm(primary_key, auto_increment = false)]
    pub piste_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::skier::Entity",
        from = "Column::SkierId",
        to = "super::skier::Column::NumSkier",
        on_delete = "Cascade"
    )]
    Skier,
    #[sea_orm(
        belongs_to = "super::piste::Entity",
        from = "Column::PisteId",
        to = "super::piste::Column::NumPiste",
        on_delete = "Cascade"
    )]
    Piste,
}

impl Related<super::skier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Skier.def()
    }
}

impl Related<super::piste::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Piste.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
