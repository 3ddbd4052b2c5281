//! Skier entity

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "skiers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub num_skier: i64,

    pub first_name: String,
    pub last_name: String,

    #[sea_orm(nullable)]
    pub date_of_birth: Option<Date>,

    pub city: String,

    #[sea_orm(nullable)]
    pub subscription_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subscription::Entity",
        from = "Column::SubscriptionId",
        to = "super::subscription::Column::NumSub",
        on_delete = "SetNull"
    )]
    Subscription,
}

impl Related<super::subscription::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subscription.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
