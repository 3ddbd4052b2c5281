//! Subscription entity

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "subscriptions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub num_sub: i64,

    #[sea_orm(nullable)]
    pub start_date: Option<Date>,

    #[sea_orm(nullable)]
    pub end_date: Option<Date>,

    pub price: Decimal,

    /// Type tag: ANNUAL, SEMESTRIEL, MONTHLY (other tags are kept as-is)
    pub type_sub: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
