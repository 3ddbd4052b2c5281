//! Course entity

use sea_orm::entity::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(30))")]
pub enum TypeCourse {
    #[sea_orm(string_value = "COLLECTIVE_CHILDREN")]
    CollectiveChildren,
    #[sea_orm(string_value = "COLLECTIVE_ADULT")]
    CollectiveAdult,
    #[sea_orm(string_value = "INDIVIDUAL")]
    Individual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum Support {
    #[sea_orm(string_value = "SKI")]
    Ski,
    #[sea_orm(string_value = "SNOWBOARD")]
    Snowboard,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub num_course: i64,

    pub level: i32,
    pub type_course: TypeCourse,
    pub support: Support,
    pub price: Decimal,
    pub time_slot: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
