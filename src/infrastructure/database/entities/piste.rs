//! Piste entity

use sea_orm::entity::prelude::*;

/// Piste colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum Color {
    #[sea_orm(string_value = "GREEN")]
    Green,
    #[sea_orm(string_value = "BLUE")]
    Blue,
    #[sea_orm(string_value = "RED")]
    Red,
    #[sea_orm(string_value = "BLACK")]
    Black,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "pistes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub num_piste: i64,

    pub name_piste: String,
    pub color: Color,

    /// Length in metres
    pub length: i32,

    /// Average slope in degrees
    pub slope: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
