//! Registration entity - enrolment of a skier in a course

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "registrations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub num_registration: i64,

    pub num_week: i32,

    #[sea_orm(nullable)]
    pub skier_id: Option<i64>,

    #[sea_orm(nullable)]
    pub course_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::skier::Entity",
        from = "Column::SkierId",
        to = "super::skier::Column::NumSkier",
        on_delete = "SetNull"
    )]
    Skier,
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::NumCourse",
        on_delete = "SetNull"
    )]
    Course,
}

impl Related<super::skier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Skier.def()
    }
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
