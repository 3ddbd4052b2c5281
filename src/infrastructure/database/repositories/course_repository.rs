//! SeaORM implementation of CourseRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, EntityTrait, QueryOrder, Set,
};
use tracing::info;

use super::db_err;
use crate::domain::{Course, CourseRepository, DomainResult, Support, TypeCourse};
use crate::infrastructure::database::entities::course;

// ── Conversion helpers ──────────────────────────────────────────

fn entity_to_domain(m: course::Model) -> Course {
    Course {
        num_course: Some(m.num_course),
        level: m.level,
        type_course: match m.type_course {
            course::TypeCourse::CollectiveChildren => TypeCourse::CollectiveChildren,
            course::TypeCourse::CollectiveAdult => TypeCourse::CollectiveAdult,
            course::TypeCourse::Individual => TypeCourse::Individual,
        },
        support: match m.support {
            course::Support::Ski => Support::Ski,
            course::Support::Snowboard => Support::Snowboard,
        },
        price: m.price,
        time_slot: m.time_slot,
    }
}

fn type_to_entity(t: TypeCourse) -> course::TypeCourse {
    match t {
        TypeCourse::CollectiveChildren => course::TypeCourse::CollectiveChildren,
        TypeCourse::CollectiveAdult => course::TypeCourse::CollectiveAdult,
        TypeCourse::Individual => course::TypeCourse::Individual,
    }
}

fn support_to_entity(s: Support) -> course::Support {
    match s {
        Support::Ski => course::Support::Ski,
        Support::Snowboard => course::Support::Snowboard,
    }
}

// ── SeaOrmCourseRepository ──────────────────────────────────────

pub struct SeaOrmCourseRepository {
    db: DatabaseConnection,
}

impl SeaOrmCourseRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CourseRepository for SeaOrmCourseRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Course>> {
        let model = course::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(entity_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Course>> {
        let models = course::Entity::find()
            .order_by_asc(course::Column::NumCourse)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(entity_to_domain).collect())
    }

    async fn save(&self, c: Course) -> DomainResult<Course> {
        let existing = match c.num_course {
            Some(id) => course::Entity::find_by_id(id)
                .one(&self.db)
                .await
                .map_err(db_err)?,
            None => None,
        };

        let model = course::ActiveModel {
            num_course: c.num_course.map(Set).unwrap_or(NotSet),
            level: Set(c.level),
            type_course: Set(type_to_entity(c.type_course)),
            support: Set(support_to_entity(c.support)),
            price: Set(c.price),
            time_slot: Set(c.time_slot),
        };
        let saved = if existing.is_some() {
            model.update(&self.db).await.map_err(db_err)?
        } else {
            model.insert(&self.db).await.map_err(db_err)?
        };
        info!(
            "Course saved: {} level {} ({})",
            c.type_course.as_str(),
            saved.level,
            saved.num_course
        );
        Ok(entity_to_domain(saved))
    }

    async fn delete_by_id(&self, id: i64) -> DomainResult<()> {
        // registrations keep their row with course_id nulled (ON DELETE SET NULL)
        course::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
