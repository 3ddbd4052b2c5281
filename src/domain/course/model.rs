//! Course domain entity

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeCourse {
    CollectiveChildren,
    CollectiveAdult,
    Individual,
}

impl TypeCourse {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CollectiveChildren => "COLLECTIVE_CHILDREN",
            Self::CollectiveAdult => "COLLECTIVE_ADULT",
            Self::Individual => "INDIVIDUAL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Support {
    Ski,
    Snowboard,
}

impl Support {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ski => "SKI",
            Self::Snowboard => "SNOWBOARD",
        }
    }
}

/// A lesson a skier can enrol in through a registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    #[serde(default)]
    pub num_course: Option<i64>,
    pub level: i32,
    pub type_course: TypeCourse,
    pub support: Support,
    #[serde(default)]
    pub price: Decimal,
    /// Weekly time slot number
    pub time_slot: i32,
}

impl Course {
    pub fn new(
        level: i32,
        type_course: TypeCourse,
        support: Support,
        price: Decimal,
        time_slot: i32,
    ) -> Self {
        Self {
            num_course: None,
            level,
            type_course,
            support,
            price,
            time_slot,
        }
    }
}
