//! Registration domain entity

use serde::{Deserialize, Serialize};

/// Enrolment of one skier in one course for a given week.
///
/// The skier and course are referenced by id; both are set together by
/// [`Registration::assign`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    #[serde(default)]
    pub num_registration: Option<i64>,
    pub num_week: i32,
    #[serde(default)]
    pub skier_id: Option<i64>,
    #[serde(default)]
    pub course_id: Option<i64>,
}

impl Registration {
    pub fn new(num_week: i32) -> Self {
        Self {
            num_registration: None,
            num_week,
            skier_id: None,
            course_id: None,
        }
    }

    pub fn assign(&mut self, skier_id: i64, course_id: i64) {
        self.skier_id = Some(skier_id);
        self.course_id = Some(course_id);
    }

    pub fn is_assigned(&self) -> bool {
        self.skier_id.is_some() && self.course_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assign_sets_both_references() {
        let mut r = Registration::new(3);
        assert!(!r.is_assigned());
        r.assign(1, 9);
        assert!(r.is_assigned());
        assert_eq!(r.skier_id, Some(1));
        assert_eq!(r.course_id, Some(9));
    }
}
