//! Skier domain entity

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::piste::Piste;
use crate::domain::registration::Registration;
use crate::domain::subscription::Subscription;

/// A ski-station customer.
///
/// The subscription, piste set and registrations are owned by the skier
/// value; loading a skier from a store materialises all three.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skier {
    #[serde(default)]
    pub num_skier: Option<i64>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub subscription: Option<Subscription>,
    #[serde(default)]
    pub pistes: BTreeSet<Piste>,
    #[serde(default)]
    pub registrations: Vec<Registration>,
}

impl Skier {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        date_of_birth: Option<NaiveDate>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            date_of_birth,
            city: city.into(),
            ..Default::default()
        }
    }

    pub fn with_subscription(mut self, subscription: Subscription) -> Self {
        self.subscription = Some(subscription);
        self
    }

    pub fn with_registrations(mut self, registrations: Vec<Registration>) -> Self {
        self.registrations = registrations;
        self
    }

    /// Add a piste to the set. Returns `false` if it was already there.
    pub fn add_piste(&mut self, piste: Piste) -> bool {
        self.pistes.insert(piste)
    }

    pub fn has_piste(&self, piste_id: i64) -> bool {
        self.pistes.iter().any(|p| p.num_piste == Some(piste_id))
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::piste::Color;

    fn piste(id: i64) -> Piste {
        let mut p = Piste::new(format!("P{}", id), Color::Blue, 800, 20);
        p.num_piste = Some(id);
        p
    }

    #[test]
    fn piste_set_has_no_duplicates() {
        let mut skier = Skier::new("Ana", "Ben", None, "Tunis");
        assert!(skier.add_piste(piste(1)));
        assert!(!skier.add_piste(piste(1)));
        assert!(skier.add_piste(piste(2)));
        assert_eq!(skier.pistes.len(), 2);
        assert!(skier.has_piste(1));
        assert!(!skier.has_piste(3));
    }

    #[test]
    fn deserializes_minimal_document() {
        let skier: Skier = serde_json::from_str(r#"{"first_name":"Ana","last_name":"Ben"}"#).unwrap();
        assert_eq!(skier.num_skier, None);
        assert!(skier.subscription.is_none());
        assert!(skier.pistes.is_empty());
        assert!(skier.registrations.is_empty());
        assert_eq!(skier.full_name(), "Ana Ben");
    }
}
