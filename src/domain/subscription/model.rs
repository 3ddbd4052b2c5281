//! Subscription domain entity

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

/// Subscription type tag.
///
/// Tags read from storage that do not match a known period are kept
/// verbatim in [`SubscriptionType::Unrecognized`] so they round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SubscriptionType {
    Annual,
    Semestriel,
    Monthly,
    Unrecognized(String),
}

impl SubscriptionType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Annual => "ANNUAL",
            Self::Semestriel => "SEMESTRIEL",
            Self::Monthly => "MONTHLY",
            Self::Unrecognized(tag) => tag,
        }
    }

    pub fn parse(tag: &str) -> Self {
        match tag {
            "ANNUAL" => Self::Annual,
            "SEMESTRIEL" => Self::Semestriel,
            "MONTHLY" => Self::Monthly,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    /// Validity period in months, `None` for an unrecognized tag.
    pub fn period(&self) -> Option<Months> {
        match self {
            Self::Annual => Some(Months::new(12)),
            Self::Semestriel => Some(Months::new(6)),
            Self::Monthly => Some(Months::new(1)),
            Self::Unrecognized(_) => None,
        }
    }
}

impl std::fmt::Display for SubscriptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<String> for SubscriptionType {
    fn from(tag: String) -> Self {
        Self::parse(&tag)
    }
}

impl From<SubscriptionType> for String {
    fn from(t: SubscriptionType) -> Self {
        t.as_str().to_string()
    }
}

impl std::str::FromStr for SubscriptionType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// Outcome of [`Subscription::derive_end_date`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndDateDerivation {
    /// End date was set from the start date and the type period.
    Derived(NaiveDate),
    /// No start date, nothing to derive from.
    MissingStartDate,
    /// The type tag has no known period; the end date was left as is.
    UnhandledType(String),
}

/// A time-bounded membership
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    #[serde(default)]
    pub num_sub: Option<i64>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub price: Decimal,
    pub type_sub: SubscriptionType,
}

impl Subscription {
    pub fn new(type_sub: SubscriptionType, start_date: Option<NaiveDate>, price: Decimal) -> Self {
        Self {
            num_sub: None,
            start_date,
            end_date: None,
            price,
            type_sub,
        }
    }

    /// Set `end_date` to `start_date` plus the period of `type_sub`.
    ///
    /// Month arithmetic clamps to the last day of the target month.
    pub fn derive_end_date(&mut self) -> DomainResult<EndDateDerivation> {
        let Some(start) = self.start_date else {
            return Ok(EndDateDerivation::MissingStartDate);
        };

        let Some(period) = self.type_sub.period() else {
            return Ok(EndDateDerivation::UnhandledType(
                self.type_sub.as_str().to_string(),
            ));
        };

        let end = start.checked_add_months(period).ok_or_else(|| {
            DomainError::Validation(format!(
                "Subscription end date out of range for start {}",
                start
            ))
        })?;
        self.end_date = Some(end);
        Ok(EndDateDerivation::Derived(end))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn subscription(type_sub: SubscriptionType, start: Option<NaiveDate>) -> Subscription {
        Subscription::new(type_sub, start, Decimal::new(50000, 2))
    }

    #[test]
    fn annual_adds_one_year() {
        let mut s = subscription(SubscriptionType::Annual, Some(date(2024, 1, 15)));
        let outcome = s.derive_end_date().unwrap();
        assert_eq!(outcome, EndDateDerivation::Derived(date(2025, 1, 15)));
        assert_eq!(s.end_date, Some(date(2025, 1, 15)));
    }

    #[test]
    fn semestriel_adds_six_months() {
        let mut s = subscription(SubscriptionType::Semestriel, Some(date(2024, 1, 15)));
        s.derive_end_date().unwrap();
        assert_eq!(s.end_date, Some(date(2024, 7, 15)));
    }

    #[test]
    fn monthly_adds_one_month() {
        let mut s = subscription(SubscriptionType::Monthly, Some(date(2024, 1, 15)));
        s.derive_end_date().unwrap();
        assert_eq!(s.end_date, Some(date(2024, 2, 15)));
    }

    #[test]
    fn month_end_clamps() {
        let mut s = subscription(SubscriptionType::Monthly, Some(date(2024, 1, 31)));
        s.derive_end_date().unwrap();
        assert_eq!(s.end_date, Some(date(2024, 2, 29)));

        let mut leap = subscription(SubscriptionType::Annual, Some(date(2024, 2, 29)));
        leap.derive_end_date().unwrap();
        assert_eq!(leap.end_date, Some(date(2025, 2, 28)));
    }

    #[test]
    fn unrecognized_type_leaves_end_date_untouched() {
        let mut s = subscription(
            SubscriptionType::Unrecognized("WEEKLY".into()),
            Some(date(2024, 1, 15)),
        );
        let outcome = s.derive_end_date().unwrap();
        assert_eq!(outcome, EndDateDerivation::UnhandledType("WEEKLY".into()));
        assert_eq!(s.end_date, None);
    }

    #[test]
    fn missing_start_date_is_reported() {
        let mut s = subscription(SubscriptionType::Annual, None);
        assert_eq!(
            s.derive_end_date().unwrap(),
            EndDateDerivation::MissingStartDate
        );
        assert_eq!(s.end_date, None);
    }

    #[test]
    fn type_tags_round_trip() {
        for tag in ["ANNUAL", "SEMESTRIEL", "MONTHLY", "BIWEEKLY"] {
            assert_eq!(SubscriptionType::parse(tag).as_str(), tag);
        }
        assert_eq!(
            SubscriptionType::parse("MONTHLY"),
            SubscriptionType::Monthly
        );
    }

    #[test]
    fn type_serializes_as_plain_tag() {
        let json = serde_json::to_string(&SubscriptionType::Semestriel).unwrap();
        assert_eq!(json, "\"SEMESTRIEL\"");
        let back: SubscriptionType = serde_json::from_str("\"DAILY\"").unwrap();
        assert_eq!(back, SubscriptionType::Unrecognized("DAILY".into()));
    }
}
