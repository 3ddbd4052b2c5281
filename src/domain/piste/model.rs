//! Piste domain entity

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Piste difficulty colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Color {
    Green,
    Blue,
    Red,
    Black,
}

impl Color {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Green => "GREEN",
            Self::Blue => "BLUE",
            Self::Red => "RED",
            Self::Black => "BLACK",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A ski slope.
///
/// Identity is `num_piste`: two values with the same id are the same piste,
/// which is what gives a skier's piste set its uniqueness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Piste {
    #[serde(default)]
    pub num_piste: Option<i64>,
    pub name_piste: String,
    pub color: Color,
    /// Length in metres
    pub length: i32,
    /// Average slope in degrees
    pub slope: i32,
}

impl Piste {
    pub fn new(name_piste: impl Into<String>, color: Color, length: i32, slope: i32) -> Self {
        Self {
            num_piste: None,
            name_piste: name_piste.into(),
            color,
            length,
            slope,
        }
    }
}

impl PartialEq for Piste {
    fn eq(&self, other: &Self) -> bool {
        self.num_piste == other.num_piste
    }
}

impl Eq for Piste {}

impl Hash for Piste {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.num_piste.hash(state);
    }
}

impl PartialOrd for Piste {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Piste {
    fn cmp(&self, other: &Self) -> Ordering {
        self.num_piste.cmp(&other.num_piste)
    }
}
