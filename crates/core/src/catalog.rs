//! Browse filters for the public cat grid.

use serde::{Deserialize, Serialize};

use crate::types::Gender;

/// Age bucket offered by the cat browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeRange {
    #[serde(rename = "0-2")]
    Young,
    #[serde(rename = "3-7")]
    Adult,
    #[serde(rename = "8+")]
    Senior,
}

impl AgeRange {
    pub const ALL: [Self; 3] = [Self::Young, Self::Adult, Self::Senior];

    /// Query-string value.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Young => "0-2",
            Self::Adult => "3-7",
            Self::Senior => "8+",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Young => "Young (0-2 years)",
            Self::Adult => "Adult (3-7 years)",
            Self::Senior => "Senior (8+ years)",
        }
    }

    #[must_use]
    pub const fn contains(self, age: i32) -> bool {
        match self {
            Self::Young => age >= 0 && age <= 2,
            Self::Adult => age >= 3 && age <= 7,
            Self::Senior => age >= 8,
        }
    }
}

impl std::str::FromStr for AgeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.key() == s.trim())
            .ok_or_else(|| format!("invalid age range: {s}"))
    }
}

/// Cat browser filter. Absent criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatFilter {
    /// Exact breed name.
    pub breed: Option<String>,
    pub gender: Option<Gender>,
    pub age_range: Option<AgeRange>,
}

impl CatFilter {
    /// Build a filter from raw query values, treating blanks and unparsable
    /// values as "any".
    #[must_use]
    pub fn from_query(breed: Option<&str>, gender: Option<&str>, age_range: Option<&str>) -> Self {
        fn non_blank(v: Option<&str>) -> Option<&str> {
            v.map(str::trim).filter(|s| !s.is_empty())
        }

        Self {
            breed: non_blank(breed).map(ToOwned::to_owned),
            gender: non_blank(gender).and_then(|g| g.parse().ok()),
            age_range: non_blank(age_range).and_then(|a| a.parse().ok()),
        }
    }

    #[must_use]
    pub fn matches(&self, breed_name: Option<&str>, gender: Option<Gender>, age: Option<i32>) -> bool {
        let breed_ok = self
            .breed
            .as_deref()
            .is_none_or(|wanted| breed_name == Some(wanted));
        let gender_ok = self.gender.is_none_or(|wanted| gender == Some(wanted));
        let age_ok = self
            .age_range
            .is_none_or(|range| age.is_some_and(|a| range.contains(a)));
        breed_ok && gender_ok && age_ok
    }
}
