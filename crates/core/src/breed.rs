//! Breed trait ratings and the predicates used to search breeds.
//!
//! TheCatAPI rates every breed on ten traits from 1 to 5. Two different
//! searches run over those ratings:
//!
//! - [`BreedFilter`] backs the breed browser: a name prefix plus a set of
//!   characteristic checkboxes that must *all* hold.
//! - [`BreedSearch`] backs `GET /api/breeds/search`: a name substring, or a
//!   combination of minimum friendliness, exact energy and origin.

use serde::{Deserialize, Serialize};

/// A 1-5 trait rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraitRating(u8);

impl TraitRating {
    /// Lowest rating.
    pub const MIN: u8 = 1;
    /// Highest rating.
    pub const MAX: u8 = 5;
    /// Rating assumed when the catalogue omits a trait.
    pub const NEUTRAL: Self = Self(3);

    /// Create a rating, clamping into `1..=5`.
    #[must_use]
    pub fn new(value: i32) -> Self {
        let clamped = value.clamp(i32::from(Self::MIN), i32::from(Self::MAX));
        // Clamped into 1..=5 above.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Self(clamped as u8)
    }

    /// Create a rating from an optional upstream value, defaulting to neutral.
    #[must_use]
    pub fn from_upstream(value: Option<i32>) -> Self {
        value.map_or(Self::NEUTRAL, Self::new)
    }

    /// The rating value.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Default for TraitRating {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl std::fmt::Display for TraitRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the ten rated breed traits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trait {
    Adaptability,
    AffectionLevel,
    ChildFriendly,
    DogFriendly,
    EnergyLevel,
    Grooming,
    HealthIssues,
    Intelligence,
    SocialNeeds,
    StrangerFriendly,
}

impl Trait {
    /// All traits, in the order the breed page lists them.
    pub const ALL: [Self; 10] = [
        Self::ChildFriendly,
        Self::DogFriendly,
        Self::EnergyLevel,
        Self::Grooming,
        Self::HealthIssues,
        Self::Intelligence,
        Self::SocialNeeds,
        Self::StrangerFriendly,
        Self::Adaptability,
        Self::AffectionLevel,
    ];

    /// Heading shown next to the rating bar.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Adaptability => "Adaptability",
            Self::AffectionLevel => "Affection Level",
            Self::ChildFriendly => "Child Friendly",
            Self::DogFriendly => "Dog Friendly",
            Self::EnergyLevel => "Energy Level",
            Self::Grooming => "Grooming",
            Self::HealthIssues => "Health Issues",
            Self::Intelligence => "Intelligence",
            Self::SocialNeeds => "Social Needs",
            Self::StrangerFriendly => "Stranger Friendly",
        }
    }

    const fn descriptions(self) -> [&'static str; 5] {
        match self {
            Self::ChildFriendly => [
                "Not recommended for homes with children",
                "Better with older, gentle children",
                "Good with well-behaved children",
                "Great with children of all ages",
                "Excellent family cat, very patient with children",
            ],
            Self::DogFriendly => [
                "Typically does not get along well with dogs",
                "May tolerate dogs with proper introduction",
                "Generally gets along with dogs",
                "Usually enjoys the company of dogs",
                "Excellent with dogs, often forms close bonds",
            ],
            Self::EnergyLevel => [
                "Very calm and low-energy",
                "Prefers quiet activities and rest",
                "Moderate energy, enjoys play sessions",
                "Active and playful throughout the day",
                "Very high energy, needs lots of stimulation",
            ],
            Self::Grooming => [
                "Very low maintenance grooming",
                "Occasional brushing needed",
                "Regular weekly brushing recommended",
                "Needs frequent grooming and care",
                "Daily grooming essential to prevent matting",
            ],
            Self::HealthIssues => [
                "Generally very healthy breed",
                "Few known health issues",
                "Some breed-specific health concerns",
                "Several potential health issues to monitor",
                "Higher risk of breed-related health problems",
            ],
            Self::Intelligence => [
                "Simple and straightforward personality",
                "Basic learning ability",
                "Average intelligence, trainable",
                "Highly intelligent and quick to learn",
                "Exceptionally intelligent, problem-solving abilities",
            ],
            Self::SocialNeeds => [
                "Very independent, enjoys solitude",
                "Somewhat independent but appreciates company",
                "Enjoys both alone time and social interaction",
                "Thrives on social interaction and attention",
                "Extremely social, needs constant companionship",
            ],
            Self::StrangerFriendly => [
                "Very shy and reserved with strangers",
                "Cautious but may warm up to new people",
                "Neutral towards strangers, neither shy nor outgoing",
                "Generally friendly and welcoming to visitors",
                "Extremely outgoing, loves meeting new people",
            ],
            Self::Adaptability => [
                "Struggles with changes, prefers stable routines",
                "Needs time to adjust to new situations or environments",
                "Moderately adaptable, handles changes with some preparation",
                "Quite adaptable, adjusts well to new homes and situations",
                "Extremely adaptable, thrives in any environment or situation",
            ],
            Self::AffectionLevel => [
                "Very independent, shows minimal physical affection",
                "Occasionally affectionate but prefers personal space",
                "Moderately affectionate, enjoys some cuddles and attention",
                "Very loving and seeks out human attention regularly",
                "Extremely affectionate, constant companion who loves cuddles",
            ],
        }
    }

    /// Sentence describing what `rating` means for this trait.
    ///
    /// Ratings outside 1-5 fall back to the middle sentence.
    #[must_use]
    pub fn describe(self, rating: u8) -> &'static str {
        let descriptions = self.descriptions();
        usize::from(rating)
            .checked_sub(1)
            .and_then(|i| descriptions.get(i))
            .copied()
            .unwrap_or(descriptions[2])
    }
}

/// The ten trait ratings of a breed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BreedTraits {
    pub adaptability: TraitRating,
    pub affection_level: TraitRating,
    pub child_friendly: TraitRating,
    pub dog_friendly: TraitRating,
    pub energy_level: TraitRating,
    pub grooming: TraitRating,
    pub health_issues: TraitRating,
    pub intelligence: TraitRating,
    pub social_needs: TraitRating,
    pub stranger_friendly: TraitRating,
}

impl BreedTraits {
    /// Rating for a single trait.
    #[must_use]
    pub const fn rating(&self, t: Trait) -> TraitRating {
        match t {
            Trait::Adaptability => self.adaptability,
            Trait::AffectionLevel => self.affection_level,
            Trait::ChildFriendly => self.child_friendly,
            Trait::DogFriendly => self.dog_friendly,
            Trait::EnergyLevel => self.energy_level,
            Trait::Grooming => self.grooming,
            Trait::HealthIssues => self.health_issues,
            Trait::Intelligence => self.intelligence,
            Trait::SocialNeeds => self.social_needs,
            Trait::StrangerFriendly => self.stranger_friendly,
        }
    }

    #[must_use]
    pub const fn good_with_kids(&self) -> bool {
        self.child_friendly.get() >= 4
    }

    #[must_use]
    pub const fn good_with_dogs(&self) -> bool {
        self.dog_friendly.get() >= 4
    }

    #[must_use]
    pub const fn high_energy(&self) -> bool {
        self.energy_level.get() >= 4
    }

    #[must_use]
    pub const fn low_maintenance(&self) -> bool {
        self.grooming.get() <= 2
    }
}

/// A checkbox in the breed browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Characteristic {
    ChildFriendly,
    DogFriendly,
    EnergyLevel,
    Grooming,
    Intelligence,
    SocialNeeds,
    StrangerFriendly,
    Adaptability,
    AffectionLevel,
    LowHealthIssues,
}

impl Characteristic {
    /// Threshold a "high" characteristic must reach.
    const HIGH: u8 = 3;

    /// All characteristics, in checkbox order.
    pub const ALL: [Self; 10] = [
        Self::ChildFriendly,
        Self::DogFriendly,
        Self::EnergyLevel,
        Self::Grooming,
        Self::Intelligence,
        Self::SocialNeeds,
        Self::StrangerFriendly,
        Self::Adaptability,
        Self::AffectionLevel,
        Self::LowHealthIssues,
    ];

    /// Query-string key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::ChildFriendly => "childFriendly",
            Self::DogFriendly => "dogFriendly",
            Self::EnergyLevel => "energyLevel",
            Self::Grooming => "grooming",
            Self::Intelligence => "intelligence",
            Self::SocialNeeds => "socialNeeds",
            Self::StrangerFriendly => "strangerFriendly",
            Self::Adaptability => "adaptability",
            Self::AffectionLevel => "affectionLevel",
            Self::LowHealthIssues => "lowHealthIssues",
        }
    }

    /// Checkbox label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ChildFriendly => "Child Friendly",
            Self::DogFriendly => "Dog Friendly",
            Self::EnergyLevel => "High Energy",
            Self::Grooming => "High Grooming Needs",
            Self::Intelligence => "High Intelligence",
            Self::SocialNeeds => "High Social Needs",
            Self::StrangerFriendly => "Stranger Friendly",
            Self::Adaptability => "Highly Adaptable",
            Self::AffectionLevel => "Very Affectionate",
            Self::LowHealthIssues => "Low Health Issues",
        }
    }

    /// Look up a characteristic by its query-string key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }

    /// Whether a breed with `traits` has this characteristic.
    #[must_use]
    pub const fn holds(self, traits: &BreedTraits) -> bool {
        let rating = match self {
            Self::LowHealthIssues => return traits.health_issues.get() <= Self::HIGH,
            Self::ChildFriendly => traits.child_friendly,
            Self::DogFriendly => traits.dog_friendly,
            Self::EnergyLevel => traits.energy_level,
            Self::Grooming => traits.grooming,
            Self::Intelligence => traits.intelligence,
            Self::SocialNeeds => traits.social_needs,
            Self::StrangerFriendly => traits.stranger_friendly,
            Self::Adaptability => traits.adaptability,
            Self::AffectionLevel => traits.affection_level,
        };
        rating.get() >= Self::HIGH
    }
}

/// Breed browser filter: name prefix plus required characteristics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreedFilter {
    pub name_prefix: String,
    pub characteristics: Vec<Characteristic>,
}

impl BreedFilter {
    /// Build a filter from a name and the keys of the checked boxes.
    ///
    /// Unknown keys are ignored.
    pub fn from_keys<'a>(name: Option<&str>, keys: impl IntoIterator<Item = &'a str>) -> Self {
        let mut characteristics: Vec<Characteristic> =
            keys.into_iter().filter_map(Characteristic::from_key).collect();
        characteristics.dedup();
        Self {
            name_prefix: name.unwrap_or_default().trim().to_owned(),
            characteristics,
        }
    }

    /// `true` when no criteria are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name_prefix.is_empty() && self.characteristics.is_empty()
    }

    /// Whether the characteristic is selected.
    #[must_use]
    pub fn has(&self, c: Characteristic) -> bool {
        self.characteristics.contains(&c)
    }

    /// Whether a breed named `name` with `traits` passes the filter.
    #[must_use]
    pub fn matches(&self, name: &str, traits: &BreedTraits) -> bool {
        let name_ok = self.name_prefix.is_empty()
            || name
                .to_lowercase()
                .starts_with(&self.name_prefix.to_lowercase());
        name_ok && self.characteristics.iter().all(|c| c.holds(traits))
    }
}

/// API breed search criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreedSearch {
    pub name: Option<String>,
    pub child_friendly: Option<u8>,
    pub dog_friendly: Option<u8>,
    pub energy_level: Option<u8>,
    pub origin: Option<String>,
}

impl BreedSearch {
    /// Whether a breed passes the search.
    ///
    /// A non-blank name short-circuits every other criterion.
    #[must_use]
    pub fn matches(&self, name: &str, origin: Option<&str>, traits: &BreedTraits) -> bool {
        if let Some(needle) = self.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            return name.to_lowercase().contains(&needle.to_lowercase());
        }

        if self
            .child_friendly
            .is_some_and(|min| traits.child_friendly.get() < min)
        {
            return false;
        }
        if self
            .dog_friendly
            .is_some_and(|min| traits.dog_friendly.get() < min)
        {
            return false;
        }
        if self
            .energy_level
            .is_some_and(|level| traits.energy_level.get() != level)
        {
            return false;
        }
        match self.origin.as_deref().map(str::trim).filter(|o| !o.is_empty()) {
            Some(wanted) => origin.is_some_and(|o| o.to_lowercase().contains(&wanted.to_lowercase())),
            None => true,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn traits(child: i32, dog: i32, energy: i32, health: i32) -> BreedTraits {
        BreedTraits {
            child_friendly: TraitRating::new(child),
            dog_friendly: TraitRating::new(dog),
            energy_level: TraitRating::new(energy),
            health_issues: TraitRating::new(health),
            ..BreedTraits::default()
        }
    }

    #[test]
    fn test_rating_clamps() {
        assert_eq!(TraitRating::new(0).get(), 1);
        assert_eq!(TraitRating::new(9).get(), 5);
        assert_eq!(TraitRating::from_upstream(None), TraitRating::NEUTRAL);
    }

    #[test]
    fn test_describe_falls_back_to_middle() {
        assert_eq!(
            Trait::EnergyLevel.describe(5),
            "Very high energy, needs lots of stimulation"
        );
        assert_eq!(
            Trait::EnergyLevel.describe(0),
            "Moderate energy, enjoys play sessions"
        );
        assert_eq!(
            Trait::EnergyLevel.describe(7),
            "Moderate energy, enjoys play sessions"
        );
    }

    #[test]
    fn test_derived_helpers() {
        let t = BreedTraits {
            grooming: TraitRating::new(2),
            ..traits(4, 3, 5, 1)
        };
        assert!(t.good_with_kids());
        assert!(!t.good_with_dogs());
        assert!(t.high_energy());
        assert!(t.low_maintenance());
    }

    #[test]
    fn test_filter_name_prefix_case_insensitive() {
        let filter = BreedFilter::from_keys(Some("per"), []);
        assert!(filter.matches("Persian", &BreedTraits::default()));
        assert!(!filter.matches("Exotic Persian", &BreedTraits::default()));
    }

    #[test]
    fn test_filter_requires_all_characteristics() {
        let filter = BreedFilter::from_keys(None, ["childFriendly", "dogFriendly"]);
        assert!(filter.matches("Any", &traits(3, 3, 1, 1)));
        assert!(!filter.matches("Any", &traits(5, 2, 1, 1)));
    }

    #[test]
    fn test_filter_low_health_issues() {
        let filter = BreedFilter::from_keys(None, ["lowHealthIssues"]);
        assert!(filter.matches("Any", &traits(1, 1, 1, 3)));
        assert!(!filter.matches("Any", &traits(1, 1, 1, 4)));
    }

    #[test]
    fn test_filter_ignores_unknown_keys() {
        let filter = BreedFilter::from_keys(Some("  "), ["page", "name"]);
        assert!(filter.is_empty());
    }

    #[test]
    fn test_search_name_short_circuits() {
        let search = BreedSearch {
            name: Some("SIAM".into()),
            energy_level: Some(1),
            ..BreedSearch::default()
        };
        assert!(search.matches("Siamese", None, &traits(1, 1, 5, 1)));
        assert!(search.matches("Balinese-Siamese", None, &traits(1, 1, 5, 1)));
        assert!(!search.matches("Bengal", None, &traits(1, 1, 1, 1)));
    }

    #[test]
    fn test_search_criteria_combine() {
        let search = BreedSearch {
            child_friendly: Some(4),
            energy_level: Some(3),
            origin: Some("egypt".into()),
            ..BreedSearch::default()
        };
        assert!(search.matches("Mau", Some("Egypt"), &traits(4, 1, 3, 1)));
        assert!(!search.matches("Mau", Some("Egypt"), &traits(3, 1, 3, 1)));
        assert!(!search.matches("Mau", Some("Egypt"), &traits(4, 1, 4, 1)));
        assert!(!search.matches("Mau", None, &traits(4, 1, 3, 1)));
    }

    #[test]
    fn test_empty_search_matches_everything() {
        assert!(BreedSearch::default().matches("Any", None, &BreedTraits::default()));
    }
}
