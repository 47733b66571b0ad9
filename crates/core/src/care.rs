//! Care advice derived from a breed's trait ratings.

use crate::breed::BreedTraits;

/// Feeding, grooming, exercise and health advice for a breed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CareTips {
    pub feeding: &'static str,
    pub grooming: &'static str,
    pub exercise: &'static str,
    pub health: &'static str,
}

impl CareTips {
    #[must_use]
    pub const fn for_traits(traits: &BreedTraits) -> Self {
        Self {
            feeding: feeding_tip(traits.energy_level.get()),
            grooming: grooming_tip(traits.grooming.get()),
            exercise: exercise_tip(traits.energy_level.get()),
            health: health_tip(traits.health_issues.get()),
        }
    }
}

const fn feeding_tip(energy: u8) -> &'static str {
    if energy >= 4 {
        "High-energy breeds need protein-rich diets. Feed smaller, frequent meals to maintain energy levels throughout the day."
    } else if energy <= 2 {
        "Lower energy breeds are prone to weight gain. Monitor portions carefully and choose high-quality, balanced nutrition."
    } else {
        "Provide high-quality cat food appropriate for age and activity level. Fresh water should always be available."
    }
}

const fn grooming_tip(grooming: u8) -> &'static str {
    match grooming {
        4.. => "Daily brushing is essential to prevent matting. Consider professional grooming every 6-8 weeks.",
        3 => "Brush 2-3 times per week to maintain coat health and reduce shedding around the home.",
        2 => "Weekly brushing helps maintain coat condition and provides bonding time with your cat.",
        _ => "Minimal grooming needed. Occasional brushing and regular nail trims are sufficient.",
    }
}

const fn exercise_tip(energy: u8) -> &'static str {
    match energy {
        4.. => "Needs multiple active play sessions daily. Provide climbing trees, interactive toys, and puzzle feeders.",
        3 => "Enjoys regular play sessions. Interactive toys and climbing opportunities keep them mentally stimulated.",
        2 => "Moderate exercise needs. Short play sessions and comfortable perches for observation are ideal.",
        _ => "Low exercise needs. Gentle play and comfortable resting spots suit their calm nature.",
    }
}

const fn health_tip(health_issues: u8) -> &'static str {
    match health_issues {
        4.. => "Regular veterinary check-ups are crucial. Be aware of breed-specific health concerns and maintain preventive care.",
        3 => "Annual vet visits and monitoring for breed-related health issues. Maintain good dental hygiene.",
        2 => "Standard veterinary care with annual check-ups. Monitor weight and provide good nutrition.",
        _ => "Generally healthy breed. Regular vet visits and basic preventive care are usually sufficient.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breed::TraitRating;

    #[test]
    fn test_high_energy_breed() {
        let traits = BreedTraits {
            energy_level: TraitRating::new(5),
            ..BreedTraits::default()
        };
        let tips = CareTips::for_traits(&traits);
        assert!(tips.feeding.starts_with("High-energy"));
        assert!(tips.exercise.starts_with("Needs multiple"));
    }

    #[test]
    fn test_neutral_breed() {
        let tips = CareTips::for_traits(&BreedTraits::default());
        assert!(tips.feeding.starts_with("Provide high-quality"));
        assert!(tips.grooming.starts_with("Brush 2-3"));
        assert!(tips.health.starts_with("Annual vet"));
    }

    #[test]
    fn test_low_ratings() {
        let traits = BreedTraits {
            energy_level: TraitRating::new(1),
            grooming: TraitRating::new(1),
            health_issues: TraitRating::new(1),
            ..BreedTraits::default()
        };
        let tips = CareTips::for_traits(&traits);
        assert!(tips.feeding.starts_with("Lower energy"));
        assert!(tips.grooming.starts_with("Minimal"));
        assert!(tips.exercise.starts_with("Low exercise"));
        assert!(tips.health.starts_with("Generally healthy"));
    }
}
