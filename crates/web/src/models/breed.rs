//! Breed reference data.

use werescuecats_core::{BreedId, BreedTraits, CareTips};

/// A cat breed as synced from TheCatAPI.
#[derive(Debug, Clone)]
pub struct Breed {
    pub id: BreedId,
    pub name: String,
    pub description: Option<String>,
    pub origin: Option<String>,
    pub wikipedia_url: Option<String>,
    pub reference_image_id: Option<String>,
    pub image_url: Option<String>,
    pub traits: BreedTraits,
}

impl Breed {
    #[must_use]
    pub const fn care_tips(&self) -> CareTips {
        CareTips::for_traits(&self.traits)
    }
}
