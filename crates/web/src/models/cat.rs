//! Cat domain types.

use chrono::{DateTime, Utc};

use werescuecats_core::{BreedId, CatId, CatStatus, Coordinates, Gender};

/// An adoptable cat (domain type).
#[derive(Debug, Clone)]
pub struct Cat {
    pub id: CatId,
    pub name: String,
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    pub description: Option<String>,
    pub breed_id: Option<BreedId>,
    /// Denormalized from the breeds table for display.
    pub breed_name: Option<String>,
    pub image_url: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: Option<String>,
    pub status: CatStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Cat {
    /// Location, when both coordinates are present and valid.
    #[must_use]
    pub fn coordinates(&self) -> Option<Coordinates> {
        Coordinates::new(self.latitude?, self.longitude?).ok()
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.status == CatStatus::Available
    }
}

/// Validated fields for inserting a cat.
#[derive(Debug, Clone)]
pub struct NewCat {
    pub name: String,
    pub age: i32,
    pub gender: Gender,
    pub description: String,
    pub breed_id: BreedId,
    pub image_url: Option<String>,
    pub location: Coordinates,
    pub address: String,
}
