//! WeRescueCats Core - Shared types library.
//!
//! This crate provides the domain types used across all WeRescueCats components:
//! - `web` - Public adoption site, admin back-office and JSON API
//! - `cli` - Command-line tools for migrations, seeding and breed sync
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP clients. Filtering and pagination rules live here so the
//! HTML pages and the JSON API apply exactly the same predicates.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, emails and status enums
//! - [`breed`] - Trait ratings, breed browser filter and API search
//! - [`care`] - Care tips derived from trait ratings
//! - [`catalog`] - Cat browser filter and age ranges
//! - [`pagination`] - 1-based pages
//! - [`geo`] - Coordinates and the nearby-cats bounding box
//! - [`health`] - Anonymised adoption data helpers and API token format

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod breed;
pub mod care;
pub mod catalog;
pub mod geo;
pub mod health;
pub mod pagination;
pub mod types;

pub use breed::{BreedFilter, BreedSearch, BreedTraits, Characteristic, Trait, TraitRating};
pub use care::CareTips;
pub use catalog::{AgeRange, CatFilter};
pub use geo::{BoundingBox, Coordinates, GeoError};
pub use health::region_from_address;
pub use pagination::Page;
pub use types::*;
