//! Business logic services.
//!
//! # Services
//!
//! - `auth` - Registration, login and password changes
//! - `adoption` - Application lifecycle and per-user stats
//! - `cats` - Cat intake and browsing
//! - `cat_api` - TheCatAPI client
//! - `breed_sync` - Breed catalogue import
//! - `api_tokens` - Health institution tokens
//! - `stats` - Admin dashboard figures

pub mod adoption;
pub mod api_tokens;
pub mod auth;
pub mod breed_sync;
pub mod cat_api;
pub mod cats;
pub mod stats;

pub use adoption::{AdoptionError, AdoptionService};
pub use api_tokens::{ApiTokenError, ApiTokenService};
pub use auth::{AuthError, AuthService};
pub use cat_api::{CatApiClient, CatApiError};
pub use cats::{CatError, CatService};
pub use stats::DashboardStats;
