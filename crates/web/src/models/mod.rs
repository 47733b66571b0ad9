//! Domain models.
//!
//! Validated domain objects, separate from the database row types in
//! [`crate::db`] and the view types in [`crate::routes`].

pub mod adoption;
pub mod api_token;
pub mod breed;
pub mod cat;
pub mod session;
pub mod user;

pub use adoption::{Adoption, AdoptionCat, AdoptionUser};
pub use api_token::ApiToken;
pub use breed::Breed;
pub use cat::{Cat, NewCat};
pub use session::{CurrentUser, keys as session_keys};
pub use user::{NewUser, User};
