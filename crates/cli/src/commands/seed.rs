//! Sample data for local development and demos.
//!
//! Users, cats and adoptions are each inserted only when their table is
//! empty, so the command is safe to re-run.

use rand::Rng;
use rand::seq::IndexedRandom;
use sqlx::PgPool;
use tracing::{info, warn};

use werescuecats_core::{AdoptionStatus, CatStatus, Coordinates, Gender, UserId, UserRole};
use werescuecats_web::config::CatApiConfig;
use werescuecats_web::db::{AdoptionRepository, BreedRepository, CatRepository, UserRepository};
use werescuecats_web::models::{Breed, NewCat};
use werescuecats_web::services::auth::{AuthService, Registration};
use werescuecats_web::services::{ApiTokenService, CatApiClient, breed_sync};

use super::connect;

type SeedResult<T> = Result<T, Box<dyn std::error::Error>>;

const ADMIN_PASSWORD: &str = "admin123";
const USER_PASSWORD: &str = "password123";

/// Email, first name, last name, street, postal code.
const USERS: [(&str, &str, &str, &str, &str); 5] = [
    ("john.doe@example.com", "John", "Doe", "456 Oak Avenue", "54321"),
    ("jane.smith@example.com", "Jane", "Smith", "789 Pine Street", "67890"),
    ("mike.johnson@example.com", "Mike", "Johnson", "321 Elm Road", "13579"),
    ("sarah.wilson@example.com", "Sarah", "Wilson", "654 Maple Drive", "24680"),
    ("chris.brown@example.com", "Chris", "Brown", "987 Cedar Lane", "97531"),
];

const CAT_NAMES: [&str; 24] = [
    "Whiskers", "Shadow", "Luna", "Oliver", "Mia", "Leo", "Bella", "Charlie", "Lucy", "Max",
    "Lily", "Jack", "Sophie", "Tiger", "Coco", "Simba", "Nala", "Felix", "Molly", "Oscar", "Ruby",
    "Jasper", "Chloe", "Smokey",
];

const DESCRIPTIONS: [&str; 8] = [
    "A friendly and playful cat looking for a loving home",
    "Very affectionate and loves to cuddle",
    "Independent but loyal, perfect for a quiet household",
    "Energetic and loves to play with toys",
    "Calm and gentle, great with children",
    "Curious and intelligent, needs mental stimulation",
    "Social butterfly who loves meeting new people",
    "Peaceful lap cat who enjoys quiet afternoons",
];

const DISTRICTS: [&str; 12] = [
    "Neustadt",
    "Altstadt",
    "Blasewitz",
    "Pieschen",
    "Cotta",
    "Prohlis",
    "Klotzsche",
    "Loschwitz",
    "Striesen",
    "Gorbitz",
    "Johannstadt",
    "Reick",
];

const ADOPTION_NOTES: [&str; 5] = [
    "I have experience with cats and would love to provide a loving home.",
    "My family is excited to welcome a new furry member.",
    "I live in a quiet apartment perfect for a cat.",
    "Looking for a companion cat to keep me company.",
    "I have a large house with plenty of space for a cat to explore.",
];

/// Dresden city centre.
const BASE_LATITUDE: f64 = 51.0504;
const BASE_LONGITUDE: f64 = 13.7373;
const SPREAD: f64 = 0.1;

const MAX_SEEDED_ADOPTIONS: usize = 8;

/// A cat drawn before anything touches the database.
#[derive(Debug)]
struct PlannedCat {
    new: NewCat,
    status: CatStatus,
}

/// Seed everything that is still empty, then issue the default tokens.
pub async fn run() -> SeedResult<()> {
    let pool = connect().await?;

    info!("Initializing sample data...");

    let client = CatApiClient::new(&CatApiConfig::from_env()?)?;
    if let Some(report) = breed_sync::sync_if_empty(&pool, &client).await? {
        info!(upserted = report.upserted, "Breeds fetched");
    }

    if UserRepository::new(&pool).count().await? == 0 {
        seed_users(&pool).await?;
    } else {
        info!("Users already present, skipping");
    }

    if CatRepository::new(&pool).count().await? == 0 {
        seed_cats(&pool, &client).await?;
    } else {
        info!("Cats already present, skipping");
    }

    if AdoptionRepository::new(&pool).count().await? == 0 {
        seed_adoptions(&pool).await?;
    } else {
        info!("Adoptions already present, skipping");
    }

    for token in ApiTokenService::new(&pool).ensure_defaults().await? {
        info!(organization = %token.organization_name, "Issued default API token");
    }

    info!("Sample data initialization completed!");
    Ok(())
}

async fn seed_users(pool: &PgPool) -> SeedResult<()> {
    info!("Creating sample users...");
    let auth = AuthService::new(pool);

    let admin = Registration {
        email: "admin@werescuecats.io".to_owned(),
        password: ADMIN_PASSWORD.to_owned(),
        first_name: "Admin".to_owned(),
        last_name: "User".to_owned(),
        street_address: Some("123 Admin Street".to_owned()),
        postal_code: Some("12345".to_owned()),
    };
    auth.register_with_role(&admin, UserRole::Admin).await?;

    for (email, first_name, last_name, street, postal_code) in USERS {
        let registration = Registration {
            email: email.to_owned(),
            password: USER_PASSWORD.to_owned(),
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            street_address: Some(street.to_owned()),
            postal_code: Some(postal_code.to_owned()),
        };
        auth.register_with_role(&registration, UserRole::User).await?;
    }

    info!("Created {} users", USERS.len() + 1);
    Ok(())
}

/// Draw every cat up front so the thread-local RNG never lives across an
/// await point.
fn plan_cats(breeds: &[Breed]) -> Vec<PlannedCat> {
    let mut rng = rand::rng();

    CAT_NAMES
        .iter()
        .filter_map(|name| {
            let breed = breeds.choose(&mut rng)?;
            let location = Coordinates::new(
                BASE_LATITUDE + rng.random_range(-SPREAD..=SPREAD),
                BASE_LONGITUDE + rng.random_range(-SPREAD..=SPREAD),
            )
            .ok()?;
            let district = DISTRICTS.choose(&mut rng)?;
            let status = if rng.random_bool(0.8) {
                CatStatus::Available
            } else {
                CatStatus::Adopted
            };

            Some(PlannedCat {
                new: NewCat {
                    name: (*name).to_owned(),
                    age: rng.random_range(1..=8),
                    gender: *Gender::ALL.choose(&mut rng)?,
                    description: (*DESCRIPTIONS.choose(&mut rng)?).to_owned(),
                    breed_id: breed.id.clone(),
                    image_url: breed.image_url.clone(),
                    location,
                    address: format!("{district}, Dresden"),
                },
                status,
            })
        })
        .collect()
}

async fn seed_cats(pool: &PgPool, client: &CatApiClient) -> SeedResult<()> {
    info!("Creating sample cats...");

    let breeds = BreedRepository::new(pool).list_all().await?;
    if breeds.is_empty() {
        warn!("No breeds available, cannot create cats");
        return Ok(());
    }

    let cats = CatRepository::new(pool);
    let mut created = 0_usize;
    for mut planned in plan_cats(&breeds) {
        // A fresh picture per cat; fall back to the breed's reference image.
        match client.breed_image(&planned.new.breed_id).await {
            Ok(Some(url)) => planned.new.image_url = Some(url),
            Ok(None) => {}
            Err(e) => warn!(breed_id = %planned.new.breed_id, error = %e, "Image fetch failed"),
        }
        cats.create_with_status(&planned.new, planned.status).await?;
        created += 1;
    }

    info!("Created {created} cats");
    Ok(())
}

/// Seeded adoption status by position, plus the status its cat ends up in.
const fn seeded_status(index: usize) -> (AdoptionStatus, CatStatus) {
    match index {
        0..3 => (AdoptionStatus::Pending, CatStatus::Pending),
        3..6 => (AdoptionStatus::Approved, CatStatus::Pending),
        _ => (AdoptionStatus::Completed, CatStatus::Adopted),
    }
}

/// The admin credited on a seeded application; pending ones are unprocessed.
const fn processed_by(status: AdoptionStatus, admin: UserId) -> Option<UserId> {
    match status {
        AdoptionStatus::Pending => None,
        _ => Some(admin),
    }
}

fn pick_notes(count: usize) -> Vec<&'static str> {
    let mut rng = rand::rng();
    (0..count)
        .filter_map(|_| ADOPTION_NOTES.choose(&mut rng).copied())
        .collect()
}

async fn seed_adoptions(pool: &PgPool) -> SeedResult<()> {
    info!("Creating sample adoptions...");

    let user_repo = UserRepository::new(pool);
    let admins = user_repo.list_by_role(UserRole::Admin).await?;
    let Some(admin) = admins.first().map(|a| a.id) else {
        warn!("No admin user found, cannot create adoptions");
        return Ok(());
    };

    let users = user_repo.list_by_role(UserRole::User).await?;
    let cat_repo = CatRepository::new(pool);
    let available = cat_repo.list_by_status(CatStatus::Available).await?;

    if users.is_empty() || available.is_empty() {
        warn!("Not enough data to create adoptions");
        return Ok(());
    }

    let adoptions = AdoptionRepository::new(pool);
    let pairs: Vec<_> = users
        .iter()
        .zip(&available)
        .take(MAX_SEEDED_ADOPTIONS)
        .collect();
    let notes = pick_notes(pairs.len());

    for (index, ((user, cat), note)) in pairs.into_iter().zip(notes).enumerate() {
        let (status, cat_status) = seeded_status(index);
        adoptions
            .insert_seeded(user.id, cat.id, status, note, processed_by(status, admin))
            .await?;
        cat_repo.update_status(cat.id, cat_status).await?;
    }

    info!("Created sample adoptions");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_status_by_position() {
        assert_eq!(
            seeded_status(0),
            (AdoptionStatus::Pending, CatStatus::Pending)
        );
        assert_eq!(
            seeded_status(2),
            (AdoptionStatus::Pending, CatStatus::Pending)
        );
        assert_eq!(
            seeded_status(3),
            (AdoptionStatus::Approved, CatStatus::Pending)
        );
        assert_eq!(
            seeded_status(5),
            (AdoptionStatus::Approved, CatStatus::Pending)
        );
        assert_eq!(
            seeded_status(7),
            (AdoptionStatus::Completed, CatStatus::Adopted)
        );
    }

    #[test]
    fn test_processed_by_skips_pending() {
        let admin = UserId::new(1);
        assert_eq!(processed_by(AdoptionStatus::Pending, admin), None);
        for index in 3..MAX_SEEDED_ADOPTIONS {
            let (status, _) = seeded_status(index);
            assert_eq!(processed_by(status, admin), Some(admin));
        }
    }

    #[test]
    fn test_pick_notes_count() {
        let notes = pick_notes(4);
        assert_eq!(notes.len(), 4);
        assert!(notes.iter().all(|n| ADOPTION_NOTES.contains(n)));
    }

    #[test]
    fn test_seed_users_are_distinct() {
        let mut emails: Vec<_> = USERS.iter().map(|u| u.0).collect();
        emails.sort_unstable();
        emails.dedup();
        assert_eq!(emails.len(), USERS.len());
    }
}
