//! Session middleware configuration.
//!
//! `PostgreSQL`-backed sessions using tower-sessions. The store's table is
//! `tower_sessions.session`, created by migration. The session cookie is
//! signed with a key derived from `WRC_SESSION_SECRET`.

use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha512};
use sqlx::PgPool;
use tower_sessions::cookie::Key;
use tower_sessions::service::SignedCookie;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::WebConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "wrc_session";

/// Session expiry after inactivity (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Cookie signing key for a session secret.
///
/// SHA-512 stretches the secret to the 64 bytes a [`Key`] needs.
#[must_use]
pub fn session_key(secret: &SecretString) -> Key {
    let digest = Sha512::digest(secret.expose_secret().as_bytes());
    Key::from(digest.as_slice())
}

/// Create the session layer with `PostgreSQL` store.
///
/// The cookie is marked secure when the site is served over https.
#[must_use]
pub fn create_session_layer(
    pool: &PgPool,
    config: &WebConfig,
) -> SessionManagerLayer<PostgresStore, SignedCookie> {
    let store = PostgresStore::new(pool.clone());

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_https())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
        .with_signed(session_key(&config.session_secret))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tower_sessions::cookie::{Cookie, CookieJar};

    fn secret(value: &str) -> SecretString {
        SecretString::from(value.to_owned())
    }

    #[test]
    fn test_session_key_is_stable() {
        let a = session_key(&secret(&"k".repeat(32)));
        let b = session_key(&secret(&"k".repeat(32)));
        assert!(a == b);
        assert!(a != session_key(&secret(&"q".repeat(32))));
    }

    #[test]
    fn test_cookie_signed_with_other_secret_is_rejected() {
        let ours = session_key(&secret(&"k".repeat(32)));
        let theirs = session_key(&secret(&"q".repeat(32)));

        let mut jar = CookieJar::new();
        jar.signed_mut(&theirs)
            .add(Cookie::new(SESSION_COOKIE_NAME, "forged"));

        assert!(jar.signed(&ours).get(SESSION_COOKIE_NAME).is_none());
        assert_eq!(
            jar.signed(&theirs).get(SESSION_COOKIE_NAME).unwrap().value(),
            "forged"
        );
    }
}
