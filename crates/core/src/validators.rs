//! Pure field validators used by request DTOs and handlers.
//!
//! All functions return [`validator::ValidationError`] so they can be plugged
//! into `#[validate(custom(...))]` attributes on request types, or called
//! directly from handler code.

use std::sync::LazyLock;

use regex::Regex;
use validator::ValidationError;

/// Usernames that can never be registered. `"me"` collides with the
/// `/users/me` endpoint.
pub const FORBIDDEN_USERNAMES: &[&str] = &["me"];

/// Maximum username length.
pub const MAX_USERNAME_LENGTH: usize = 150;

/// Maximum email length.
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum length for names and descriptions (titles, categories, genres).
pub const MAX_NAME_LENGTH: usize = 256;

/// Maximum slug length.
pub const MAX_SLUG_LENGTH: usize = 50;

/// Review score bounds (inclusive).
pub const MIN_SCORE: i32 = 1;
pub const MAX_SCORE: i32 = 10;

/// Allowed username characters: word characters plus `.@+-`.
static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.@+-]+$").expect("username regex is valid"));

/// Slugs: lowercase ASCII letters, digits, hyphens, underscores.
static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_-]+$").expect("slug regex is valid"));

/// Validate a username against the character pattern and the blacklist.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if FORBIDDEN_USERNAMES.contains(&username) {
        return Err(ValidationError::new("forbidden_username")
            .with_message(format!("Username '{username}' is reserved").into()));
    }
    if !USERNAME_RE.is_match(username) {
        return Err(ValidationError::new("invalid_username").with_message(
            "Username may only contain letters, digits and .@+- characters".into(),
        ));
    }
    Ok(())
}

/// Validate that a slug uses the restricted slug alphabet.
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if !SLUG_RE.is_match(slug) {
        return Err(ValidationError::new("invalid_slug").with_message(
            "Slug may only contain lowercase letters, digits, hyphens and underscores".into(),
        ));
    }
    Ok(())
}

/// Validate that a title's year does not lie in the future.
pub fn validate_year(year: i32) -> Result<(), ValidationError> {
    let current = current_year();
    if year > current {
        return Err(ValidationError::new("year_in_future")
            .with_message(format!("Year must not exceed the current year ({current})").into()));
    }
    Ok(())
}

/// The current calendar year (UTC).
pub fn current_year() -> i32 {
    use chrono::Datelike;
    chrono::Utc::now().year()
}
