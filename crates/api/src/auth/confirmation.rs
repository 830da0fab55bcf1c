//! Stateless signup confirmation codes.
//!
//! Codes are HMAC-SHA256 digests over the user's identity (id, username,
//! email), keyed by the server's JWT secret. Nothing is persisted: the same
//! user always yields the same code for a given secret, so re-running signup
//! simply re-delivers it, and verification is a pure recomputation.

use hmac::{Hmac, Mac};
use revue_core::types::DbId;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Compute the confirmation code for a user.
///
/// The digest covers the user id, username, and email, separated by a NUL
/// byte so that field boundaries cannot be shifted. Returned as lowercase hex.
pub fn generate_code(user_id: DbId, username: &str, email: &str, secret: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(&user_id.to_le_bytes());
    mac.update(username.as_bytes());
    mac.update(b"\x00");
    mac.update(email.as_bytes());
    format!("{:x}", mac.finalize().into_bytes())
}

/// Check a submitted confirmation code against the expected value.
pub fn verify_code(
    user_id: DbId,
    username: &str,
    email: &str,
    secret: &str,
    submitted: &str,
) -> bool {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(&user_id.to_le_bytes());
    mac.update(username.as_bytes());
    mac.update(b"\x00");
    mac.update(email.as_bytes());

    // Anything that is not well-formed hex is simply a wrong code.
    let Ok(raw) = hex::decode(submitted) else {
        return false;
    };
    // Constant-time comparison via the Mac trait.
    mac.verify_slice(&raw).is_ok()
}
