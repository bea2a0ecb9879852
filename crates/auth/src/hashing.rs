use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

// Create a type alias for the HMAC-SHA256 implementation.
type HmacSha256 = Hmac<Sha256>;

const SEPARATOR: char = '$';

/// Hashes a password with a fresh random salt.
///
/// The salt is used as the HMAC key and the password as the message. The
/// result is stored as `"<salt>$<hex digest>"` so the salt travels with the hash.
pub fn hash_password(password: &str) -> String {
    let salt = Uuid::new_v4().simple().to_string();
    let digest = hex::encode(keyed(&salt, password).finalize().into_bytes());
    format!("{}{}{}", salt, SEPARATOR, digest)
}

/// Checks a password against a value produced by `hash_password`.
///
/// The digest comparison is constant-time. A malformed stored value never verifies.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt, digest)) = stored.split_once(SEPARATOR) else {
        return false;
    };
    let Ok(expected) = hex::decode(digest) else {
        return false;
    };
    keyed(salt, password).verify_slice(&expected).is_ok()
}

fn keyed(salt: &str, password: &str) -> HmacSha256 {
    let mut mac = HmacSha256::new_from_slice(salt.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(password.as_bytes());
    mac
}
