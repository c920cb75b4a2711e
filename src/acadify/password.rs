//! Password hashing and verification.
//!
//! Passwords are stored as salted Argon2id hashes in PHC string format. The
//! cost parameters are the argon2 crate defaults and are the same for every
//! account.

use anyhow::{anyhow, Result};
use argon2::{password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rand::rngs::OsRng;

/// Hash a plaintext password with a fresh random salt.
pub fn hash(plaintext: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|_| anyhow!("failed to hash password"))?
        .to_string();

    Ok(hash)
}

/// Verify a plaintext password against a stored PHC hash string.
///
/// Returns `Ok(false)` on mismatch; `Err` only when the stored value is not a
/// parseable hash.
pub fn verify(plaintext: &str, stored_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored_hash).map_err(|_| anyhow!("invalid password hash"))?;

    Ok(Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_value_is_never_the_plaintext() {
        let stored = hash("hunter22").unwrap();
        assert_ne!(stored, "hunter22");
        assert!(stored.starts_with("$argon2"));
    }

    #[test]
    fn round_trip_verifies() {
        let stored = hash("correct horse battery staple").unwrap();
        assert!(verify("correct horse battery staple", &stored).unwrap());
    }

    #[test]
    fn wrong_password_fails_verification() {
        let stored = hash("hunter22").unwrap();
        assert!(!verify("hunter23", &stored).unwrap());
    }

    #[test]
    fn salts_are_random_per_hash() {
        let first = hash("hunter22").unwrap();
        let second = hash("hunter22").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn garbage_stored_hash_is_an_error() {
        assert!(verify("hunter22", "not-a-phc-string").is_err());
    }
}
