//! Argon2id password hashing.
//!
//! The PHC string carries the salt and parameters, so every hash of the same
//! input differs and verification needs no extra state. Presence checks on
//! the plaintext belong to the callers, not here.

use anyhow::{anyhow, Result};
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

/// Hash a plaintext password into a PHC string with a fresh random salt.
///
/// # Errors
///
/// Returns an error if the hashing parameters are rejected.
pub fn hash_password(plaintext: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| anyhow!("failed to hash password: {err}"))
}

/// Check a plaintext password against a stored PHC string.
///
/// An unparsable stored hash counts as a failed verification rather than an
/// error the caller could leak to the client.
#[must_use]
pub fn verify_password(plaintext: &str, password_hash: &str) -> bool {
    PasswordHash::new(password_hash).is_ok_and(|parsed| {
        Argon2::default()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_salted_per_call() {
        let first = hash_password("pw123!").unwrap();
        let second = hash_password("pw123!").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn hash_never_contains_plaintext() {
        let hash = hash_password("pw123!").unwrap();
        assert!(!hash.contains("pw123!"));
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn verify_accepts_correct_password() {
        let hash = hash_password("pw123!").unwrap();
        assert!(verify_password("pw123!", &hash));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let hash = hash_password("pw123!").unwrap();
        assert!(!verify_password("pw123?", &hash));
        assert!(!verify_password("", &hash));
    }

    #[test]
    fn verify_rejects_garbage_hash() {
        assert!(!verify_password("pw123!", "not-a-phc-string"));
        assert!(!verify_password("pw123!", ""));
    }
}
