//! # auwiki
//!
//! `auwiki` is the community backend for Alternate Universe ("AU")
//! submissions. It exposes a small JSON API: user registration and login,
//! plus listing, creation, and deletion of AU records.
//!
//! ## Authentication
//!
//! Passwords are hashed with Argon2id before they touch the database; the
//! plaintext is never stored. A successful login issues an HS256-signed
//! session token with a 3 hour lifetime. There is no refresh or revocation:
//! expiry is the only way a token dies.
//!
//! ## Authorization
//!
//! Mutating AU endpoints require a `Authorization: Bearer <token>` header.
//! A missing token yields `401`, a present-but-invalid or expired token
//! yields `403`. Deleting an AU additionally requires that the caller is
//! the user who created it.

pub mod api;
pub mod cli;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
