//! HS256 session tokens.
//!
//! A token is `base64url(header).base64url(claims).base64url(hmac)`, signed
//! with a single process-wide secret. The signature is checked before the
//! claims are decoded, so a tampered token can never surface as `Expired`.

use base64ct::{Base64UrlUnpadded, Encoding};
use chrono::Utc;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;
use uuid::Uuid;

/// Session lifetime: 3 hours. Expiry is the only termination path, there is
/// no refresh and no revocation list.
pub const SESSION_TTL_SECONDS: i64 = 3 * 60 * 60;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionTokenHeader {
    pub alg: String,
    pub typ: String,
}

impl SessionTokenHeader {
    fn hs256() -> Self {
        Self {
            alg: "HS256".to_string(),
            typ: "JWT".to_string(),
        }
    }
}

/// Minimal user-identifying data embedded in a token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdentityClaim {
    pub id: Uuid,
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    pub user: IdentityClaim,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid token format")]
    TokenFormat,
    #[error("invalid base64url encoding")]
    Base64,
    #[error("invalid json")]
    Json(#[from] serde_json::Error),
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlg(String),
    #[error("invalid signing key")]
    Key,
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
}

fn b64e_json<T: Serialize>(value: &T) -> Result<String, Error> {
    let json = serde_json::to_vec(value)?;
    Ok(Base64UrlUnpadded::encode_string(&json))
}

fn b64d_json<T: for<'de> Deserialize<'de>>(s: &str) -> Result<T, Error> {
    let bytes = Base64UrlUnpadded::decode_vec(s).map_err(|_| Error::Base64)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Issues and verifies session tokens with a single secret held for the
/// lifetime of the process.
#[derive(Debug, Clone)]
pub struct TokenSigner {
    secret: SecretString,
}

impl TokenSigner {
    #[must_use]
    pub fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    fn mac(&self) -> Result<HmacSha256, Error> {
        HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes()).map_err(|_| Error::Key)
    }

    /// Create a signed session token for `user` expiring `ttl_seconds` from now.
    ///
    /// # Errors
    ///
    /// Returns an error if the claims cannot be encoded or the key is unusable.
    pub fn issue(&self, user: IdentityClaim, ttl_seconds: i64) -> Result<String, Error> {
        let now = Utc::now().timestamp();
        self.issue_with_timestamps(user, now, now + ttl_seconds)
    }

    /// Create a signed session token with explicit `iat`/`exp` timestamps.
    ///
    /// # Errors
    ///
    /// Returns an error if the claims cannot be encoded or the key is unusable.
    pub fn issue_with_timestamps(
        &self,
        user: IdentityClaim,
        iat: i64,
        exp: i64,
    ) -> Result<String, Error> {
        let header_b64 = b64e_json(&SessionTokenHeader::hs256())?;
        let claims_b64 = b64e_json(&SessionClaims { user, iat, exp })?;
        let signing_input = format!("{header_b64}.{claims_b64}");

        let mut mac = self.mac()?;
        mac.update(signing_input.as_bytes());
        let signature_b64 = Base64UrlUnpadded::encode_string(&mac.finalize().into_bytes());

        Ok(format!("{signing_input}.{signature_b64}"))
    }

    /// Verify a session token and return its decoded claims.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the token is malformed or contains invalid base64/json,
    /// - the signature does not match,
    /// - the token is past its expiry.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, Error> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verify against an explicit clock reading.
    ///
    /// # Errors
    ///
    /// Same conditions as [`TokenSigner::verify`].
    pub fn verify_at(&self, token: &str, now_unix_seconds: i64) -> Result<SessionClaims, Error> {
        let mut parts = token.split('.');
        let header_b64 = parts.next().ok_or(Error::TokenFormat)?;
        let claims_b64 = parts.next().ok_or(Error::TokenFormat)?;
        let sig_b64 = parts.next().ok_or(Error::TokenFormat)?;
        if parts.next().is_some() {
            return Err(Error::TokenFormat);
        }

        let header: SessionTokenHeader = b64d_json(header_b64)?;
        if header.alg != "HS256" {
            return Err(Error::UnsupportedAlg(header.alg));
        }

        // Signature first: claims are untrusted until the tag checks out.
        let signing_input = format!("{header_b64}.{claims_b64}");
        let signature = Base64UrlUnpadded::decode_vec(sig_b64).map_err(|_| Error::Base64)?;
        let mut mac = self.mac()?;
        mac.update(signing_input.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| Error::InvalidSignature)?;

        let claims: SessionClaims = b64d_json(claims_b64)?;
        if claims.exp <= now_unix_seconds {
            return Err(Error::Expired);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> TokenSigner {
        TokenSigner::new(SecretString::from("test-secret".to_string()))
    }

    fn identity() -> IdentityClaim {
        IdentityClaim {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
        }
    }

    #[test]
    fn issue_then_verify_round_trips_identity() {
        let signer = signer();
        let user = identity();

        let token = signer.issue(user.clone(), SESSION_TTL_SECONDS).unwrap();
        let claims = signer.verify(&token).unwrap();

        assert_eq!(claims.user, user);
        assert_eq!(claims.exp - claims.iat, SESSION_TTL_SECONDS);
    }

    #[test]
    fn token_expires_one_second_past_ttl() {
        let signer = signer();
        let iat = 1_700_000_000;
        let token = signer
            .issue_with_timestamps(identity(), iat, iat + SESSION_TTL_SECONDS)
            .unwrap();

        assert!(signer
            .verify_at(&token, iat + SESSION_TTL_SECONDS - 1)
            .is_ok());
        assert!(matches!(
            signer.verify_at(&token, iat + SESSION_TTL_SECONDS + 1),
            Err(Error::Expired)
        ));
    }

    #[test]
    fn tampered_signature_is_invalid_not_expired() {
        let signer = signer();
        let iat = 1_700_000_000;
        // Already-expired token: the signature check must still win.
        let token = signer
            .issue_with_timestamps(identity(), iat, iat + 1)
            .unwrap();

        let mut bytes = token.into_bytes();
        let last = bytes.len() - 1;
        bytes[last] = if bytes[last] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        assert!(matches!(
            signer.verify_at(&tampered, iat + SESSION_TTL_SECONDS + 1),
            Err(Error::InvalidSignature | Error::Base64)
        ));
    }

    #[test]
    fn tampered_claims_fail_signature_check() {
        let signer = signer();
        let token = signer.issue(identity(), SESSION_TTL_SECONDS).unwrap();

        let mut parts: Vec<&str> = token.split('.').collect();
        let forged_claims = b64e_json(&SessionClaims {
            user: IdentityClaim {
                id: Uuid::new_v4(),
                username: "mallory".to_string(),
            },
            iat: 0,
            exp: i64::MAX,
        })
        .unwrap();
        parts[1] = &forged_claims;
        let forged = parts.join(".");

        assert!(matches!(
            signer.verify(&forged),
            Err(Error::InvalidSignature)
        ));
    }

    #[test]
    fn verify_rejects_other_secret() {
        let token = signer().issue(identity(), SESSION_TTL_SECONDS).unwrap();
        let other = TokenSigner::new(SecretString::from("other-secret".to_string()));

        assert!(matches!(
            other.verify(&token),
            Err(Error::InvalidSignature)
        ));
    }

    #[test]
    fn verify_rejects_malformed_tokens() {
        let signer = signer();

        assert!(matches!(signer.verify(""), Err(Error::TokenFormat)));
        assert!(matches!(signer.verify("a.b"), Err(Error::TokenFormat)));
        assert!(matches!(signer.verify("a.b.c.d"), Err(Error::TokenFormat)));
        assert!(matches!(
            signer.verify("!!!.???.###"),
            Err(Error::Base64 | Error::Json(_))
        ));
    }

    #[test]
    fn verify_rejects_unsupported_algorithm() {
        let signer = signer();
        let header_b64 = b64e_json(&SessionTokenHeader {
            alg: "none".to_string(),
            typ: "JWT".to_string(),
        })
        .unwrap();
        let claims_b64 = b64e_json(&SessionClaims {
            user: identity(),
            iat: 0,
            exp: i64::MAX,
        })
        .unwrap();
        let token = format!("{header_b64}.{claims_b64}.");

        assert!(matches!(
            signer.verify(&token),
            Err(Error::UnsupportedAlg(alg)) if alg == "none"
        ));
    }
}
