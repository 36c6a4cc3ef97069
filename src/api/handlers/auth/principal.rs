//! Bearer-token gate and ownership check.
//!
//! Handlers call [`require_auth`] and branch on the result; there is no
//! middleware continuation. "No token at all" and "token present but bad"
//! stay distinct all the way to the status code: 401 for the former, 403
//! for the latter.

use axum::{
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use super::tokens::TokenSigner;
use crate::api::handlers::ApiMessage;

/// Authenticated user context derived from the bearer token.
#[derive(Clone, Debug)]
pub struct Principal {
    pub user_id: Uuid,
    pub username: String,
}

/// Why the gate rejected a request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GateRejection {
    /// No token presented at all.
    #[error("Log in to do this.")]
    Unauthenticated,
    /// Token presented but malformed, forged, or expired; or the caller does
    /// not own the record.
    #[error("{0}")]
    Forbidden(&'static str),
}

impl GateRejection {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
        }
    }
}

impl IntoResponse for GateRejection {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(ApiMessage::new(self.to_string()))).into_response()
    }
}

/// Resolve the `Authorization` header into a principal.
///
/// # Errors
///
/// `Unauthenticated` when no bearer token is present, `Forbidden` when a
/// token is present but fails verification for any reason.
pub fn require_auth(
    headers: &HeaderMap,
    signer: &TokenSigner,
) -> Result<Principal, GateRejection> {
    let Some(token) = extract_bearer_token(headers) else {
        return Err(GateRejection::Unauthenticated);
    };

    match signer.verify(&token) {
        Ok(claims) => Ok(Principal {
            user_id: claims.user.id,
            username: claims.user.username,
        }),
        Err(err) => {
            debug!("Rejected bearer token: {err}");
            Err(GateRejection::Forbidden(
                "Invalid or expired session token.",
            ))
        }
    }
}

/// Ownership predicate: the caller must be the user who created the record.
///
/// Both sides are canonical [`Uuid`] values, so this is a plain equality and
/// never an ad hoc string comparison.
///
/// # Errors
///
/// `Forbidden` when the record was created by someone else.
pub fn authorize_owner(principal: &Principal, created_by: Uuid) -> Result<(), GateRejection> {
    if principal.user_id == created_by {
        Ok(())
    } else {
        Err(GateRejection::Forbidden(
            "You cannot delete another user's AU.",
        ))
    }
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let trimmed = value.trim();
    let token = trimmed
        .strip_prefix("Bearer ")
        .or_else(|| trimmed.strip_prefix("bearer "))?
        .trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::handlers::auth::tokens::{IdentityClaim, SESSION_TTL_SECONDS};
    use axum::http::HeaderValue;
    use secrecy::SecretString;

    fn signer() -> TokenSigner {
        TokenSigner::new(SecretString::from("gate-test-secret".to_string()))
    }

    fn bearer_headers(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
        headers
    }

    #[test]
    fn missing_header_is_unauthenticated() {
        let headers = HeaderMap::new();
        assert_eq!(
            require_auth(&headers, &signer()).unwrap_err(),
            GateRejection::Unauthenticated
        );
    }

    #[test]
    fn empty_bearer_value_is_unauthenticated() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(
            require_auth(&headers, &signer()).unwrap_err(),
            GateRejection::Unauthenticated
        );
    }

    #[test]
    fn garbage_token_is_forbidden_not_unauthenticated() {
        let headers = bearer_headers("not-a-token");
        let rejection = require_auth(&headers, &signer()).unwrap_err();
        assert_eq!(rejection.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn valid_token_yields_principal() {
        let signer = signer();
        let user = IdentityClaim {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
        };
        let token = signer.issue(user.clone(), SESSION_TTL_SECONDS).unwrap();

        let principal = require_auth(&bearer_headers(&token), &signer).unwrap();
        assert_eq!(principal.user_id, user.id);
        assert_eq!(principal.username, "alice");
    }

    #[test]
    fn expired_token_is_forbidden() {
        let signer = signer();
        let user = IdentityClaim {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
        };
        let token = signer.issue_with_timestamps(user, 0, 1).unwrap();

        let rejection = require_auth(&bearer_headers(&token), &signer).unwrap_err();
        assert_eq!(rejection.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn lowercase_bearer_scheme_is_accepted() {
        let signer = signer();
        let user = IdentityClaim {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
        };
        let token = signer.issue(user, SESSION_TTL_SECONDS).unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("bearer {token}")).unwrap(),
        );
        assert!(require_auth(&headers, &signer).is_ok());
    }

    #[test]
    fn owner_check_is_plain_id_equality() {
        let id = Uuid::new_v4();
        let principal = Principal {
            user_id: id,
            username: "alice".to_string(),
        };

        assert!(authorize_owner(&principal, id).is_ok());

        let rejection = authorize_owner(&principal, Uuid::new_v4()).unwrap_err();
        assert_eq!(rejection.status(), StatusCode::FORBIDDEN);
    }
}
