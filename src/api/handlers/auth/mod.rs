//! Registration and login.
//!
//! Neither endpoint sits behind the bearer gate: they produce the
//! credentials the gate later checks. Login deliberately answers unknown
//! usernames and wrong passwords with the same error so usernames cannot be
//! enumerated.

pub mod password;
pub mod principal;
pub mod storage;
pub mod tokens;
pub mod types;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, error, instrument};

use self::storage::SignupOutcome;
use self::tokens::{IdentityClaim, TokenSigner, SESSION_TTL_SECONDS};
use self::types::{Credentials, LoginResponse};
use crate::api::handlers::{is_blank, message_response, ApiMessage};

#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = Credentials,
    responses (
        (status = 201, description = "Registration successful", body = ApiMessage, content_type = "application/json"),
        (status = 400, description = "Missing fields or username already taken", body = ApiMessage),
        (status = 500, description = "Server error", body = ApiMessage),
    ),
    tag = "auth"
)]
// axum handler for register
#[instrument(skip(pool, payload))]
pub async fn register(
    pool: Extension<PgPool>,
    payload: Option<Json<Credentials>>,
) -> impl IntoResponse {
    let Some(Json(credentials)) = payload else {
        return message_response(StatusCode::BAD_REQUEST, "Missing username or password.");
    };

    if is_blank(&credentials.username) || is_blank(&credentials.password) {
        return message_response(StatusCode::BAD_REQUEST, "Missing username or password.");
    }

    debug!("register: {}", credentials.username);

    let password_hash = match password::hash_password(&credentials.password) {
        Ok(hash) => hash,
        Err(err) => {
            error!("Error hashing password: {:?}", err);
            return message_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server error during registration.",
            );
        }
    };

    match storage::insert_user(&pool, &credentials.username, &password_hash).await {
        Ok(SignupOutcome::Created(_)) => message_response(
            StatusCode::CREATED,
            "Registration successful! You can log in now.",
        ),
        Ok(SignupOutcome::Conflict) => {
            debug!("Username already taken");
            message_response(StatusCode::BAD_REQUEST, "This username is already taken.")
        }
        Err(err) => {
            error!("Error inserting user: {:?}", err);
            message_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server error during registration.",
            )
        }
    }
}

#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = Credentials,
    responses (
        (status = 200, description = "Login successful", body = LoginResponse, content_type = "application/json"),
        (status = 400, description = "Invalid username or password", body = ApiMessage),
        (status = 500, description = "Server error", body = ApiMessage),
    ),
    tag = "auth"
)]
// axum handler for login
#[instrument(skip(pool, signer, payload))]
pub async fn login(
    pool: Extension<PgPool>,
    signer: Extension<Arc<TokenSigner>>,
    payload: Option<Json<Credentials>>,
) -> Response {
    let Some(Json(credentials)) = payload else {
        return message_response(StatusCode::BAD_REQUEST, "Missing username or password.")
            .into_response();
    };

    if is_blank(&credentials.username) || is_blank(&credentials.password) {
        return message_response(StatusCode::BAD_REQUEST, "Missing username or password.")
            .into_response();
    }

    debug!("login: {}", credentials.username);

    let user = match storage::find_by_username(&pool, &credentials.username).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            // Same answer as a wrong password: do not reveal which part failed.
            debug!("User not found");
            return invalid_credentials();
        }
        Err(err) => {
            error!("Error getting user from database: {:?}", err);
            return message_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server error during login.",
            )
            .into_response();
        }
    };

    if !password::verify_password(&credentials.password, &user.password_hash) {
        debug!("Password verification failed");
        return invalid_credentials();
    }

    let identity = IdentityClaim {
        id: user.id,
        username: user.username.clone(),
    };

    match signer.issue(identity, SESSION_TTL_SECONDS) {
        Ok(token) => {
            debug!("Login successful");
            (
                StatusCode::OK,
                Json(LoginResponse {
                    message: "Login successful!".to_string(),
                    token,
                    username: user.username,
                }),
            )
                .into_response()
        }
        Err(err) => {
            error!("Error issuing session token: {:?}", err);
            message_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server error during login.",
            )
            .into_response()
        }
    }
}

fn invalid_credentials() -> Response {
    message_response(StatusCode::BAD_REQUEST, "Invalid username or password.").into_response()
}
