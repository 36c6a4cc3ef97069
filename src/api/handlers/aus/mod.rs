//! AU listing, creation, and deletion.
//!
//! Listing is public. Creation and deletion go through the bearer gate, and
//! deletion additionally requires ownership of the record. The gate only
//! decides; fetching and deleting stay in the storage layer.

pub mod storage;
pub mod types;

use axum::{
    extract::{Extension, Path},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, error, instrument};
use uuid::Uuid;

use self::types::{Au, AuCreated, NewAu};
use crate::api::handlers::auth::principal::{authorize_owner, require_auth};
use crate::api::handlers::auth::tokens::TokenSigner;
use crate::api::handlers::{is_blank, message_response, ApiMessage};

#[utoipa::path(
    get,
    path = "/aus",
    responses (
        (status = 200, description = "All AUs, newest first", body = [Au], content_type = "application/json"),
        (status = 500, description = "Server error", body = ApiMessage),
    ),
    tag = "aus"
)]
// axum handler for listing
#[instrument(skip(pool))]
pub async fn list(pool: Extension<PgPool>) -> Response {
    match storage::list_all(&pool).await {
        Ok(aus) => (StatusCode::OK, Json(aus)).into_response(),
        Err(err) => {
            error!("Error listing aus: {:?}", err);
            message_response(StatusCode::INTERNAL_SERVER_ERROR, "Server error.").into_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/aus",
    request_body = NewAu,
    responses (
        (status = 201, description = "AU saved", body = AuCreated, content_type = "application/json"),
        (status = 400, description = "Missing AU name, author, or description", body = ApiMessage),
        (status = 401, description = "No token presented", body = ApiMessage),
        (status = 403, description = "Invalid or expired token", body = ApiMessage),
        (status = 500, description = "Server error", body = ApiMessage),
    ),
    security(("bearer" = [])),
    tag = "aus"
)]
// axum handler for creation
#[instrument(skip(pool, signer, headers, payload))]
pub async fn create(
    pool: Extension<PgPool>,
    signer: Extension<Arc<TokenSigner>>,
    headers: HeaderMap,
    payload: Option<Json<NewAu>>,
) -> Response {
    let principal = match require_auth(&headers, &signer) {
        Ok(principal) => principal,
        Err(rejection) => return rejection.into_response(),
    };

    let Some(Json(new_au)) = payload else {
        return message_response(
            StatusCode::BAD_REQUEST,
            "Missing AU name, author, or description.",
        )
        .into_response();
    };

    if is_blank(&new_au.name) || is_blank(&new_au.author) || is_blank(&new_au.desc) {
        return message_response(
            StatusCode::BAD_REQUEST,
            "Missing AU name, author, or description.",
        )
        .into_response();
    }

    debug!("create au {} by {}", new_au.name, principal.username);

    match storage::insert(&pool, &new_au, principal.user_id).await {
        Ok(au) => (
            StatusCode::CREATED,
            Json(AuCreated {
                message: "AU saved!".to_string(),
                au,
            }),
        )
            .into_response(),
        Err(err) => {
            error!("Error inserting au: {:?}", err);
            message_response(StatusCode::INTERNAL_SERVER_ERROR, "Server error while saving.")
                .into_response()
        }
    }
}

#[utoipa::path(
    delete,
    path = "/aus/{id}",
    params(
        ("id" = String, Path, description = "AU id"),
    ),
    responses (
        (status = 200, description = "AU deleted", body = ApiMessage, content_type = "application/json"),
        (status = 401, description = "No token presented", body = ApiMessage),
        (status = 403, description = "Invalid token or not the owner", body = ApiMessage),
        (status = 404, description = "No AU with that id", body = ApiMessage),
        (status = 500, description = "Server error", body = ApiMessage),
    ),
    security(("bearer" = [])),
    tag = "aus"
)]
// axum handler for deletion
#[instrument(skip(pool, signer, headers))]
pub async fn delete(
    pool: Extension<PgPool>,
    signer: Extension<Arc<TokenSigner>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let principal = match require_auth(&headers, &signer) {
        Ok(principal) => principal,
        Err(rejection) => return rejection.into_response(),
    };

    // A non-UUID id cannot name a stored record.
    let Ok(au_id) = id.parse::<Uuid>() else {
        return not_found();
    };

    let au = match storage::find_by_id(&pool, au_id).await {
        Ok(Some(au)) => au,
        Ok(None) => return not_found(),
        Err(err) => {
            error!("Error looking up au: {:?}", err);
            return message_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server error while deleting.",
            )
            .into_response();
        }
    };

    if let Err(rejection) = authorize_owner(&principal, au.created_by) {
        debug!("delete of {} denied for {}", au_id, principal.username);
        return rejection.into_response();
    }

    match storage::delete_by_id(&pool, au_id).await {
        // The record can vanish between lookup and delete; answer as if the
        // first read had missed.
        Ok(false) => not_found(),
        Ok(true) => message_response(StatusCode::OK, "AU deleted.").into_response(),
        Err(err) => {
            error!("Error deleting au: {:?}", err);
            message_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server error while deleting.",
            )
            .into_response()
        }
    }
}

fn not_found() -> Response {
    message_response(StatusCode::NOT_FOUND, "No AU found to delete.").into_response()
}
