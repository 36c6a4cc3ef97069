//! API handlers and shared response helpers.

pub mod aus;
pub mod auth;
pub mod health;
pub mod root;

use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JSON body shared by every response that only carries a human-readable
/// message, success and error alike.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct ApiMessage {
    pub message: String,
}

impl ApiMessage {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub(crate) fn message_response(
    status: StatusCode,
    message: &str,
) -> (StatusCode, Json<ApiMessage>) {
    (status, Json(ApiMessage::new(message)))
}

/// Field-presence guard: clients may send a field but leave it blank.
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
