use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Register and login share the same request shape.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub username: String,
}
