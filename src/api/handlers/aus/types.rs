use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A community-submitted Alternate Universe record.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone)]
pub struct Au {
    pub id: Uuid,
    pub name: String,
    pub author: String,
    pub desc: String,
    pub link: String,
    pub created: DateTime<Utc>,
    /// User id of the creator; deletes require this to match the caller.
    pub created_by: Uuid,
    /// Username of the creator, resolved when listing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by_username: Option<String>,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct NewAu {
    pub name: String,
    pub author: String,
    pub desc: String,
    pub link: Option<String>,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct AuCreated {
    pub message: String,
    pub au: Au,
}
