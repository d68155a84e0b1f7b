//! Auth Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use vitrine_app::domain::users::records::UserRecord;

/// Public view of a user; the password hash never leaves the service.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    /// User UUID
    pub id: Uuid,

    pub username: String,

    pub email: String,

    /// The date and time the user registered
    pub created_at: String,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        UserResponse {
            id: user.uuid.into(),
            username: user.username,
            email: user.email,
            created_at: user.created_at.to_string(),
        }
    }
}
