//! User Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// User UUID
pub type UserUuid = TypedUuid<UserRecord>;

/// User Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub uuid: UserUuid,
    pub username: String,
    pub email: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Stored password verifier for a user.
#[derive(Debug, Clone)]
pub(crate) struct UserCredentialsRecord {
    pub uuid: UserUuid,
    pub password_hash: String,
}

/// Non-revoked, non-expired session token.
#[derive(Debug, Clone)]
pub(crate) struct ActiveSessionTokenRecord {
    pub user_uuid: UserUuid,
    pub token_hash: String,
}
