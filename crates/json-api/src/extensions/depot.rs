//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use vitrine_app::domain::users::records::UserUuid;

const USER_UUID_DEPOT_KEY: &str = "vitrine.user_uuid";
const BEARER_TOKEN_DEPOT_KEY: &str = "vitrine.bearer_token";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Record the authenticated user and the token they presented.
    fn insert_session(&mut self, user: UserUuid, bearer_token: String);

    fn user_uuid_or_401(&self) -> Result<UserUuid, StatusError>;

    fn bearer_token_or_401(&self) -> Result<&str, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_session(&mut self, user: UserUuid, bearer_token: String) {
        self.insert(USER_UUID_DEPOT_KEY, user);
        self.insert(BEARER_TOKEN_DEPOT_KEY, bearer_token);
    }

    fn user_uuid_or_401(&self) -> Result<UserUuid, StatusError> {
        self.get::<UserUuid>(USER_UUID_DEPOT_KEY)
            .copied()
            .map_err(|_ignored| StatusError::unauthorized())
    }

    fn bearer_token_or_401(&self) -> Result<&str, StatusError> {
        self.get::<String>(BEARER_TOKEN_DEPOT_KEY)
            .map(String::as_str)
            .map_err(|_ignored| StatusError::unauthorized())
    }
}
