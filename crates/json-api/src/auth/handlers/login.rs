//! Login Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use vitrine_app::domain::users::data::Credentials;

use crate::{
    auth::{errors::into_status_error, models::UserResponse},
    extensions::*,
    state::State,
};

/// Login Request
#[derive(Deserialize, Serialize, ToSchema)]
pub(crate) struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Login Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginResponse {
    /// Bearer token; it is only ever returned here
    pub token: String,

    /// When the token stops being accepted, if ever
    pub expires_at: Option<String>,

    pub user: UserResponse,
}

/// Login Handler
#[endpoint(
    tags("auth"),
    summary = "Log In",
    responses(
        (status_code = StatusCode::OK, description = "Session issued"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid credentials"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<LoginResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let LoginRequest { email, password } = json.into_inner();

    let session = state
        .app
        .users
        .login(Credentials { email, password })
        .await
        .map_err(into_status_error)?;

    Ok(Json(LoginResponse {
        token: session.token,
        expires_at: session.expires_at.map(|at| at.to_string()),
        user: session.user.into(),
    }))
}
