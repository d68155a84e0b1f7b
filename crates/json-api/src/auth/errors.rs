//! Auth Errors

use salvo::http::StatusError;
use tracing::error;

use vitrine_app::domain::users::UsersServiceError;

pub(crate) fn into_status_error(error: UsersServiceError) -> StatusError {
    match error {
        UsersServiceError::AlreadyExists => {
            StatusError::conflict().brief("Username or email already registered")
        }
        UsersServiceError::Validation(message) => StatusError::bad_request().brief(message),
        UsersServiceError::InvalidCredentials | UsersServiceError::Token(_) => {
            StatusError::unauthorized().brief("Invalid credentials")
        }
        UsersServiceError::NotFound => StatusError::not_found().brief("User not found"),
        UsersServiceError::Sql(source) => {
            error!("users storage failure: {source}");

            StatusError::internal_server_error().brief("Storage failure")
        }
        UsersServiceError::PasswordHash(source) => {
            error!("password hashing failure: {source}");

            StatusError::internal_server_error().brief("Authentication failure")
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn maps_each_error_to_its_status() {
        for (error, status) in [
            (UsersServiceError::AlreadyExists, StatusCode::CONFLICT),
            (
                UsersServiceError::Validation("password too short".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (UsersServiceError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (UsersServiceError::NotFound, StatusCode::NOT_FOUND),
        ] {
            let label = error.to_string();

            assert_eq!(into_status_error(error).code, status, "{label}");
        }
    }
}
