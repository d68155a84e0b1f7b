//! User Data

use jiff::Timestamp;

use crate::domain::users::{errors::UsersServiceError, records::UserRecord};

/// Shortest accepted password.
pub const MIN_PASSWORD_CHARS: usize = 6;

/// Registration request.
#[derive(Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl NewUser {
    /// Trim and normalise the fields, rejecting anything unusable.
    ///
    /// # Errors
    ///
    /// Returns [`UsersServiceError::Validation`] naming the first offending field.
    pub fn validate(self) -> Result<Self, UsersServiceError> {
        let username = self.username.trim().to_owned();
        let email = normalize_email(&self.email)?;

        if username.is_empty() {
            return Err(UsersServiceError::Validation(
                "username is required".to_string(),
            ));
        }

        if self.password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(UsersServiceError::Validation(format!(
                "password must be at least {MIN_PASSWORD_CHARS} characters"
            )));
        }

        Ok(Self {
            username,
            email,
            password: self.password,
        })
    }
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Email and password presented at login.
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Session issued by a successful login. `token` is never persisted.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub expires_at: Option<Timestamp>,
    pub user: UserRecord,
}

pub(crate) fn normalize_email(email: &str) -> Result<String, UsersServiceError> {
    let email = email.trim().to_lowercase();

    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());

    if !valid || email.chars().any(char::is_whitespace) {
        return Err(UsersServiceError::Validation(
            "a valid email is required".to_string(),
        ));
    }

    Ok(email)
}
