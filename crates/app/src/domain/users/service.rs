//! Users service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::users::{
    data::{Credentials, IssuedSession, NewUser, normalize_email},
    errors::UsersServiceError,
    passwords::{hash_password, verify_password},
    records::{UserRecord, UserUuid},
    repository::PgUsersRepository,
    tokens::{
        ParsedSessionToken, SessionTokenVersion, format_session_token,
        generate_session_token_secret, parse_session_token, session_token_verifier,
        verifier_matches,
    },
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    repository: PgUsersRepository,
    session_ttl_hours: Option<u16>,
}

impl PgUsersService {
    /// `session_ttl_hours` of `None` issues sessions that never expire.
    #[must_use]
    pub fn new(pool: PgPool, session_ttl_hours: Option<u16>) -> Self {
        Self {
            repository: PgUsersRepository::new(pool),
            session_ttl_hours,
        }
    }

    async fn verify_session(
        &self,
        bearer_token: &str,
    ) -> Result<(ParsedSessionToken, UserUuid), UsersServiceError> {
        let parsed =
            parse_session_token(bearer_token).map_err(|_| UsersServiceError::InvalidCredentials)?;

        let token = self
            .repository
            .find_active_token(parsed.token_uuid, parsed.version)
            .await?
            .ok_or(UsersServiceError::InvalidCredentials)?;

        let expected = session_token_verifier(
            &parsed.token_uuid,
            parsed.version,
            &token.user_uuid,
            &parsed.secret,
        );

        if !verifier_matches(&expected, &token.token_hash) {
            return Err(UsersServiceError::InvalidCredentials);
        }

        Ok((parsed, token.user_uuid))
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn register(&self, user: NewUser) -> Result<UserRecord, UsersServiceError> {
        let user = user.validate()?;

        let password_hash =
            hash_password(&user.password).map_err(UsersServiceError::PasswordHash)?;

        let created = self
            .repository
            .create_user(UserUuid::new(), &user.username, &user.email, &password_hash)
            .await?;

        debug!(user = %created.uuid, "registered user");

        Ok(created)
    }

    async fn login(&self, credentials: Credentials) -> Result<IssuedSession, UsersServiceError> {
        let email =
            normalize_email(&credentials.email).map_err(|_| UsersServiceError::InvalidCredentials)?;

        let Some(stored) = self.repository.find_credentials_by_email(&email).await? else {
            return Err(UsersServiceError::InvalidCredentials);
        };

        let valid = verify_password(&credentials.password, &stored.password_hash)
            .map_err(UsersServiceError::PasswordHash)?;

        if !valid {
            return Err(UsersServiceError::InvalidCredentials);
        }

        let token_uuid = Uuid::now_v7();
        let version = SessionTokenVersion::V1;
        let secret = generate_session_token_secret();
        let token = format_session_token(token_uuid, version, &secret);
        let token_hash = session_token_verifier(&token_uuid, version, &stored.uuid, &secret);

        let expires_at = self
            .repository
            .create_token(
                token_uuid,
                stored.uuid,
                version,
                &token_hash,
                self.session_ttl_hours.map(i32::from),
            )
            .await?;

        let user = self.repository.get_user(stored.uuid).await?;

        debug!(user = %user.uuid, "issued session token");

        Ok(IssuedSession {
            token,
            expires_at,
            user,
        })
    }

    async fn logout(&self, bearer_token: &str) -> Result<(), UsersServiceError> {
        let (parsed, user) = self.verify_session(bearer_token).await?;

        if !self.repository.revoke_token(parsed.token_uuid).await? {
            return Err(UsersServiceError::InvalidCredentials);
        }

        debug!(%user, "revoked session token");

        Ok(())
    }

    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserUuid, UsersServiceError> {
        let (parsed, user) = self.verify_session(bearer_token).await?;

        // Bookkeeping only; authentication already succeeded.
        if let Err(error) = self.repository.touch_token(parsed.token_uuid).await {
            warn!("failed to record session token use: {error}");
        }

        Ok(user)
    }

    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError> {
        Ok(self.repository.get_user(user).await?)
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Register a new user with a hashed password.
    async fn register(&self, user: NewUser) -> Result<UserRecord, UsersServiceError>;

    /// Check a password and issue a fresh session token.
    async fn login(&self, credentials: Credentials) -> Result<IssuedSession, UsersServiceError>;

    /// Revoke the session identified by a bearer token.
    async fn logout(&self, bearer_token: &str) -> Result<(), UsersServiceError>;

    /// Resolve a bearer token to the user it was issued to.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserUuid, UsersServiceError>;

    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError>;
}
