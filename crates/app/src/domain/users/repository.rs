//! Users Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::domain::users::{
    records::{ActiveSessionTokenRecord, UserCredentialsRecord, UserRecord, UserUuid},
    tokens::SessionTokenVersion,
};

const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const GET_USER_SQL: &str = include_str!("sql/get_user.sql");
const FIND_USER_CREDENTIALS_BY_EMAIL_SQL: &str =
    include_str!("sql/find_user_credentials_by_email.sql");
const CREATE_USER_TOKEN_SQL: &str = include_str!("sql/create_user_token.sql");
const FIND_ACTIVE_USER_TOKEN_SQL: &str = include_str!("sql/find_active_user_token.sql");
const TOUCH_USER_TOKEN_SQL: &str = include_str!("sql/touch_user_token.sql");
const REVOKE_USER_TOKEN_SQL: &str = include_str!("sql/revoke_user_token.sql");

#[derive(Debug, Clone)]
pub(crate) struct PgUsersRepository {
    pool: PgPool,
}

impl PgUsersRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn create_user(
        &self,
        uuid: UserUuid,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(CREATE_USER_SQL)
            .bind(uuid.into_uuid())
            .bind(username)
            .bind(email)
            .bind(password_hash)
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn get_user(&self, uuid: UserUuid) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(GET_USER_SQL)
            .bind(uuid.into_uuid())
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentialsRecord>, sqlx::Error> {
        query_as::<Postgres, UserCredentialsRecord>(FIND_USER_CREDENTIALS_BY_EMAIL_SQL)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
    }

    /// Insert a session token, returning the expiry computed by the database.
    pub(crate) async fn create_token(
        &self,
        token_uuid: Uuid,
        user: UserUuid,
        version: SessionTokenVersion,
        token_hash: &str,
        ttl_hours: Option<i32>,
    ) -> Result<Option<Timestamp>, sqlx::Error> {
        let expires_at: Option<SqlxTimestamp> = query_scalar(CREATE_USER_TOKEN_SQL)
            .bind(token_uuid)
            .bind(user.into_uuid())
            .bind(version.as_i16())
            .bind(token_hash)
            .bind(ttl_hours)
            .fetch_one(&self.pool)
            .await?;

        Ok(expires_at.map(SqlxTimestamp::to_jiff))
    }

    pub(crate) async fn find_active_token(
        &self,
        token_uuid: Uuid,
        version: SessionTokenVersion,
    ) -> Result<Option<ActiveSessionTokenRecord>, sqlx::Error> {
        query_as::<Postgres, ActiveSessionTokenRecord>(FIND_ACTIVE_USER_TOKEN_SQL)
            .bind(token_uuid)
            .bind(version.as_i16())
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn touch_token(&self, token_uuid: Uuid) -> Result<(), sqlx::Error> {
        query(TOUCH_USER_TOKEN_SQL)
            .bind(token_uuid)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Revoke a token, returning whether it was still active.
    pub(crate) async fn revoke_token(&self, token_uuid: Uuid) -> Result<bool, sqlx::Error> {
        let rows_affected = query(REVOKE_USER_TOKEN_SQL)
            .bind(token_uuid)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }
}

impl<'r> FromRow<'r, PgRow> for UserRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for UserCredentialsRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            password_hash: row.try_get("password_hash")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ActiveSessionTokenRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            token_hash: row.try_get("token_hash")?,
        })
    }
}
