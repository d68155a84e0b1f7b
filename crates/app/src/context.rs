//! App Context

use std::{path::Path, sync::Arc};

use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        media::LocalMediaStore,
        products::{PgProductsService, ProductsService},
        users::{PgUsersService, UsersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub users: Arc<dyn UsersService>,
}

impl AppContext {
    /// Build application context from a database URL and an uploads directory.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        uploads_dir: impl AsRef<Path>,
        session_ttl_hours: Option<u16>,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let media = Arc::new(LocalMediaStore::new(uploads_dir));

        Ok(Self {
            products: Arc::new(PgProductsService::new(Db::new(pool.clone()), media)),
            users: Arc::new(PgUsersService::new(pool, session_ttl_hours)),
        })
    }
}
