//! Test context for service-level integration tests.

use std::sync::Arc;

use tempfile::TempDir;
use tokio::fs;

use crate::{
    database::Db,
    domain::{media::LocalMediaStore, products::PgProductsService, users::PgUsersService},
};

use super::db::TestDb;

pub struct TestContext {
    pub db: TestDb,
    pub media_root: TempDir,
    pub media: Arc<LocalMediaStore>,
    pub users: PgUsersService,
    pub products: PgProductsService,
}

impl TestContext {
    pub async fn new() -> Self {
        let db = TestDb::new().await;
        let media_root = TempDir::new().expect("Failed to create media directory");
        let media = Arc::new(LocalMediaStore::new(media_root.path()));

        Self {
            users: PgUsersService::new(db.pool().clone(), Some(24)),
            products: PgProductsService::new(Db::new(db.pool().clone()), media.clone()),
            media,
            media_root,
            db,
        }
    }

    /// Number of files currently in the products media directory.
    pub async fn stored_file_count(&self) -> std::io::Result<usize> {
        let mut entries = match fs::read_dir(self.media.directory()).await {
            Ok(entries) => entries,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(error) => return Err(error),
        };

        let mut count = 0;

        while entries.next_entry().await?.is_some() {
            count += 1;
        }

        Ok(count)
    }
}
