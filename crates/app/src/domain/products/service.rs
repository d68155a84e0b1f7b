//! Products service.

use std::{collections::HashSet, sync::Arc};

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use tracing::{debug, info};

use crate::{
    database::Db,
    domain::{
        media::{ImageRef, MediaStore, StoredFile, StoredImagePath, Upload},
        products::{
            access::ensure_owner,
            data::{ImageChange, NewProduct, ProductUpdate, ProductWrite, ValidProductUpdate},
            errors::ProductsServiceError,
            filter::ProductFilter,
            records::{ProductRecord, ProductUuid},
            repository::PgProductsRepository,
        },
        users::records::UserUuid,
    },
};

#[derive(Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
    media: Arc<dyn MediaStore>,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db, media: Arc<dyn MediaStore>) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
            media,
        }
    }

    async fn store_upload(
        &self,
        upload: Option<Upload>,
    ) -> Result<Option<StoredFile>, ProductsServiceError> {
        match upload {
            Some(upload) => Ok(Some(self.media.store(upload).await?)),
            None => Ok(None),
        }
    }

    /// Remove a freshly stored file after the record write that needed it failed.
    async fn discard(&self, stored: Option<StoredFile>, error: &ProductsServiceError) {
        if let Some(file) = stored {
            debug!(path = %file.path, "discarding upload after failed write: {error}");

            self.media.remove(&file.path).await;
        }
    }

    async fn insert_product(
        &self,
        owner: UserUuid,
        write: &ProductWrite,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self
            .repository
            .create_product(&mut tx, ProductUuid::new(), owner, write)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    /// Returns the updated record and the stored image it displaced, if any.
    async fn write_update(
        &self,
        product: ProductUuid,
        update: ValidProductUpdate,
    ) -> Result<(ProductRecord, Option<StoredImagePath>), ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let current = self.repository.lock_product(&mut tx, product).await?;
        let write = update.apply_to(&current)?;

        let updated = self
            .repository
            .update_product(&mut tx, product, &write)
            .await?;

        tx.commit().await?;

        let displaced = current
            .stored_image()
            .filter(|old| updated.stored_image() != Some(*old))
            .cloned();

        Ok((updated, displaced))
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        filter: &ProductFilter,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let products = self.repository.list_products(&mut tx, filter).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn list_owner_products(
        &self,
        owner: UserUuid,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let products = self.repository.list_owner_products(&mut tx, owner).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(
        &self,
        owner: UserUuid,
        product: NewProduct,
        upload: Option<Upload>,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut write = product.validate()?;

        let stored = self.store_upload(upload).await?;

        if let Some(file) = &stored {
            write.image = Some(ImageRef::Stored(file.path.clone()));
        }

        match self.insert_product(owner, &write).await {
            Ok(created) => {
                info!(product = %created.uuid, owner = %owner, "created product");

                Ok(created)
            }
            Err(error) => {
                self.discard(stored, &error).await;

                Err(error)
            }
        }
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
        upload: Option<Upload>,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut update = update.validate()?;

        let stored = self.store_upload(upload).await?;

        if let Some(file) = &stored {
            update.image = ImageChange::Set(ImageRef::Stored(file.path.clone()));
        }

        match self.write_update(product, update).await {
            Ok((updated, displaced)) => {
                if let Some(old) = displaced {
                    self.media.remove(&old).await;
                }

                info!(product = %updated.uuid, "updated product");

                Ok(updated)
            }
            Err(error) => {
                self.discard(stored, &error).await;

                Err(error)
            }
        }
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let current = self.repository.lock_product(&mut tx, product).await?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        if let Some(path) = current.stored_image() {
            self.media.remove(path).await;
        }

        info!(%product, "deleted product");

        Ok(())
    }

    async fn authorize(
        &self,
        acting: UserUuid,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError> {
        let product = self.get_product(product).await?;

        ensure_owner(&product, acting)
    }

    async fn prune_orphaned_media(
        &self,
        grace: SignedDuration,
    ) -> Result<Vec<StoredImagePath>, ProductsServiceError> {
        let cutoff = Timestamp::now()
            .checked_sub(grace)
            .unwrap_or(Timestamp::MIN);

        // Files first: anything committed after this listing is young enough
        // to fall inside the grace period.
        let files = self.media.list().await?;

        let mut tx = self.db.begin_transaction().await?;
        let referenced: HashSet<String> = self
            .repository
            .list_image_paths(&mut tx)
            .await?
            .into_iter()
            .collect();
        tx.commit().await?;

        let mut removed = Vec::new();

        for file in files {
            if file.modified > cutoff || referenced.contains(file.path.as_str()) {
                continue;
            }

            self.media.remove(&file.path).await;
            removed.push(file.path);
        }

        info!(removed = removed.len(), "pruned orphaned media");

        Ok(removed)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// List every product matching the filter, oldest first.
    async fn list_products(
        &self,
        filter: &ProductFilter,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// List the products owned by one user, oldest first.
    async fn list_owner_products(
        &self,
        owner: UserUuid,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError>;

    /// Create a product, storing `upload` as its image when present.
    ///
    /// A stored upload is removed again if the record cannot be written.
    async fn create_product(
        &self,
        owner: UserUuid,
        product: NewProduct,
        upload: Option<Upload>,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Apply a partial update, replacing the image with `upload` when present.
    ///
    /// A displaced stored image is removed only after the update commits.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
        upload: Option<Upload>,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Delete a product and its stored image.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;

    /// Check that `acting` owns the product.
    async fn authorize(
        &self,
        acting: UserUuid,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError>;

    /// Remove stored files older than `grace` that no product references.
    async fn prune_orphaned_media(
        &self,
        grace: SignedDuration,
    ) -> Result<Vec<StoredImagePath>, ProductsServiceError>;
}
