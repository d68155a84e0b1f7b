//! Media store.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rand::Rng;
use tokio::{fs, io::AsyncWriteExt, sync::OnceCell};
use tracing::{debug, warn};

use crate::domain::media::{
    ALLOWED_MEDIA_TYPES, MAX_UPLOAD_BYTES, MediaStoreError, PRODUCTS_MEDIA_DIR, StoredFile,
    StoredFileEntry, StoredImagePath, Upload,
};

/// Exclusive upper bound of the random part of generated file names.
const FILE_NAME_RANDOM_BOUND: u32 = 1_000_000_000;

/// Media store backed by a directory on local disk.
#[derive(Debug)]
pub struct LocalMediaStore {
    directory: PathBuf,
    ready: OnceCell<()>,
}

impl LocalMediaStore {
    /// Create a store writing under `<uploads_root>/products`.
    ///
    /// Nothing touches the disk until first use.
    #[must_use]
    pub fn new(uploads_root: impl AsRef<Path>) -> Self {
        Self {
            directory: uploads_root.as_ref().join(PRODUCTS_MEDIA_DIR),
            ready: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Location on disk of a stored image.
    #[must_use]
    pub fn resolve(&self, path: &StoredImagePath) -> PathBuf {
        self.directory.join(path.file_name())
    }

    async fn ensure_directory(&self) -> Result<(), MediaStoreError> {
        self.ready
            .get_or_try_init(|| async {
                fs::create_dir_all(&self.directory).await?;

                debug!(directory = %self.directory.display(), "media directory ready");

                Ok::<(), MediaStoreError>(())
            })
            .await?;

        Ok(())
    }

    async fn write_new_file(&self, target: &Path, bytes: &[u8]) -> Result<(), MediaStoreError> {
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(target)
            .await?;

        let written = async {
            file.write_all(bytes).await?;
            file.sync_all().await
        }
        .await;

        if let Err(source) = written {
            drop(file);

            if let Err(cleanup) = fs::remove_file(target).await {
                warn!(path = %target.display(), "failed to remove partial upload: {cleanup}");
            }

            return Err(source.into());
        }

        Ok(())
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn store(&self, upload: Upload) -> Result<StoredFile, MediaStoreError> {
        validate_upload(&upload)?;

        self.ensure_directory().await?;

        let path = StoredImagePath::from_file_name(&generate_file_name(
            Timestamp::now(),
            rand::thread_rng().gen_range(0..FILE_NAME_RANDOM_BOUND),
            upload.extension(),
        ))?;

        self.write_new_file(&self.resolve(&path), &upload.bytes)
            .await?;

        debug!(%path, size = upload.size(), "stored upload");

        Ok(StoredFile {
            path,
            size: upload.size() as u64,
            content_type: upload.content_type,
        })
    }

    async fn remove(&self, path: &StoredImagePath) {
        match fs::remove_file(self.resolve(path)).await {
            Ok(()) => debug!(%path, "removed stored media"),
            Err(source) if source.kind() == ErrorKind::NotFound => {
                warn!(%path, "stored media already absent");
            }
            Err(source) => warn!(%path, "failed to remove stored media: {source}"),
        }
    }

    async fn list(&self) -> Result<Vec<StoredFileEntry>, MediaStoreError> {
        self.ensure_directory().await?;

        let mut entries = fs::read_dir(&self.directory).await?;
        let mut files = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let metadata = entry.metadata().await?;

            if !metadata.is_file() {
                continue;
            }

            let Some(path) = entry
                .file_name()
                .to_str()
                .and_then(|name| StoredImagePath::from_file_name(name).ok())
            else {
                continue;
            };

            let modified = metadata
                .modified()
                .ok()
                .and_then(|time| Timestamp::try_from(time).ok())
                .unwrap_or_else(Timestamp::now);

            files.push(StoredFileEntry { path, modified });
        }

        files.sort_by(|a, b| a.path.cmp(&b.path));

        Ok(files)
    }
}

#[automock]
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Validate and persist an upload, returning its public path.
    async fn store(&self, upload: Upload) -> Result<StoredFile, MediaStoreError>;

    /// Delete a stored file. Failures are logged, never returned.
    async fn remove(&self, path: &StoredImagePath);

    /// Enumerate the files currently held by the store.
    async fn list(&self) -> Result<Vec<StoredFileEntry>, MediaStoreError>;
}

/// Check an upload against the MIME allow-list and the size ceiling.
///
/// # Errors
///
/// Returns [`MediaStoreError::InvalidMediaType`] or [`MediaStoreError::MediaTooLarge`].
pub fn validate_upload(upload: &Upload) -> Result<(), MediaStoreError> {
    let content_type = upload.content_type.trim().to_ascii_lowercase();

    if !ALLOWED_MEDIA_TYPES.contains(&content_type.as_str()) {
        return Err(MediaStoreError::InvalidMediaType(upload.content_type.clone()));
    }

    if upload.size() > MAX_UPLOAD_BYTES {
        return Err(MediaStoreError::MediaTooLarge {
            size: upload.size(),
            limit: MAX_UPLOAD_BYTES,
        });
    }

    Ok(())
}

/// `<unix-millis>-<random>[.<ext>]`
fn generate_file_name(now: Timestamp, random: u32, extension: Option<&str>) -> String {
    let millis = now.as_millisecond();

    match extension {
        Some(ext) => format!("{millis}-{random}.{ext}"),
        None => format!("{millis}-{random}"),
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use testresult::TestResult;

    use super::*;

    fn jpeg(size: usize) -> Upload {
        Upload::new("lamp.jpeg", "image/jpeg", vec![0xFF; size])
    }

    async fn file_count(directory: &Path) -> usize {
        let Ok(mut entries) = fs::read_dir(directory).await else {
            return 0;
        };

        let mut count = 0;

        while let Ok(Some(_entry)) = entries.next_entry().await {
            count += 1;
        }

        count
    }

    #[test]
    fn generated_name_has_millis_random_and_extension() -> TestResult {
        let now: Timestamp = "2026-01-02T03:04:05.678Z".parse()?;

        assert_eq!(
            generate_file_name(now, 42, Some("png")),
            format!("{}-42.png", now.as_millisecond())
        );
        assert_eq!(
            generate_file_name(now, 7, None),
            format!("{}-7", now.as_millisecond())
        );

        Ok(())
    }

    #[test]
    fn validate_accepts_every_allowed_type() {
        for content_type in ALLOWED_MEDIA_TYPES {
            let upload = Upload::new("a.img", content_type, vec![1, 2, 3]);

            assert!(
                validate_upload(&upload).is_ok(),
                "{content_type} should be accepted"
            );
        }
    }

    #[test]
    fn validate_accepts_exactly_the_size_limit() {
        assert!(validate_upload(&jpeg(MAX_UPLOAD_BYTES)).is_ok());
    }

    #[tokio::test]
    async fn store_keeps_the_original_extension() -> TestResult {
        let root = TempDir::new()?;
        let store = LocalMediaStore::new(root.path());

        for (name, content_type, ext) in [
            ("lamp.jpeg", "image/jpeg", ".jpeg"),
            ("chair.png", "image/png", ".png"),
            ("anim.GIF", "image/gif", ".GIF"),
            ("pic.webp", "image/webp", ".webp"),
        ] {
            let stored = store
                .store(Upload::new(name, content_type, vec![1, 2, 3]))
                .await?;

            assert!(
                stored.path.as_str().starts_with("/uploads/products/"),
                "unexpected path {}",
                stored.path
            );
            assert!(
                stored.path.as_str().ends_with(ext),
                "{} should end with {ext}",
                stored.path
            );
            assert!(store.resolve(&stored.path).is_file());
        }

        Ok(())
    }

    #[tokio::test]
    async fn store_writes_the_uploaded_bytes() -> TestResult {
        let root = TempDir::new()?;
        let store = LocalMediaStore::new(root.path());

        let stored = store
            .store(Upload::new("a.png", "image/png", b"not really a png".to_vec()))
            .await?;

        assert_eq!(stored.size, 16);
        assert_eq!(stored.content_type, "image/png");
        assert_eq!(
            fs::read(store.resolve(&stored.path)).await?,
            b"not really a png"
        );

        Ok(())
    }

    #[tokio::test]
    async fn store_rejects_disallowed_types_without_writing() -> TestResult {
        let root = TempDir::new()?;
        let store = LocalMediaStore::new(root.path());

        for content_type in ["application/pdf", "image/svg+xml", "text/plain", ""] {
            let result = store
                .store(Upload::new("doc.pdf", content_type, vec![1, 2, 3]))
                .await;

            assert!(
                matches!(result, Err(MediaStoreError::InvalidMediaType(_))),
                "expected InvalidMediaType for {content_type:?}, got {result:?}"
            );
        }

        assert_eq!(file_count(store.directory()).await, 0);

        Ok(())
    }

    #[tokio::test]
    async fn store_rejects_oversized_uploads_without_writing() -> TestResult {
        let root = TempDir::new()?;
        let store = LocalMediaStore::new(root.path());

        let result = store.store(jpeg(MAX_UPLOAD_BYTES + 1)).await;

        assert!(
            matches!(
                result,
                Err(MediaStoreError::MediaTooLarge { size, limit })
                    if size == MAX_UPLOAD_BYTES + 1 && limit == MAX_UPLOAD_BYTES
            ),
            "expected MediaTooLarge, got {result:?}"
        );
        assert_eq!(file_count(store.directory()).await, 0);

        Ok(())
    }

    #[tokio::test]
    async fn first_use_creates_the_directory() -> TestResult {
        let root = TempDir::new()?;
        let store = LocalMediaStore::new(root.path().join("nested").join("uploads"));

        assert!(!store.directory().exists());

        store.store(jpeg(10)).await?;
        store.store(jpeg(10)).await?;

        assert!(store.directory().is_dir());
        assert_eq!(file_count(store.directory()).await, 2);

        Ok(())
    }

    #[tokio::test]
    async fn remove_deletes_the_file_and_is_idempotent() -> TestResult {
        let root = TempDir::new()?;
        let store = LocalMediaStore::new(root.path());

        let stored = store.store(jpeg(10)).await?;

        store.remove(&stored.path).await;
        store.remove(&stored.path).await;

        assert!(!store.resolve(&stored.path).exists());

        Ok(())
    }

    #[tokio::test]
    async fn list_returns_stored_files() -> TestResult {
        let root = TempDir::new()?;
        let store = LocalMediaStore::new(root.path());

        let first = store.store(jpeg(10)).await?;
        let second = store.store(jpeg(10)).await?;

        let listed: Vec<StoredImagePath> =
            store.list().await?.into_iter().map(|entry| entry.path).collect();

        assert_eq!(listed.len(), 2, "expected two files");
        assert!(listed.contains(&first.path));
        assert!(listed.contains(&second.path));

        Ok(())
    }
}
