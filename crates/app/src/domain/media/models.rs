//! Media Models

use std::{
    ffi::OsStr,
    fmt::{self, Display, Formatter},
    path::Path,
};

use jiff::Timestamp;

use crate::domain::media::MediaStoreError;

/// MIME types accepted for product images.
pub const ALLOWED_MEDIA_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

/// Largest accepted upload, in bytes (5 MiB).
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Sub-directory of the uploads root holding product images.
pub const PRODUCTS_MEDIA_DIR: &str = "products";

/// Public path prefix of every stored product image.
pub const STORED_IMAGE_PREFIX: &str = "/uploads/products/";

/// Upload candidate, as received from a client.
#[derive(Clone)]
pub struct Upload {
    /// Client-supplied file name; only its extension is kept.
    pub file_name: String,

    /// Declared MIME type.
    pub content_type: String,

    pub bytes: Vec<u8>,
}

impl Upload {
    #[must_use]
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Extension of the original file name, when it is a plain alphanumeric one.
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        Path::new(&self.file_name)
            .extension()
            .and_then(OsStr::to_str)
            .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
    }
}

impl fmt::Debug for Upload {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Upload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// Public, server-relative path of a stored image: `/uploads/products/<file>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StoredImagePath(String);

impl StoredImagePath {
    /// Build a path from a bare generated file name.
    ///
    /// # Errors
    ///
    /// Returns [`MediaStoreError::InvalidPath`] when the name is not a flat file name.
    pub fn from_file_name(file_name: &str) -> Result<Self, MediaStoreError> {
        if !is_flat_file_name(file_name) {
            return Err(MediaStoreError::InvalidPath);
        }

        Ok(Self(format!("{STORED_IMAGE_PREFIX}{file_name}")))
    }

    /// Parse a full public path.
    ///
    /// # Errors
    ///
    /// Returns [`MediaStoreError::InvalidPath`] when the prefix is wrong or the
    /// file name could escape the products directory.
    pub fn parse(path: &str) -> Result<Self, MediaStoreError> {
        path.strip_prefix(STORED_IMAGE_PREFIX)
            .ok_or(MediaStoreError::InvalidPath)
            .and_then(Self::from_file_name)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        self.0
            .strip_prefix(STORED_IMAGE_PREFIX)
            .unwrap_or(self.0.as_str())
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Display for StoredImagePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_flat_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.starts_with('.')
        && !name.contains(['/', '\\', '\0'])
}

/// File written by the media store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub path: StoredImagePath,
    pub size: u64,
    pub content_type: String,
}

/// File currently present in the media store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFileEntry {
    pub path: StoredImagePath,
    pub modified: Timestamp,
}

/// Image attached to a product.
///
/// External URLs are never touched by media cleanup; only `Stored` images
/// are owned by the media store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    External(String),
    Stored(StoredImagePath),
}

impl ImageRef {
    /// Accept an absolute `http`/`https` URL as an external image.
    #[must_use]
    pub fn external(url: &str) -> Option<Self> {
        let url = url.trim();

        let rest = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"))?;

        let host = rest.split(['/', '?', '#']).next().unwrap_or_default();

        if host.is_empty() || url.chars().any(char::is_whitespace) {
            return None;
        }

        Some(Self::External(url.to_owned()))
    }

    /// Rebuild an image reference from its two persisted columns.
    ///
    /// # Errors
    ///
    /// Returns [`MediaStoreError::InvalidPath`] when a stored path is malformed.
    pub fn from_columns(
        url: Option<String>,
        path: Option<String>,
    ) -> Result<Option<Self>, MediaStoreError> {
        match (path, url) {
            (Some(path), _) => StoredImagePath::parse(&path).map(|path| Some(Self::Stored(path))),
            (None, Some(url)) => Ok(Some(Self::External(url))),
            (None, None) => Ok(None),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::External(url) => url,
            Self::Stored(path) => path.as_str(),
        }
    }

    #[must_use]
    pub fn stored_path(&self) -> Option<&StoredImagePath> {
        match self {
            Self::External(_) => None,
            Self::Stored(path) => Some(path),
        }
    }

    #[must_use]
    pub fn external_url(&self) -> Option<&str> {
        match self {
            Self::External(url) => Some(url),
            Self::Stored(_) => None,
        }
    }
}
