//! Product Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    domain::{
        media::{ImageRef, StoredImagePath},
        users::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Public details of the user owning a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductOwner {
    pub uuid: UserUuid,
    pub username: String,
    pub email: String,
}

/// Product Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub owner: ProductOwner,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: String,
    pub image: Option<ImageRef>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProductRecord {
    /// Stored image file owned by this product, if any.
    #[must_use]
    pub fn stored_image(&self) -> Option<&StoredImagePath> {
        self.image.as_ref().and_then(ImageRef::stored_path)
    }
}
