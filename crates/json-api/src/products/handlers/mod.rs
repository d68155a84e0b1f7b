//! Product Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod mine;
pub(crate) mod update;

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rust_decimal::Decimal;

    use vitrine_app::domain::{
        media::{ImageRef, StoredImagePath},
        products::records::{ProductOwner, ProductRecord, ProductUuid},
        users::records::UserUuid,
    };

    use crate::test_helpers::TEST_USER_UUID;

    pub(super) fn make_owner(uuid: UserUuid) -> ProductOwner {
        ProductOwner {
            uuid,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
        }
    }

    pub(super) fn make_product(uuid: ProductUuid) -> ProductRecord {
        ProductRecord {
            uuid,
            owner: make_owner(TEST_USER_UUID),
            name: "Lamp".to_string(),
            description: None,
            price: Decimal::new(1999, 2),
            category: "Maison".to_string(),
            image: None,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    pub(super) fn with_stored_image(mut product: ProductRecord, file_name: &str) -> ProductRecord {
        product.image = StoredImagePath::from_file_name(file_name)
            .ok()
            .map(ImageRef::Stored);

        product
    }
}
