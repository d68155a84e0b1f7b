//! Owner gate for product mutations.

use crate::domain::{
    products::{errors::ProductsServiceError, records::ProductRecord},
    users::records::UserUuid,
};

/// Allow only the product's owner through.
///
/// # Errors
///
/// Returns [`ProductsServiceError::Forbidden`] when `acting` does not own the product.
pub fn ensure_owner(product: &ProductRecord, acting: UserUuid) -> Result<(), ProductsServiceError> {
    if product.owner.uuid == acting {
        Ok(())
    } else {
        Err(ProductsServiceError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rust_decimal::Decimal;

    use crate::domain::products::records::{ProductOwner, ProductUuid};

    use super::*;

    fn owned_by(owner: UserUuid) -> ProductRecord {
        ProductRecord {
            uuid: ProductUuid::new(),
            owner: ProductOwner {
                uuid: owner,
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
            },
            name: "Lamp".to_string(),
            description: None,
            price: Decimal::ONE,
            category: "Maison".to_string(),
            image: None,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn owner_is_allowed() {
        let owner = UserUuid::new();

        assert!(ensure_owner(&owned_by(owner), owner).is_ok());
    }

    #[test]
    fn anyone_else_is_forbidden() {
        let result = ensure_owner(&owned_by(UserUuid::new()), UserUuid::new());

        assert!(
            matches!(result, Err(ProductsServiceError::Forbidden)),
            "expected Forbidden, got {result:?}"
        );
    }
}
