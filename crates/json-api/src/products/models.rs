//! Product Models

use rust_decimal::prelude::ToPrimitive;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use vitrine_app::domain::products::records::{ProductOwner, ProductRecord};

/// Public details of a product's owner
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OwnerResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

impl From<ProductOwner> for OwnerResponse {
    fn from(owner: ProductOwner) -> Self {
        OwnerResponse {
            id: owner.uuid.into(),
            username: owner.username,
            email: owner.email,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub id: Uuid,

    pub name: String,

    pub description: Option<String>,

    /// The price of the product, two decimal places
    pub price: f64,

    pub category: String,

    /// External URL or `/uploads/products/...` path
    pub image: Option<String>,

    pub owner: OwnerResponse,

    /// The date and time the product was created
    pub created_at: String,

    /// The date and time the product was last updated
    pub updated_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        ProductResponse {
            id: product.uuid.into(),
            price: product.price.to_f64().unwrap_or_default(),
            image: product.image.as_ref().map(|image| image.as_str().to_owned()),
            name: product.name,
            description: product.description,
            category: product.category,
            owner: product.owner.into(),
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}
