//! Test Helpers

use rust_decimal::Decimal;

use crate::{
    domain::{
        media::Upload,
        products::{ProductsService, ProductsServiceError, data::NewProduct, records::ProductRecord},
        users::{
            UsersService, UsersServiceError,
            data::NewUser,
            records::{UserRecord, UserUuid},
        },
    },
    test::TestContext,
};

/// Register `<name>@example.com` with password `password`.
pub(crate) async fn register_user(
    ctx: &TestContext,
    name: &str,
) -> Result<UserRecord, UsersServiceError> {
    ctx.users
        .register(NewUser {
            username: name.to_string(),
            email: format!("{name}@example.com"),
            password: "password".to_string(),
        })
        .await
}

pub(crate) fn lamp() -> NewProduct {
    NewProduct {
        name: "Lamp".to_string(),
        description: Some("Warm light".to_string()),
        price: Decimal::new(1999, 2),
        category: "Maison".to_string(),
        image_url: None,
    }
}

pub(crate) fn jpeg(size: usize) -> Upload {
    Upload::new("photo.jpeg", "image/jpeg", vec![0xFF; size])
}

pub(crate) async fn create_product(
    ctx: &TestContext,
    owner: UserUuid,
    name: &str,
    price: Decimal,
    category: &str,
) -> Result<ProductRecord, ProductsServiceError> {
    ctx.products
        .create_product(
            owner,
            NewProduct {
                name: name.to_string(),
                price,
                category: category.to_string(),
                ..lamp()
            },
            None,
        )
        .await
}
