//! Create Product Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, prelude::*};

use crate::{
    extensions::*,
    products::{
        errors::into_status_error,
        models::ProductResponse,
        payload::{ProductPayload, read_payload},
    },
    state::State,
};

/// Create Product Handler
///
/// Accepts JSON, or multipart form data with the image file in the `image`
/// field.
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::PAYLOAD_TOO_LARGE, description = "Image too large"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let owner = depot.user_uuid_or_401()?;

    let ProductPayload { fields, upload } = read_payload(req).await?;

    let product = state
        .app
        .products
        .create_product(owner, fields.into_new_product()?, upload)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/api/products/{}", product.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use salvo::{
        http::header::CONTENT_TYPE,
        test::{ResponseExt, TestClient},
    };
    use serde_json::json;
    use testresult::TestResult;

    use vitrine_app::domain::{
        media::MediaStoreError,
        products::{MockProductsService, ProductsServiceError, records::ProductUuid},
    };

    use crate::{
        products::payload::tests::{multipart_body, multipart_content_type},
        test_helpers::{TEST_USER_UUID, products_service},
    };

    use super::{super::tests::*, *};

    fn make_service(products: MockProductsService) -> Service {
        products_service(products, Router::with_path("products").post(handler))
    }

    #[tokio::test]
    async fn test_create_product_from_json() -> TestResult {
        let uuid = ProductUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .withf(|owner, product, upload| {
                *owner == TEST_USER_UUID
                    && product.name == "Lamp"
                    && product.price == Decimal::new(1999, 2)
                    && product.category == "Maison"
                    && product.image_url.as_deref() == Some("https://cdn.example.com/lamp.jpg")
                    && upload.is_none()
            })
            .return_once(move |_, _, _| Ok(make_product(uuid)));

        let mut res = TestClient::post("http://example.com/products")
            .json(&json!({
                "name": "Lamp",
                "price": 19.99,
                "category": "Maison",
                "image_url": "https://cdn.example.com/lamp.jpg",
            }))
            .send(&make_service(products))
            .await;

        let location = res
            .headers()
            .get("location")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body: ProductResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/api/products/{uuid}")));
        assert_eq!(body.id, uuid.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_from_multipart_passes_the_image() -> TestResult {
        let uuid = ProductUuid::new();
        let jpeg = vec![0xFF; 2048];
        let expected = jpeg.clone();

        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .withf(move |_, product, upload| {
                product.price == Decimal::new(1999, 2)
                    && upload.as_ref().is_some_and(|upload| {
                        upload.file_name == "lamp.jpeg"
                            && upload.content_type == "image/jpeg"
                            && upload.bytes == expected
                    })
            })
            .return_once(move |_, _, _| {
                Ok(with_stored_image(make_product(uuid), "1700000000000-1.jpeg"))
            });

        let mut res = TestClient::post("http://example.com/products")
            .add_header(CONTENT_TYPE, multipart_content_type(), true)
            .body(multipart_body(
                &[("name", "Lamp"), ("price", "19.99"), ("category", "Maison")],
                Some(("lamp.jpeg", "image/jpeg", jpeg.as_slice())),
            ))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let body: ProductResponse = res.take_json().await?;

        assert_eq!(
            body.image.as_deref(),
            Some("/uploads/products/1700000000000-1.jpeg")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_validation_failure_returns_400() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .return_once(|_, _, _| Err(ProductsServiceError::Validation("name is required".into())));

        let res = TestClient::post("http://example.com/products")
            .json(&json!({ "price": 10, "category": "Maison" }))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_without_price_never_reaches_the_service() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_create_product().never();

        let res = TestClient::post("http://example.com/products")
            .json(&json!({ "name": "Lamp", "category": "Maison" }))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_disallowed_type_returns_400() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_create_product().once().return_once(|_, _, _| {
            Err(MediaStoreError::InvalidMediaType("application/pdf".to_string()).into())
        });

        let res = TestClient::post("http://example.com/products")
            .add_header(CONTENT_TYPE, multipart_content_type(), true)
            .body(multipart_body(
                &[("name", "Lamp"), ("price", "5"), ("category", "Maison")],
                Some(("doc.pdf", "application/pdf", b"%PDF".as_slice())),
            ))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_oversized_image_returns_413() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_create_product().never();

        let res = TestClient::post("http://example.com/products")
            .add_header(CONTENT_TYPE, multipart_content_type(), true)
            .body(multipart_body(
                &[("name", "Lamp"), ("price", "5"), ("category", "Maison")],
                Some((
                    "big.jpeg",
                    "image/jpeg",
                    vec![0xFF; vitrine_app::domain::media::MAX_UPLOAD_BYTES + 1].as_slice(),
                )),
            ))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::PAYLOAD_TOO_LARGE));

        Ok(())
    }
}
