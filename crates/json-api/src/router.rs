//! App Router

use std::path::Path;

use salvo::{Router, serve_static::StaticDir};

use crate::{auth, products};

/// JSON API under `/api`.
pub(crate) fn api_router() -> Router {
    Router::with_path("api")
        .push(
            Router::with_path("auth")
                .push(Router::with_path("register").post(auth::register::handler))
                .push(Router::with_path("login").post(auth::login::handler))
                .push(
                    Router::new()
                        .hoop(auth::middleware::handler)
                        .push(Router::with_path("logout").post(auth::logout::handler))
                        .push(Router::with_path("profile").get(auth::profile::handler)),
                ),
        )
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(
                    Router::new()
                        .hoop(auth::middleware::handler)
                        .post(products::create::handler),
                )
                .push(
                    Router::with_path("my")
                        .hoop(auth::middleware::handler)
                        .get(products::mine::handler),
                )
                .push(
                    Router::with_path("{product}")
                        .get(products::get::handler)
                        .push(
                            Router::new()
                                .hoop(auth::middleware::handler)
                                .hoop(products::owner::handler)
                                .put(products::update::handler)
                                .delete(products::delete::handler),
                        ),
                ),
        )
}

/// Stored images, served from the uploads directory.
pub(crate) fn uploads_router(uploads_dir: &Path) -> Router {
    Router::with_path("uploads/{**path}").get(StaticDir::new([uploads_dir]).auto_list(false))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use salvo::{
        affix_state::inject,
        http::{StatusCode, header::AUTHORIZATION},
        prelude::Service,
        test::{ResponseExt, TestClient},
    };
    use tempfile::TempDir;
    use testresult::TestResult;

    use vitrine_app::{
        context::AppContext,
        domain::{
            products::{MockProductsService, records::ProductUuid},
            users::{MockUsersService, records::UserUuid},
        },
    };

    use crate::state::State;

    use super::*;

    fn make_service(products: MockProductsService, users: MockUsersService) -> Service {
        let state = State::from_app_context(AppContext {
            products: Arc::new(products),
            users: Arc::new(users),
        });

        Service::new(Router::new().hoop(inject(state)).push(api_router()))
    }

    fn accepting(user: UserUuid) -> MockUsersService {
        let mut users = MockUsersService::new();

        users
            .expect_authenticate_bearer()
            .returning(move |_| Ok(user));

        users
    }

    #[tokio::test]
    async fn anonymous_create_is_rejected_before_the_service() -> TestResult {
        let mut products = MockProductsService::new();
        products.expect_create_product().never();

        let mut users = MockUsersService::new();
        users.expect_authenticate_bearer().never();

        let res = TestClient::post("http://example.com/api/products")
            .json(&serde_json::json!({ "name": "Lamp", "price": 1, "category": "Maison" }))
            .send(&make_service(products, users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn listing_needs_no_token() -> TestResult {
        let mut products = MockProductsService::new();
        products
            .expect_list_products()
            .once()
            .return_once(|_| Ok(vec![]));

        let res = TestClient::get("http://example.com/api/products")
            .send(&make_service(products, MockUsersService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn my_products_is_not_mistaken_for_a_product_id() -> TestResult {
        let user = UserUuid::new();

        let mut products = MockProductsService::new();
        products.expect_get_product().never();
        products
            .expect_list_owner_products()
            .once()
            .withf(move |owner| *owner == user)
            .return_once(|_| Ok(vec![]));

        let res = TestClient::get("http://example.com/api/products/my")
            .add_header(AUTHORIZATION, "Bearer vt_v1_any.token", true)
            .send(&make_service(products, accepting(user)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn delete_runs_the_owner_gate_first() -> TestResult {
        let user = UserUuid::new();
        let product = ProductUuid::new();

        let mut products = MockProductsService::new();
        products
            .expect_authorize()
            .once()
            .withf(move |acting, target| *acting == user && *target == product)
            .return_once(|_, _| {
                Err(vitrine_app::domain::products::ProductsServiceError::Forbidden)
            });
        products.expect_delete_product().never();

        let res = TestClient::delete(format!("http://example.com/api/products/{product}"))
            .add_header(AUTHORIZATION, "Bearer vt_v1_any.token", true)
            .send(&make_service(products, accepting(user)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn uploads_are_served_from_disk() -> TestResult {
        let root = TempDir::new()?;
        std::fs::create_dir_all(root.path().join("products"))?;
        std::fs::write(root.path().join("products").join("1-2.png"), b"png bytes")?;

        let service = Service::new(Router::new().push(uploads_router(root.path())));

        let mut res = TestClient::get("http://example.com/uploads/products/1-2.png")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, "png bytes");

        let res = TestClient::get("http://example.com/uploads/products/missing.png")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
