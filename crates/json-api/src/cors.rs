//! Cross-origin request handling.

use salvo::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, Cors, CorsHandler},
    http::{
        HeaderValue, Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
};
use tracing::warn;

use crate::config::cors::CorsConfig;

/// Build the service-level CORS hoop; it also answers preflight requests.
pub(crate) fn cors_handler(config: &CorsConfig) -> CorsHandler {
    let origins = if config.allows_any_origin() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(config.cors_allowed_origins.iter().filter_map(|origin| {
            HeaderValue::from_str(origin.trim())
                .inspect_err(|_invalid| warn!(%origin, "ignoring invalid CORS origin"))
                .ok()
        }))
    };

    Cors::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([AUTHORIZATION, CONTENT_TYPE]))
        .into_handler()
}

#[cfg(test)]
mod tests {
    use salvo::{prelude::*, test::TestClient};
    use testresult::TestResult;

    use super::*;

    #[handler]
    async fn ok(res: &mut Response) {
        res.render("ok");
    }

    fn make_service(origins: &[&str]) -> Service {
        let config = CorsConfig {
            cors_allowed_origins: origins.iter().map(ToString::to_string).collect(),
        };

        Service::new(Router::with_path("api/products").get(ok)).hoop(cors_handler(&config))
    }

    fn allow_origin(res: &Response) -> Option<&str> {
        res.headers()
            .get("access-control-allow-origin")
            .and_then(|value| value.to_str().ok())
    }

    #[tokio::test]
    async fn wildcard_allows_any_origin() -> TestResult {
        let res = TestClient::get("http://example.com/api/products")
            .add_header("origin", "http://localhost:3000", true)
            .send(&make_service(&["*"]))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(allow_origin(&res), Some("*"));

        Ok(())
    }

    #[tokio::test]
    async fn listed_origins_are_echoed_and_others_are_not() -> TestResult {
        let service = make_service(&["http://localhost:3000", "https://shop.example.com"]);

        let res = TestClient::get("http://example.com/api/products")
            .add_header("origin", "https://shop.example.com", true)
            .send(&service)
            .await;

        assert_eq!(allow_origin(&res), Some("https://shop.example.com"));

        let res = TestClient::get("http://example.com/api/products")
            .add_header("origin", "https://evil.example.com", true)
            .send(&service)
            .await;

        assert_eq!(allow_origin(&res), None);

        Ok(())
    }

    #[tokio::test]
    async fn preflight_allows_bearer_updates() -> TestResult {
        let res = TestClient::options("http://example.com/api/products")
            .add_header("origin", "http://localhost:3000", true)
            .add_header("access-control-request-method", "PUT", true)
            .add_header("access-control-request-headers", "authorization", true)
            .send(&make_service(&["*"]))
            .await;

        assert_eq!(allow_origin(&res), Some("*"));

        let methods = res
            .headers()
            .get("access-control-allow-methods")
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        assert!(methods.contains("PUT"), "unexpected methods {methods:?}");

        Ok(())
    }
}
