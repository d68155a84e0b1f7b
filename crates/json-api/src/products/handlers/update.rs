//! Update Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    products::{
        errors::into_status_error,
        models::ProductResponse,
        payload::{ProductPayload, read_payload},
    },
    state::State,
};

/// Update Product Handler
///
/// Absent fields are left unchanged; an empty `description` or `image_url`
/// clears it. A file in the `image` field replaces the current image.
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Product belongs to another user"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::PAYLOAD_TOO_LARGE, description = "Image too large"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let ProductPayload { fields, upload } = read_payload(req).await?;

    let product = state
        .app
        .products
        .update_product(product.into_inner().into(), fields.into_update()?, upload)
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}
