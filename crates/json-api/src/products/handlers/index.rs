//! Product Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use vitrine_app::domain::products::ProductFilter;

use crate::{
    extensions::*,
    products::{
        errors::{filter_status_error, into_status_error},
        models::ProductResponse,
    },
    state::State,
};

/// Product Index Handler
///
/// Lists every product as a bare JSON array, optionally filtered by `name` (case-insensitive
/// substring), `category` (exact), `minPrice` and `maxPrice` (inclusive).
#[endpoint(
    tags("products"),
    summary = "List Products",
    responses(
        (status_code = StatusCode::OK, description = "Matching products"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unparseable price bound"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Vec<ProductResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let filter = ProductFilter::from_params(req.queries().iter())
        .map_err(|error| filter_status_error(&error))?;

    let products = state
        .app
        .products
        .list_products(&filter)
        .await
        .map_err(into_status_error)?;

    Ok(Json(products.into_iter().map(Into::into).collect()))
}
