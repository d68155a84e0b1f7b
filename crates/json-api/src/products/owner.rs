//! Owner gate.
//!
//! Lets a request through only when the authenticated user owns the
//! `{product}` in its path. Must run after the auth middleware.

use std::sync::Arc;

use salvo::prelude::*;
use uuid::Uuid;

use crate::{extensions::*, products::errors::into_status_error, state::State};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if let Err(status) = authorize(req, depot).await {
        res.render(status);

        return;
    }

    ctrl.call_next(req, depot, res).await;
}

async fn authorize(req: &Request, depot: &Depot) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let acting = depot.user_uuid_or_401()?;

    let product = req
        .param::<Uuid>("product")
        .ok_or_else(|| StatusError::bad_request().brief("Invalid product id"))?;

    state
        .app
        .products
        .authorize(acting, product.into())
        .await
        .map_err(into_status_error)
}
