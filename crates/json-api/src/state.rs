//! Shared handler state

use std::sync::Arc;

use vitrine_app::context::AppContext;

/// Injected into the depot once per request; handlers reach the services through `app`.
#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
}

impl State {
    #[must_use]
    pub(crate) fn from_app_context(app: AppContext) -> Arc<Self> {
        Arc::new(Self { app })
    }
}
