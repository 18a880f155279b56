//! State

use std::sync::Arc;

use navalha_app::context::AppContext;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) jwt_secret: String,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, jwt_secret: String) -> Self {
        Self { app, jwt_secret }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: AppContext, jwt_secret: String) -> Arc<Self> {
        Arc::new(Self::new(app, jwt_secret))
    }
}
