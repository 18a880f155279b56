//! Delete Plan Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, plans::errors::into_status_error, state::State};

/// Delete Plan Handler
///
/// Removing a plan is refused while customers are still subscribed to it.
#[endpoint(
    tags("plans"),
    summary = "Delete Plan",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Plan deleted"),
        (status_code = StatusCode::CONFLICT, description = "Plan has active subscribers"),
        (status_code = StatusCode::NOT_FOUND, description = "Plan not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    plan: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;

    state
        .app
        .plans
        .delete_plan(tenant, plan.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}
