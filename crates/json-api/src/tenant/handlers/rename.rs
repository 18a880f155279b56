//! Rename Tenant Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    state::State,
    tenant::{errors::into_status_error, get::TenantResponse},
};

/// Rename Tenant Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RenameTenantRequest {
    pub name: String,
}

/// Rename Tenant Handler
#[endpoint(
    tags("tenant"),
    summary = "Rename Tenant",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Tenant renamed"),
        (status_code = StatusCode::NOT_FOUND, description = "Tenant not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RenameTenantRequest>,
    depot: &mut Depot,
) -> Result<Json<TenantResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;

    let tenant = state
        .app
        .tenants
        .rename_tenant(tenant, json.into_inner().name)
        .await
        .map_err(into_status_error)?;

    Ok(Json(tenant.into()))
}
