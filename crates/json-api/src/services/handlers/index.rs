//! Service Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, services::get::ServiceResponse, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ServicesResponse {
    /// The list of services
    pub services: Vec<ServiceResponse>,
}

/// Service Index Handler
///
/// Returns the tenant's service catalog.
#[endpoint(
    tags("services"),
    summary = "List Services",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ServicesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;

    let services = state
        .app
        .services
        .list_services(tenant)
        .await
        .or_500("failed to fetch services")?;

    Ok(Json(ServicesResponse {
        services: services.into_iter().map(Into::into).collect(),
    }))
}
