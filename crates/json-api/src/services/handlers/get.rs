//! Get Service Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use navalha_app::domain::services::models::Service as CatalogService;

use crate::{extensions::*, services::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ServiceResponse {
    /// The unique identifier of the service
    pub uuid: Uuid,

    /// The display name of the service
    pub name: String,

    /// The price of the service in cents
    pub price: u64,

    /// How long the service takes, in minutes
    pub duration_minutes: Option<i32>,

    /// The date and time the service was created
    pub created_at: String,
}

impl From<CatalogService> for ServiceResponse {
    fn from(service: CatalogService) -> Self {
        ServiceResponse {
            uuid: service.uuid.into(),
            name: service.name,
            price: service.price,
            duration_minutes: service.duration_minutes,
            created_at: service.created_at.to_string(),
        }
    }
}

/// Get Service Handler
///
/// Returns a catalog service.
#[endpoint(
    tags("services"),
    summary = "Get Service",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    service: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ServiceResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;

    let service = state
        .app
        .services
        .get_service(tenant, service.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(service.into()))
}
