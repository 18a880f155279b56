//! Get Tenant Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use navalha_app::domain::tenants::models::Tenant;

use crate::{extensions::*, state::State, tenant::errors::into_status_error};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TenantResponse {
    /// The unique identifier of the tenant
    pub uuid: Uuid,

    /// The display name of the barbershop
    pub name: String,

    /// The URL-safe shop identifier
    pub slug: String,

    /// The wall-clock time used when a booking omits one
    pub default_appointment_time: String,

    /// The date and time the tenant was provisioned
    pub created_at: String,
}

impl From<Tenant> for TenantResponse {
    fn from(tenant: Tenant) -> Self {
        TenantResponse {
            uuid: tenant.uuid.into(),
            name: tenant.name,
            slug: tenant.slug,
            default_appointment_time: tenant.default_appointment_time.to_string(),
            created_at: tenant.created_at.to_string(),
        }
    }
}

/// Get Tenant Handler
///
/// Returns the tenant the bearer token is scoped to.
#[endpoint(
    tags("tenant"),
    summary = "Get Tenant",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<TenantResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;

    let tenant = state
        .app
        .tenants
        .get_tenant(tenant)
        .await
        .map_err(into_status_error)?;

    Ok(Json(tenant.into()))
}
