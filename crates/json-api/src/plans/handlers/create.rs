//! Create Plan Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use navalha_app::domain::plans::models::NewPlan;

use crate::{extensions::*, plans::errors::into_status_error, state::State};

/// Create Plan Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreatePlanRequest {
    pub uuid: Uuid,
    pub name: String,
    pub price: u64,
    pub credits_per_month: i32,
}

impl From<CreatePlanRequest> for NewPlan {
    fn from(request: CreatePlanRequest) -> Self {
        NewPlan {
            uuid: request.uuid.into(),
            name: request.name,
            price: request.price,
            credits_per_month: request.credits_per_month,
        }
    }
}

/// Plan Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PlanCreatedResponse {
    /// Created plan UUID
    pub uuid: Uuid,
}

/// Create Plan Handler
#[endpoint(
    tags("plans"),
    summary = "Create Plan",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Plan created"),
        (status_code = StatusCode::CONFLICT, description = "Plan already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreatePlanRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<PlanCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;

    let uuid = state
        .app
        .plans
        .create_plan(tenant, json.into_inner().into())
        .await
        .map_err(into_status_error)?
        .uuid;

    res.add_header(LOCATION, format!("/plans/{uuid}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(PlanCreatedResponse { uuid: uuid.into() }))
}
