//! Cancel Appointment Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    appointments::{complete::AppointmentResponse, errors::into_status_error},
    extensions::*,
    state::State,
};

/// Cancel Appointment Handler
///
/// Cancels a scheduled appointment. A booking that consumed a credit gets
/// it refunded.
#[endpoint(
    tags("appointments"),
    summary = "Cancel Appointment",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Appointment cancelled"),
        (status_code = StatusCode::CONFLICT, description = "Appointment is not scheduled"),
        (status_code = StatusCode::NOT_FOUND, description = "Appointment not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    appointment: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<AppointmentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;

    let appointment = state
        .app
        .appointments
        .cancel_appointment(tenant, appointment.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(appointment.into()))
}
