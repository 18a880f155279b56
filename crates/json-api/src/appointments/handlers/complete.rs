//! Complete Appointment Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use navalha_app::domain::appointments::models::{Appointment, AppointmentStatus};

use crate::{appointments::errors::into_status_error, extensions::*, state::State};

pub(crate) fn status_label(status: AppointmentStatus) -> &'static str {
    match status {
        AppointmentStatus::Scheduled => "scheduled",
        AppointmentStatus::Canceled => "canceled",
        AppointmentStatus::Done => "done",
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AppointmentResponse {
    /// The unique identifier of the appointment
    pub uuid: Uuid,

    /// The customer the slot belongs to
    pub customer_uuid: Uuid,

    /// The service being performed
    pub service_uuid: Uuid,

    /// The booked slot
    pub scheduled_at: String,

    /// Lifecycle state of the appointment
    pub status: String,

    /// Whether the booking consumed a subscription credit
    pub used_credit: bool,

    /// The date and time the appointment was created
    pub created_at: String,
}

impl From<Appointment> for AppointmentResponse {
    fn from(appointment: Appointment) -> Self {
        AppointmentResponse {
            uuid: appointment.uuid.into(),
            customer_uuid: appointment.customer_uuid.into(),
            service_uuid: appointment.service_uuid.into(),
            scheduled_at: appointment.scheduled_at.to_string(),
            status: status_label(appointment.status).to_string(),
            used_credit: appointment.used_credit,
            created_at: appointment.created_at.to_string(),
        }
    }
}

/// Complete Appointment Handler
///
/// Marks a scheduled appointment as done.
#[endpoint(
    tags("appointments"),
    summary = "Complete Appointment",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Appointment completed"),
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
        .complete_appointment(tenant, appointment.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(appointment.into()))
}
