//! Daily Appointments Handler

use std::sync::Arc;

use jiff::civil::Date;
use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use navalha_app::domain::appointments::models::AppointmentDetails;

use crate::{appointments::complete::status_label, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AppointmentDetailsResponse {
    /// The unique identifier of the appointment
    pub uuid: Uuid,

    /// The customer the slot belongs to
    pub customer_uuid: Uuid,

    /// The customer's display name
    pub customer_name: String,

    /// The customer's phone number, digits only
    pub customer_phone: Option<String>,

    /// The service being performed
    pub service_name: String,

    /// The price of the service in cents
    pub service_price: u64,

    /// The booked slot
    pub scheduled_at: String,

    /// Lifecycle state of the appointment
    pub status: String,

    /// Whether the booking consumed a subscription credit
    pub used_credit: bool,
}

impl From<AppointmentDetails> for AppointmentDetailsResponse {
    fn from(details: AppointmentDetails) -> Self {
        AppointmentDetailsResponse {
            uuid: details.appointment.uuid.into(),
            customer_uuid: details.appointment.customer_uuid.into(),
            customer_name: details.customer_name,
            customer_phone: details.customer_phone,
            service_name: details.service_name,
            service_price: details.service_price,
            scheduled_at: details.appointment.scheduled_at.to_string(),
            status: status_label(details.appointment.status).to_string(),
            used_credit: details.appointment.used_credit,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AppointmentsResponse {
    /// The list of appointments in slot order
    pub appointments: Vec<AppointmentDetailsResponse>,
}

/// Daily Appointments Handler
///
/// Returns the agenda for one calendar day.
#[endpoint(
    tags("appointments"),
    summary = "List Appointments For Day",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    date: QueryParam<String, true>,
    depot: &mut Depot,
) -> Result<Json<AppointmentsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;

    let date: Date = date
        .into_inner()
        .parse()
        .map_err(|_ignored| StatusError::bad_request().brief("Invalid date"))?;

    let appointments = state
        .app
        .appointments
        .list_for_day(tenant, date)
        .await
        .or_500("failed to fetch appointments")?;

    Ok(Json(AppointmentsResponse {
        appointments: appointments.into_iter().map(Into::into).collect(),
    }))
}
