//! Monthly Appointments Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    appointments::{day::AppointmentsResponse, errors::into_status_error},
    extensions::*,
    state::State,
};

/// Monthly Appointments Handler
///
/// Returns the agenda for one calendar month.
#[endpoint(
    tags("appointments"),
    summary = "List Appointments For Month",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    year: QueryParam<i16, true>,
    month: QueryParam<i8, true>,
    depot: &mut Depot,
) -> Result<Json<AppointmentsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_uuid_or_401()?;

    let appointments = state
        .app
        .appointments
        .list_for_month(tenant, year.into_inner(), month.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(AppointmentsResponse {
        appointments: appointments.into_iter().map(Into::into).collect(),
    }))
}
