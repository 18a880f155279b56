//! Appointment Models

use jiff::{Timestamp, ToSpan, civil::Date, tz::TimeZone};

use crate::{
    domain::{customers::models::CustomerUuid, services::models::ServiceUuid},
    uuids::TypedUuid,
};

/// Appointment UUID
pub type AppointmentUuid = TypedUuid<Appointment>;

/// Appointment lifecycle state. Stored as `TEXT` with a check constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
    Canceled,
    Done,
}

/// Appointment Model. `used_credit` records whether the booking consumed a
/// ledger credit instead of being billed per visit.
#[derive(Debug, Clone)]
pub struct Appointment {
    pub uuid: AppointmentUuid,
    pub customer_uuid: CustomerUuid,
    pub service_uuid: ServiceUuid,
    pub scheduled_at: Timestamp,
    pub status: AppointmentStatus,
    pub used_credit: bool,
    pub created_at: Timestamp,
}

/// New Appointment Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewAppointment {
    pub uuid: AppointmentUuid,
    pub customer_uuid: CustomerUuid,
    pub service_uuid: ServiceUuid,
    pub scheduled_at: Timestamp,
}

/// Listing row: an appointment joined with its customer and service.
#[derive(Debug, Clone)]
pub struct AppointmentDetails {
    pub appointment: Appointment,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub service_name: String,
    pub service_price: u64,
}

/// Half-open `[midnight, next midnight)` UTC bounds for a calendar day.
pub fn day_bounds(date: Date) -> Result<(Timestamp, Timestamp), jiff::Error> {
    let start = date.to_zoned(TimeZone::UTC)?.timestamp();
    let end = date.tomorrow()?.to_zoned(TimeZone::UTC)?.timestamp();

    Ok((start, end))
}

/// Half-open `[first of month, first of next month)` UTC bounds.
pub fn month_bounds(year: i16, month: i8) -> Result<(Timestamp, Timestamp), jiff::Error> {
    let first = Date::new(year, month, 1)?;
    let next = first.saturating_add(1.month());

    Ok((
        first.to_zoned(TimeZone::UTC)?.timestamp(),
        next.to_zoned(TimeZone::UTC)?.timestamp(),
    ))
}
