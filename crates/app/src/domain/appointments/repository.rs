//! Appointments Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    appointments::models::{Appointment, AppointmentDetails, AppointmentUuid},
    customers::models::CustomerUuid,
    services::models::ServiceUuid,
};

const INSERT_APPOINTMENT_SQL: &str = include_str!("sql/insert_appointment.sql");
const GET_APPOINTMENT_SQL: &str = include_str!("sql/get_appointment.sql");
const COMPLETE_APPOINTMENT_SQL: &str = include_str!("sql/complete_appointment.sql");
const CANCEL_APPOINTMENT_SQL: &str = include_str!("sql/cancel_appointment.sql");
const LIST_RANGE_SQL: &str = include_str!("sql/list_range.sql");
const LIST_UPCOMING_SQL: &str = include_str!("sql/list_upcoming.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAppointmentsRepository;

impl PgAppointmentsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn insert_appointment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        appointment: AppointmentUuid,
        customer: CustomerUuid,
        service: ServiceUuid,
        scheduled_at: Timestamp,
        used_credit: bool,
    ) -> Result<Appointment, sqlx::Error> {
        query_as::<Postgres, Appointment>(INSERT_APPOINTMENT_SQL)
            .bind(appointment.into_uuid())
            .bind(customer.into_uuid())
            .bind(service.into_uuid())
            .bind(SqlxTimestamp::from(scheduled_at))
            .bind(used_credit)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_appointment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        appointment: AppointmentUuid,
    ) -> Result<Option<Appointment>, sqlx::Error> {
        query_as::<Postgres, Appointment>(GET_APPOINTMENT_SQL)
            .bind(appointment.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// `scheduled -> done`. Returns `None` when the row is missing or not in
    /// the `scheduled` state.
    pub(crate) async fn complete_appointment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        appointment: AppointmentUuid,
    ) -> Result<Option<Appointment>, sqlx::Error> {
        query_as::<Postgres, Appointment>(COMPLETE_APPOINTMENT_SQL)
            .bind(appointment.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// `scheduled -> canceled`. Returns `None` when the row is missing or not
    /// in the `scheduled` state.
    pub(crate) async fn cancel_appointment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        appointment: AppointmentUuid,
    ) -> Result<Option<Appointment>, sqlx::Error> {
        query_as::<Postgres, Appointment>(CANCEL_APPOINTMENT_SQL)
            .bind(appointment.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Appointments with `scheduled_at` in `[start, end)`, ascending.
    pub(crate) async fn list_range(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<AppointmentDetails>, sqlx::Error> {
        query_as::<Postgres, AppointmentDetails>(LIST_RANGE_SQL)
            .bind(SqlxTimestamp::from(start))
            .bind(SqlxTimestamp::from(end))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_upcoming(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        from: Timestamp,
        limit: i64,
    ) -> Result<Vec<AppointmentDetails>, sqlx::Error> {
        query_as::<Postgres, AppointmentDetails>(LIST_UPCOMING_SQL)
            .bind(SqlxTimestamp::from(from))
            .bind(limit)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Appointment {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: AppointmentUuid::from_uuid(row.try_get("uuid")?),
            customer_uuid: CustomerUuid::from_uuid(row.try_get("customer_uuid")?),
            service_uuid: ServiceUuid::from_uuid(row.try_get("service_uuid")?),
            scheduled_at: row.try_get::<SqlxTimestamp, _>("scheduled_at")?.to_jiff(),
            status: row.try_get("status")?,
            used_credit: row.try_get("used_credit")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for AppointmentDetails {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let price_i64: i64 = row.try_get("service_price")?;

        let service_price = u64::try_from(price_i64).map_err(|e| sqlx::Error::ColumnDecode {
            index: "service_price".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            appointment: Appointment::from_row(row)?,
            customer_name: row.try_get("customer_name")?,
            customer_phone: row.try_get("customer_phone")?,
            service_name: row.try_get("service_name")?,
            service_price,
        })
    }
}
