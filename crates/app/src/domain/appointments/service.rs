//! Appointments service.
//!
//! Booking, listings and status transitions. A booking for a customer with
//! an active subscription tries to spend one ledger credit; when the balance
//! cannot cover it the appointment still goes through as a billed visit with
//! `used_credit = false`. Cancelling a credit-backed appointment refunds the
//! credit in the same transaction.

use async_trait::async_trait;
use jiff::{Timestamp, civil::Date};
use mockall::automock;
use tracing::{Span, info};

use crate::{
    database::Db,
    domain::{
        appointments::{
            errors::AppointmentsServiceError,
            models::{
                Appointment, AppointmentDetails, AppointmentUuid, NewAppointment, day_bounds,
                month_bounds,
            },
            repository::PgAppointmentsRepository,
        },
        credits::{models::TransactionType, repository::PgCreditsRepository},
        customers::repository::PgCustomersRepository,
        services::repository::PgServicesRepository,
        subscriptions::repository::PgSubscriptionsRepository,
        tenants::models::TenantUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgAppointmentsService {
    db: Db,
    repository: PgAppointmentsRepository,
    customers: PgCustomersRepository,
    services: PgServicesRepository,
    subscriptions: PgSubscriptionsRepository,
    credits: PgCreditsRepository,
}

impl PgAppointmentsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgAppointmentsRepository::new(),
            customers: PgCustomersRepository::new(),
            services: PgServicesRepository::new(),
            subscriptions: PgSubscriptionsRepository::new(),
            credits: PgCreditsRepository::new(),
        }
    }
}

#[async_trait]
impl AppointmentsService for PgAppointmentsService {
    #[tracing::instrument(
        name = "appointments.service.create_appointment",
        skip(self, appointment),
        fields(
            tenant_uuid = %tenant,
            appointment_uuid = %appointment.uuid,
            customer_uuid = %appointment.customer_uuid,
            service_uuid = %appointment.service_uuid,
            used_credit = tracing::field::Empty
        ),
        err
    )]
    async fn create_appointment(
        &self,
        tenant: TenantUuid,
        appointment: NewAppointment,
    ) -> Result<Appointment, AppointmentsServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        // Foreign-key checks ignore row-level security, so tenant scope has
        // to be verified explicitly before inserting the references.
        if !self
            .customers
            .customer_exists(&mut tx, appointment.customer_uuid)
            .await?
        {
            return Err(AppointmentsServiceError::CrossTenantReference);
        }

        if !self
            .services
            .service_exists(&mut tx, appointment.service_uuid)
            .await?
        {
            return Err(AppointmentsServiceError::CrossTenantReference);
        }

        let subscribed = self
            .subscriptions
            .find_active(&mut tx, appointment.customer_uuid)
            .await?
            .is_some();

        // Subscribers pay with a plan credit when the balance allows it; a
        // shortage degrades to a billed visit instead of blocking the
        // booking.
        let used_credit = if subscribed {
            self.credits
                .consume(&mut tx, appointment.customer_uuid, 1, Some("appointment"))
                .await?
                .is_some()
        } else {
            false
        };

        Span::current().record("used_credit", used_credit);

        let created = self
            .repository
            .insert_appointment(
                &mut tx,
                appointment.uuid,
                appointment.customer_uuid,
                appointment.service_uuid,
                appointment.scheduled_at,
                used_credit,
            )
            .await?;

        tx.commit().await?;

        info!(scheduled_at = %created.scheduled_at, "created appointment");

        Ok(created)
    }

    async fn complete_appointment(
        &self,
        tenant: TenantUuid,
        appointment: AppointmentUuid,
    ) -> Result<Appointment, AppointmentsServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let Some(completed) = self
            .repository
            .complete_appointment(&mut tx, appointment)
            .await?
        else {
            // The guarded update matched nothing: the appointment either is
            // not visible here or is past the scheduled state.
            return match self.repository.get_appointment(&mut tx, appointment).await? {
                Some(_) => Err(AppointmentsServiceError::InvalidStatusChange),
                None => Err(AppointmentsServiceError::NotFound),
            };
        };

        tx.commit().await?;

        Ok(completed)
    }

    #[tracing::instrument(
        name = "appointments.service.cancel_appointment",
        skip(self),
        fields(tenant_uuid = %tenant, appointment_uuid = %appointment, refunded = tracing::field::Empty),
        err
    )]
    async fn cancel_appointment(
        &self,
        tenant: TenantUuid,
        appointment: AppointmentUuid,
    ) -> Result<Appointment, AppointmentsServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let Some(cancelled) = self
            .repository
            .cancel_appointment(&mut tx, appointment)
            .await?
        else {
            return match self.repository.get_appointment(&mut tx, appointment).await? {
                Some(_) => Err(AppointmentsServiceError::InvalidStatusChange),
                None => Err(AppointmentsServiceError::NotFound),
            };
        };

        if cancelled.used_credit {
            self.credits
                .grant(
                    &mut tx,
                    cancelled.customer_uuid,
                    1,
                    TransactionType::ManualAdjustment,
                    Some("appointment cancelled"),
                )
                .await?;
        }

        Span::current().record("refunded", cancelled.used_credit);

        tx.commit().await?;

        info!("cancelled appointment");

        Ok(cancelled)
    }

    async fn list_for_day(
        &self,
        tenant: TenantUuid,
        date: Date,
    ) -> Result<Vec<AppointmentDetails>, AppointmentsServiceError> {
        let (start, end) = day_bounds(date)?;

        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let appointments = self.repository.list_range(&mut tx, start, end).await?;

        tx.commit().await?;

        Ok(appointments)
    }

    async fn list_for_month(
        &self,
        tenant: TenantUuid,
        year: i16,
        month: i8,
    ) -> Result<Vec<AppointmentDetails>, AppointmentsServiceError> {
        let (start, end) = month_bounds(year, month)?;

        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let appointments = self.repository.list_range(&mut tx, start, end).await?;

        tx.commit().await?;

        Ok(appointments)
    }

    async fn list_upcoming(
        &self,
        tenant: TenantUuid,
        from: Timestamp,
        limit: i64,
    ) -> Result<Vec<AppointmentDetails>, AppointmentsServiceError> {
        let mut tx = self.db.begin_tenant_transaction(tenant).await?;

        let appointments = self
            .repository
            .list_upcoming(&mut tx, from, limit.max(0))
            .await?;

        tx.commit().await?;

        Ok(appointments)
    }
}

#[automock]
#[async_trait]
pub trait AppointmentsService: Send + Sync {
    /// Books an appointment, spending a plan credit when the customer's
    /// subscription and balance allow it.
    async fn create_appointment(
        &self,
        tenant: TenantUuid,
        appointment: NewAppointment,
    ) -> Result<Appointment, AppointmentsServiceError>;

    /// Marks a scheduled appointment as done.
    async fn complete_appointment(
        &self,
        tenant: TenantUuid,
        appointment: AppointmentUuid,
    ) -> Result<Appointment, AppointmentsServiceError>;

    /// Cancels a scheduled appointment, refunding the credit it consumed.
    async fn cancel_appointment(
        &self,
        tenant: TenantUuid,
        appointment: AppointmentUuid,
    ) -> Result<Appointment, AppointmentsServiceError>;

    /// Appointments of one calendar day, ascending.
    async fn list_for_day(
        &self,
        tenant: TenantUuid,
        date: Date,
    ) -> Result<Vec<AppointmentDetails>, AppointmentsServiceError>;

    /// Appointments of one calendar month, ascending.
    async fn list_for_month(
        &self,
        tenant: TenantUuid,
        year: i16,
        month: i8,
    ) -> Result<Vec<AppointmentDetails>, AppointmentsServiceError>;

    /// The next appointments from a point in time, ascending.
    async fn list_upcoming(
        &self,
        tenant: TenantUuid,
        from: Timestamp,
        limit: i64,
    ) -> Result<Vec<AppointmentDetails>, AppointmentsServiceError>;
}
