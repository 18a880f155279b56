//! Subscription Models

use jiff::{ToSpan, Timestamp, civil::Date};

use crate::{
    domain::{customers::models::CustomerUuid, plans::models::PlanUuid},
    uuids::TypedUuid,
};

/// Subscription UUID
pub type SubscriptionUuid = TypedUuid<Subscription>;

/// Subscription lifecycle state. Stored as `TEXT` with a check constraint;
/// the partial unique index on active rows serializes concurrent enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Canceled,
}

/// Subscription Model
#[derive(Debug, Clone)]
pub struct Subscription {
    pub uuid: SubscriptionUuid,
    pub customer_uuid: CustomerUuid,
    pub plan_uuid: PlanUuid,
    pub status: SubscriptionStatus,
    pub next_billing_date: Option<Date>,
    pub created_at: Timestamp,
}

/// First billing date for a fresh enrollment.
#[must_use]
pub fn initial_billing_date(today: Date) -> Date {
    advance_billing_date(today)
}

/// One civil month later, clamped to the end of shorter months.
#[must_use]
pub fn advance_billing_date(date: Date) -> Date {
    date.saturating_add(1.month())
}
