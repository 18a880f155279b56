//! Customer Models

use jiff::Timestamp;

use crate::{domain::plans::models::PlanUuid, uuids::TypedUuid};

/// Customer UUID
pub type CustomerUuid = TypedUuid<Customer>;

/// Customer Model
#[derive(Debug, Clone)]
pub struct Customer {
    pub uuid: CustomerUuid,
    pub name: String,
    pub phone: Option<String>,
    pub created_at: Timestamp,
}

/// New Customer Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomer {
    pub uuid: CustomerUuid,
    pub name: String,
    pub phone: Option<String>,
}

/// Customer Update Model
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerUpdate {
    pub name: String,
    pub phone: Option<String>,
    pub membership: Membership,
}

/// Desired membership state applied on every customer update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    /// Customer holds (or changes to) a monthly plan subscription.
    Monthly(PlanUuid),

    /// Pay-per-visit customer; any active subscription is cancelled.
    Casual,
}

/// Listing row: a customer joined with the name of their active plan, if any.
#[derive(Debug, Clone)]
pub struct CustomerWithPlan {
    pub customer: Customer,
    pub plan_name: Option<String>,
}

/// Strip a phone number down to its digits. Returns `None` when nothing
/// usable remains.
#[must_use]
pub fn normalize_phone(phone: Option<&str>) -> Option<String> {
    let digits: String = phone?.chars().filter(char::is_ascii_digit).collect();

    (!digits.is_empty()).then_some(digits)
}
