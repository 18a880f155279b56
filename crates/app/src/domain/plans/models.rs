//! Monthly Plan Models

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Plan UUID
pub type PlanUuid = TypedUuid<Plan>;

/// Monthly Plan Model. `price` is in cents; `credits_per_month` is the number
/// of appointments the plan entitles per billing cycle.
#[derive(Debug, Clone)]
pub struct Plan {
    pub uuid: PlanUuid,
    pub name: String,
    pub price: u64,
    pub credits_per_month: i32,
    pub created_at: Timestamp,
}

/// New Plan Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewPlan {
    pub uuid: PlanUuid,
    pub name: String,
    pub price: u64,
    pub credits_per_month: i32,
}

/// Listing row: a plan joined with its live enrollment count.
#[derive(Debug, Clone)]
pub struct PlanWithSubscribers {
    pub plan: Plan,
    pub active_subscribers: u64,
}
