//! Service Models

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Service UUID
pub type ServiceUuid = TypedUuid<Service>;

/// Service Model. `price` is in cents.
#[derive(Debug, Clone)]
pub struct Service {
    pub uuid: ServiceUuid,
    pub name: String,
    pub price: u64,
    pub duration_minutes: Option<i32>,
    pub created_at: Timestamp,
}

/// New Service Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewService {
    pub uuid: ServiceUuid,
    pub name: String,
    pub price: u64,
    pub duration_minutes: Option<i32>,
}
