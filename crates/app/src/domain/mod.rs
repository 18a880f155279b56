//! Navalha Domain Concerns

pub mod appointments;
pub mod credits;
pub mod customers;
pub mod plans;
pub mod services;
pub mod subscriptions;
pub mod tenants;
