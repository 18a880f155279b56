//! Subscription Handlers

pub(crate) mod active;
pub(crate) mod subscribe;
pub(crate) mod unsubscribe;
