//! Appointment Handlers

pub(crate) mod cancel;
pub(crate) mod complete;
pub(crate) mod create;
pub(crate) mod day;
pub(crate) mod month;
pub(crate) mod upcoming;
