//! Tenant Handlers

pub(crate) mod get;
pub(crate) mod rename;
