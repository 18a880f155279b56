//! Credit Handlers

pub(crate) mod balance;
pub(crate) mod grant;
pub(crate) mod history;
pub(crate) mod purchase;
