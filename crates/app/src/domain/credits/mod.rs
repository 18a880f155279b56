//! Credit Ledger

pub mod errors;
pub mod models;
pub(crate) mod repository;
pub mod service;

pub use errors::CreditsServiceError;
pub use service::*;
