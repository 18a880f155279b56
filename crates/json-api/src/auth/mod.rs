//! Authentication

mod jwt;
pub(crate) mod middleware;
