//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        appointments::{AppointmentsService, PgAppointmentsService},
        credits::{CreditsService, PgCreditsService},
        customers::{CustomersService, PgCustomersService},
        plans::{PgPlansService, PlansService},
        services::{PgServicesService, ServicesService},
        subscriptions::{PgSubscriptionsService, SubscriptionsService},
        tenants::{PgTenantsService, TenantsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub tenants: Arc<dyn TenantsService>,
    pub customers: Arc<dyn CustomersService>,
    pub services: Arc<dyn ServicesService>,
    pub plans: Arc<dyn PlansService>,
    pub credits: Arc<dyn CreditsService>,
    pub subscriptions: Arc<dyn SubscriptionsService>,
    pub appointments: Arc<dyn AppointmentsService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails or when
    /// the connected role could bypass row-level security.
    pub async fn from_database_url(url: &str) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::ensure_rls_enforced_role(&pool)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool.clone());

        Ok(Self {
            tenants: Arc::new(PgTenantsService::new(pool)),
            customers: Arc::new(PgCustomersService::new(db.clone())),
            services: Arc::new(PgServicesService::new(db.clone())),
            plans: Arc::new(PgPlansService::new(db.clone())),
            credits: Arc::new(PgCreditsService::new(db.clone())),
            subscriptions: Arc::new(PgSubscriptionsService::new(db.clone())),
            appointments: Arc::new(PgAppointmentsService::new(db)),
        })
    }
}
