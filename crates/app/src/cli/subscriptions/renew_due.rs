use clap::Args;
use jiff::{Zoned, civil::Date};
use navalha_app::{
    database::{self, Db},
    domain::{
        subscriptions::{PgSubscriptionsService, SubscriptionsService},
        tenants::{PgTenantsService, TenantsService},
    },
};

#[derive(Debug, Args)]
pub(crate) struct RenewDueArgs {
    /// Renewal cutoff date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    date: Option<Date>,

    /// Administrative PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

/// Sweep every tenant and renew the subscriptions whose billing date has
/// arrived. Renewals commit one at a time, so rerunning after a failure only
/// picks up what is still due.
pub(crate) async fn run(args: RenewDueArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let today = args.date.unwrap_or_else(|| Zoned::now().date());

    let tenants = PgTenantsService::new(pool.clone())
        .list_tenants()
        .await
        .map_err(|error| format!("failed to list tenants: {error}"))?;

    let subscriptions = PgSubscriptionsService::new(Db::new(pool));

    let mut renewed = 0;

    for tenant in &tenants {
        renewed += subscriptions
            .renew_due(tenant.uuid, today)
            .await
            .map_err(|error| {
                format!("failed to renew subscriptions for tenant {}: {error}", tenant.uuid)
            })?;
    }

    println!("renewed {renewed} subscriptions across {} tenants", tenants.len());

    Ok(())
}
