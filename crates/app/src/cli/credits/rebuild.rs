use clap::Args;
use navalha_app::{
    database::{self, Db},
    domain::{
        credits::{CreditsService, PgCreditsService},
        customers::models::CustomerUuid,
        tenants::models::TenantUuid,
    },
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct RebuildBalanceArgs {
    /// Tenant UUID the customer belongs to
    #[arg(long)]
    tenant_uuid: Uuid,

    /// Customer UUID whose balance should be recomputed
    #[arg(long)]
    customer_uuid: Uuid,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

/// Recompute a cached balance from the transaction history. Recovery tool for
/// a balance row that drifted out of sync with its ledger.
pub(crate) async fn run(args: RebuildBalanceArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgCreditsService::new(Db::new(pool));

    let balance = service
        .rebuild_balance(
            TenantUuid::from_uuid(args.tenant_uuid),
            CustomerUuid::from_uuid(args.customer_uuid),
        )
        .await
        .map_err(|error| format!("failed to rebuild balance: {error}"))?;

    println!("customer_uuid: {}", args.customer_uuid);
    println!("balance: {balance}");

    Ok(())
}
