use clap::{Parser, Subcommand};

mod credits;
mod db;
mod subscriptions;
mod tenant;

#[derive(Debug, Parser)]
#[command(name = "navalha-app", about = "Navalha CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Tenant(tenant::TenantCommand),
    Subscriptions(subscriptions::SubscriptionsCommand),
    Credits(credits::CreditsCommand),
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Tenant(command) => tenant::run(command).await,
            Commands::Subscriptions(command) => subscriptions::run(command).await,
            Commands::Credits(command) => credits::run(command).await,
            Commands::Db(command) => db::run(command).await,
        }
    }
}
