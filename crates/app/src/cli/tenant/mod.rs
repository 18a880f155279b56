use clap::{Args, Subcommand};

mod list;
mod provision;
mod rename;

#[derive(Debug, Args)]
pub(crate) struct TenantCommand {
    #[command(subcommand)]
    command: TenantSubcommand,
}

#[derive(Debug, Subcommand)]
enum TenantSubcommand {
    Provision(provision::ProvisionTenantArgs),
    Rename(rename::RenameTenantArgs),
    List(list::ListTenantsArgs),
}

pub(crate) async fn run(command: TenantCommand) -> Result<(), String> {
    match command.command {
        TenantSubcommand::Provision(args) => provision::run(args).await,
        TenantSubcommand::Rename(args) => rename::run(args).await,
        TenantSubcommand::List(args) => list::run(args).await,
    }
}
