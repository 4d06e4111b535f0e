//! `camps`: terminal client for the camp network admin tables.

mod cli;
mod commands;
mod config;
mod context;
mod output;
mod render;
mod timing;

use anyhow::Result;
use clap::Parser as _;
use tracing::debug;

use crate::{
    cli::{Cli, Commands},
    commands::{generate_completions, print_columns, run_list, run_login, run_logout},
    context::AppContext,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    timing::init_tracing(cli.verbose, cli.timing);

    match cli.command {
        Commands::Completions { shell } => {
            generate_completions(shell);
            Ok(())
        }
        Commands::Columns { entity } => {
            print_columns(entity);
            Ok(())
        }
        command => {
            let app = AppContext::load(cli.config.as_deref())?;
            debug!(api = %app.config.api_url(), "configuration loaded");
            match command {
                Commands::List(args) => run_list(&app, &args).await,
                Commands::Login { username, token } => run_login(&app, &username, &token),
                Commands::Logout => run_logout(&app),
                Commands::Completions { .. } | Commands::Columns { .. } => Ok(()),
            }
        }
    }
}
