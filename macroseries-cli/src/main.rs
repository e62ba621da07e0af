mod cli;
mod commands;
mod config;
mod logging;
mod source;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run(command: Command) -> Result<()> {
    match command {
        Command::Show(args) => commands::show(args).await,
        Command::Export(args) => commands::export(args).await,
        Command::Chart(args) => commands::chart(args).await,
    }
}
