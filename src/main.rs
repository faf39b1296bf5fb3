use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use citybus::FileStore;
use commands::{
    BusCommand, ConfigCommand, DashboardCommand, Repo, RouteCommand, StopCommand, UpdateCommand,
};
use config::Config;

#[derive(Parser)]
#[command(name = "citybus")]
#[command(version)]
#[command(about = "Browse city bus routes and manage the network", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse and manage routes
    Routes(RouteCommand),

    /// Manage the stops of a route
    Stops(StopCommand),

    /// Manage buses
    Buses(BusCommand),

    /// Post crowd-sourced updates
    Updates(UpdateCommand),

    /// Show network totals
    Dashboard(DashboardCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "citybus=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config)?;
    tracing::debug!("Data directory: {}", config.data_dir.value.display());

    let repo = || Repo::new(FileStore::new(config.data_dir.value.clone()));

    match cli.command {
        Some(Commands::Routes(cmd)) => cmd.run(&repo(), &config)?,
        Some(Commands::Stops(cmd)) => cmd.run(&repo())?,
        Some(Commands::Buses(cmd)) => cmd.run(&repo())?,
        Some(Commands::Updates(cmd)) => cmd.run(&repo())?,
        Some(Commands::Dashboard(cmd)) => cmd.run(&repo())?,
        Some(Commands::Config(cmd)) => cmd.run(&config)?,
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}
