// SPDX-License-Identifier: GPL-3.0-only

//! drive-health - SMART health panels and self-tests for UDisks2 drives

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use health_types::SelfTestKind;
use health_udisks::UDisks2HealthOps;
use tracing_subscriber::{EnvFilter, fmt};
use zbus::Connection;

mod commands;
mod config;
mod render;

use config::Config;

/// Show SMART health data and control self-tests for drives managed by
/// UDisks2
#[derive(Parser)]
#[command(name = "drive-health")]
#[command(about = "SMART health panels for UDisks2 drives", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List drives known to UDisks2
    List {
        /// Print machine-readable JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show the health panel for a device
    Show {
        /// Device path (e.g. /dev/sda)
        device: String,
        /// Ask the drive for fresh SMART data first
        #[arg(long)]
        refresh: bool,
        /// Print the raw record as JSON instead of the panel
        #[arg(long)]
        json: bool,
    },
    /// Show the panel and re-render it on every record update
    Watch {
        /// Device path (e.g. /dev/sda)
        device: String,
    },
    /// Start or abort a SMART self-test
    #[command(subcommand)]
    Test(TestCommands),
}

#[derive(Subcommand)]
enum TestCommands {
    /// Start a self-test
    Start {
        /// Device path (e.g. /dev/sda)
        device: String,
        /// Test kind: short, extended (or long), conveyance
        kind: String,
    },
    /// Abort the running self-test
    Abort {
        /// Device path (e.g. /dev/sda)
        device: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging to stderr
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("drive_health=info,warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load();

    let connection = Connection::system().await?;

    match cli.command {
        Commands::List { json } => commands::list(&connection, json).await,
        Commands::Show {
            device,
            refresh,
            json,
        } => commands::show(&connection, &config, &device, refresh, json).await,
        Commands::Watch { device } => commands::watch(&connection, &config, &device).await,
        Commands::Test(test) => {
            let ops = UDisks2HealthOps::with_connection(connection);
            match test {
                TestCommands::Start { device, kind } => {
                    let Some(kind) = SelfTestKind::from_str(&kind) else {
                        bail!("Unknown test kind: {kind} (expected short, extended or conveyance)");
                    };
                    commands::test_start(&ops, &device, kind).await
                }
                TestCommands::Abort { device } => commands::test_abort(&ops, &device).await,
            }
        }
    }
}
