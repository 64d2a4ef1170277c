//! skydesk-ctl — command-line client for the SkyDesk ID server.

mod cmd;

use anyhow::Result;
use clap::{Parser, Subcommand};

const DEFAULT_URL: &str = "http://127.0.0.1:8080";

/// Register and resolve device addresses against a SkyDesk ID server
#[derive(Parser, Debug)]
#[command(name = "skydesk-ctl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Server base URL
    #[arg(long, global = true, default_value = DEFAULT_URL, env = "SKYDESK_URL")]
    url: String,

    /// Print the raw JSON response
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// Register (or update) a device's address
    Register {
        device_id: String,
        ip: String,
    },

    /// Resolve a device's address
    Lookup {
        device_id: String,
    },

    /// List every registered device
    Devices,

    /// Show service name, version, and device count
    Status,

    /// Check the server is up
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let ctx = cmd::Ctx {
        base: cli.url,
        json: cli.json,
    };

    match cli.command.unwrap_or(Commands::Status) {
        Commands::Register { device_id, ip } => cmd::devices::cmd_register(&ctx, &device_id, &ip).await,
        Commands::Lookup { device_id } => cmd::devices::cmd_lookup(&ctx, &device_id).await,
        Commands::Devices => cmd::devices::cmd_devices(&ctx).await,
        Commands::Status => cmd::status::cmd_status(&ctx).await,
        Commands::Health => cmd::status::cmd_health(&ctx).await,
    }
}
