//! aw - autowake admin CLI
//!
//! Talks to a running aw-server over its admin API.
//!
//! # Examples
//!
//! ```bash
//! # Where is the managed server in its lifecycle?
//! aw status --pretty
//!
//! # Stop it after the grace period
//! aw shutdown
//!
//! # Wake it up on behalf of a client
//! aw connect steve
//! ```

mod cli;
mod commands;

use crate::{cli::Cli, commands::Commands};

use aw_cli::{Client, ClientError};

use std::process::ExitCode;

use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Discover server URL: explicit flag > port file > error
    let server_url = match cli.server {
        Some(url) => url,
        None => match discover_server_url() {
            Some(url) => url,
            None => return ExitCode::FAILURE,
        },
    };

    let client = Client::new(&server_url);

    let result = match cli.command {
        Commands::Status => client.status().await,
        Commands::Timer => client.timer().await,
        Commands::Shutdown => client.shutdown().await,
        Commands::Reload => client.reload().await,
        Commands::Connect { client_id } => client.connect(&client_id).await,
        Commands::Disconnect { client_id } => client.disconnect(&client_id).await,
    };

    match result {
        Ok(value) => {
            let output = if cli.pretty {
                serde_json::to_string_pretty(&value)
            } else {
                serde_json::to_string(&value)
            };

            match output {
                Ok(json) => {
                    println!("{}", json);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error serializing response: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if let ClientError::Rejected {
                field: Some(field), ..
            } = &e
            {
                eprintln!("  field: {}", field);
            }
            ExitCode::from(e.exit_code())
        }
    }
}

/// Discover the server URL from the port discovery file.
///
/// aw-server writes `server.json` after binding; stale files left by a dead
/// process are ignored. Prints guidance and returns `None` when no live
/// server is found.
fn discover_server_url() -> Option<String> {
    let port_path = aw_config::PortFileInfo::path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| ".aw/server.json".to_string());

    match aw_config::PortFileInfo::read_live() {
        Ok(Some(info)) => Some(info.url()),
        Ok(None) => {
            eprintln!("Error: No running aw-server found.");
            eprintln!();
            eprintln!("Checked: {}", port_path);
            eprintln!();
            eprintln!("Start the server first:");
            eprintln!("  cargo run -p aw-server");
            eprintln!();
            eprintln!("Or specify a server URL explicitly:");
            eprintln!("  aw --server http://127.0.0.1:8000 <command>");
            None
        }
        Err(e) => {
            eprintln!("Error reading port file ({}): {}", port_path, e);
            eprintln!();
            eprintln!("Specify a server URL explicitly:");
            eprintln!("  aw --server http://127.0.0.1:8000 <command>");
            None
        }
    }
}
