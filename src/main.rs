use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::error;

use playerstore::config::{config_schema, load_config, DEFAULT_CONFIG_PATH};
use playerstore::startup::build_state;
use playerstore::state::AppState;
use playerstore::utils::logger::init_logging;

#[derive(Parser, Debug)]
#[command(version, about = "Inspect player preferences and query the admin backoffice")]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the JSON schema of the configuration file.
    Schema,
    #[command(flatten)]
    Query(QueryCommand),
}

/// Subcommands that run against a configured store and admin client.
#[derive(Subcommand, Debug)]
enum QueryCommand {
    /// Print every stored preference as JSON.
    Show,
    /// Fetch map details for a play URI.
    Map { play_uri: String },
    /// List the rooms belonging to the same world as a room.
    SameWorld { room_url: String },
    /// Check whether a user is banned from a room.
    Ban {
        user_uuid: String,
        ip_address: String,
        room_url: String,
    },
}

fn print_schema() -> Result<(), String> {
    let schema = config_schema().map_err(|e| e.to_string())?;
    println!("{}", schema);
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let rendered = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{}", rendered);
    Ok(())
}

async fn execute(command: QueryCommand, state: AppState) -> Result<(), String> {
    match command {
        QueryCommand::Show => print_json(&state.preferences.snapshot()),
        QueryCommand::Map { play_uri } => {
            let details = state
                .admin
                .fetch_map_details(&play_uri)
                .await
                .map_err(|e| e.to_string())?;
            print_json(&details)
        }
        QueryCommand::SameWorld { room_url } => {
            let rooms = state
                .admin
                .get_url_rooms_from_same_world(&room_url)
                .await
                .map_err(|e| e.to_string())?;
            print_json(&rooms)
        }
        QueryCommand::Ban {
            user_uuid,
            ip_address,
            room_url,
        } => {
            let ban = state
                .admin
                .verify_ban_user(&user_uuid, &ip_address, &room_url)
                .await
                .map_err(|e| e.to_string())?;
            print_json(&ban)
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Schema output does not depend on a configuration file
    let command = match cli.command {
        Command::Schema => {
            if let Err(e) = print_schema() {
                eprintln!("Error rendering configuration schema: {}", e);
                std::process::exit(1);
            }
            return;
        }
        Command::Query(command) => command,
    };

    let config = match load_config(&cli.config) {
        Ok(config) => Arc::new(config),
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let state = match build_state(config) {
        Ok(state) => state,
        Err(e) => {
            error!("Failed to start: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = execute(command, state).await {
        error!("{}", e);
        std::process::exit(1);
    }
}
