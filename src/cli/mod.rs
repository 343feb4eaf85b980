pub mod auth;
pub mod init;
pub mod status;
pub mod upload;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "satchel",
    about = "Upload bank statements to your finance dashboard and review categorization before import."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Configure the dashboard API endpoint.
    Init {
        /// Base URL of the dashboard API (default: http://localhost:8000)
        #[arg(long = "api-url")]
        api_url: Option<String>,
    },
    /// Manage the stored API token.
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Upload a statement, review the suggested categories, and import it.
    Upload {
        /// Path to a CSV or Excel statement
        file: String,
        /// Import without the edit loop when no row needs review
        #[arg(long)]
        yes: bool,
        /// Override the configured API base URL
        #[arg(long = "api-url")]
        api_url: Option<String>,
    },
    /// Show configuration and login state.
    Status,
}

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Store an API bearer token (hidden prompt).
    Login,
    /// Remove the stored token.
    Logout,
}
