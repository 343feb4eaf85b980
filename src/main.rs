mod api;
mod categories;
mod cli;
mod error;
mod fmt;
mod models;
mod session;
mod settings;
mod workflow;

use clap::Parser;

use cli::{AuthCommands, Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { api_url } => cli::init::run(api_url),
        Commands::Auth { command } => match command {
            AuthCommands::Login => cli::auth::login(),
            AuthCommands::Logout => cli::auth::logout(),
        },
        Commands::Upload { file, yes, api_url } => cli::upload::run(&file, yes, api_url.as_deref()),
        Commands::Status => cli::status::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
