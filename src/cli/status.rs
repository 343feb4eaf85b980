use crate::error::Result;
use crate::session::load_session;
use crate::settings::{config_dir, load_settings, settings_file_exists};

pub fn run() -> Result<()> {
    let settings = load_settings();

    println!("Config dir: {}", config_dir().display());
    println!("API URL:    {}", settings.api_url);
    println!(
        "Settings:   {}",
        if settings_file_exists() { "saved" } else { "(defaults)" }
    );
    match load_session() {
        Some(session) if !session.saved_at.is_empty() => {
            println!("Token:      stored {}", session.saved_at);
        }
        Some(_) => println!("Token:      stored"),
        None => println!("Token:      not stored. Run `satchel auth login`."),
    }
    Ok(())
}
