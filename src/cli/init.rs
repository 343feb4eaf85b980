use crate::error::Result;
use crate::settings::{config_dir, load_settings, save_settings};

pub fn run(api_url: Option<String>) -> Result<()> {
    let mut settings = load_settings();
    if let Some(url) = api_url {
        settings.api_url = url.trim_end_matches('/').to_string();
    }
    save_settings(&settings)?;

    println!("API URL:  {}", settings.api_url);
    println!("Settings: {}", config_dir().join("settings.json").display());
    println!();
    println!("Next: run `satchel auth login` to store your API token.");
    Ok(())
}
