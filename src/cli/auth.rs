use colored::Colorize;
use zeroize::Zeroizing;

use crate::error::{Result, SatchelError};
use crate::session::{clear_session, save_session, session_exists, Session};

pub fn login() -> Result<()> {
    let token = Zeroizing::new(rpassword::prompt_password("API token: ")?);
    let token = token.trim();
    if token.is_empty() {
        return Err(SatchelError::Other("token must not be empty".to_string()));
    }
    save_session(&Session::new(token.to_string()))?;
    println!("{}", "Token stored.".green());
    Ok(())
}

pub fn logout() -> Result<()> {
    if !session_exists() {
        println!("No stored token.");
        return Ok(());
    }
    clear_session()?;
    println!("Logged out.");
    Ok(())
}
