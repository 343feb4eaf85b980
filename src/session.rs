use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::api::TokenProvider;
use crate::error::{Result, SatchelError};
use crate::settings::config_dir;

/// Stored API credentials. Replaces the browser client's localStorage:
/// a JSON file under the config dir, read through the `TokenProvider`
/// capability so the workflow never touches the store directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub saved_at: String,
}

impl Session {
    pub fn new(access_token: String) -> Self {
        Self {
            access_token,
            saved_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

fn session_path() -> PathBuf {
    config_dir().join("session.json")
}

pub fn load_session() -> Option<Session> {
    let content = std::fs::read_to_string(session_path()).ok()?;
    serde_json::from_str(&content).ok()
}

pub fn save_session(session: &Session) -> Result<()> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    let json = serde_json::to_string_pretty(session)
        .map_err(|e| SatchelError::Settings(e.to_string()))?;
    std::fs::write(session_path(), format!("{json}\n"))?;
    Ok(())
}

pub fn clear_session() -> Result<()> {
    let path = session_path();
    if path.exists() {
        std::fs::remove_file(path)?;
    }
    Ok(())
}

pub fn session_exists() -> bool {
    session_path().exists()
}

/// Reads the token from the stored session at request time.
pub struct StoredTokenProvider;

impl TokenProvider for StoredTokenProvider {
    fn access_token(&self) -> Result<String> {
        load_session()
            .map(|s| s.access_token)
            .ok_or_else(|| {
                SatchelError::Settings("not logged in (run `satchel auth login`)".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let session = Session::new("tok-abc123".to_string());
        let json = serde_json::to_string_pretty(&session).unwrap();
        std::fs::write(&path, &json).unwrap();
        let loaded: Session =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded.access_token, "tok-abc123");
        assert!(!loaded.saved_at.is_empty());
    }

    #[test]
    fn test_session_tolerates_missing_saved_at() {
        let loaded: Session = serde_json::from_str(r#"{"access_token": "tok"}"#).unwrap();
        assert_eq!(loaded.access_token, "tok");
        assert!(loaded.saved_at.is_empty());
    }
}
