use std::path::Path;
use std::time::Duration;

use reqwest::blocking::{multipart, Client, Response};

use crate::error::{Result, SatchelError};
use crate::models::{PreviewRow, PreviewResponse};

/// Capability for obtaining the bearer token attached to API requests.
/// Injected so the client is not tied to any particular token store.
pub trait TokenProvider {
    fn access_token(&self) -> Result<String>;
}

/// The two upload endpoints the workflow talks to. The workflow is generic
/// over this trait; tests substitute an in-memory implementation.
pub trait UploadApi {
    fn preview(&self, file: &Path) -> Result<PreviewResponse>;
    fn confirm(&self, rows: &[PreviewRow]) -> Result<()>;
}

pub struct HttpUploadApi {
    base_url: String,
    client: Client,
    tokens: Box<dyn TokenProvider>,
}

impl HttpUploadApi {
    pub fn new(base_url: &str, tokens: Box<dyn TokenProvider>) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            tokens,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl UploadApi for HttpUploadApi {
    fn preview(&self, file: &Path) -> Result<PreviewResponse> {
        let form = multipart::Form::new().file("file", file)?;
        let resp = self
            .client
            .post(self.endpoint("/api/upload/preview"))
            .bearer_auth(self.tokens.access_token()?)
            .multipart(form)
            .send()?;
        if !resp.status().is_success() {
            return Err(SatchelError::PreviewFailed(error_detail(resp)));
        }
        Ok(resp.json()?)
    }

    fn confirm(&self, rows: &[PreviewRow]) -> Result<()> {
        let resp = self
            .client
            .post(self.endpoint("/api/upload/confirm"))
            .bearer_auth(self.tokens.access_token()?)
            .json(&rows)
            .send()?;
        if !resp.status().is_success() {
            return Err(SatchelError::ImportFailed(error_detail(resp)));
        }
        Ok(())
    }
}

/// Error responses carry `{"detail": "..."}`; fall back to the status line.
fn error_detail(resp: Response) -> String {
    let status = resp.status();
    let body = resp.text().unwrap_or_default();
    parse_detail(&body).unwrap_or_else(|| format!("server returned {status}"))
}

fn parse_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("detail")?.as_str().map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_detail_from_error_body() {
        assert_eq!(
            parse_detail(r#"{"detail": "Could not parse file"}"#),
            Some("Could not parse file".to_string())
        );
    }

    #[test]
    fn test_parse_detail_missing_or_malformed() {
        assert_eq!(parse_detail(r#"{"message": "nope"}"#), None);
        assert_eq!(parse_detail("<html>502</html>"), None);
        assert_eq!(parse_detail(""), None);
        assert_eq!(parse_detail(r#"{"detail": 42}"#), None);
    }
}
