//! Read/update one text file through a GitLab-style repository files API.
//!
//! Standalone capability: nothing in the console calls it.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, BridgeResult};

pub const GITLAB_API_BASE: &str = "https://gitlab.com/api/v4";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoFileDescriptor {
    pub token: String,
    pub project_id: String,
    pub file_path: String,
    #[serde(default = "default_branch")]
    pub branch: String,
}

fn default_branch() -> String {
    "main".to_string()
}

impl RepoFileDescriptor {
    fn validate(&self) -> BridgeResult<()> {
        if self.token.is_empty() || self.project_id.is_empty() || self.file_path.is_empty() {
            return Err(BridgeError::config("Missing GitLab configuration"));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct FileResponse {
    content: String,
}

#[derive(Debug, Serialize)]
struct CommitPayload<'a> {
    branch: &'a str,
    content: &'a str,
    commit_message: &'a str,
}

pub struct RepoFileClient {
    base_url: String,
    client: reqwest::Client,
}

impl RepoFileClient {
    pub fn new(base_url: impl Into<String>) -> BridgeResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent("iot-bridge")
            .build()
            .map_err(|err| BridgeError::config(format!("build http client: {}", err)))?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    pub fn gitlab() -> BridgeResult<Self> {
        Self::new(GITLAB_API_BASE)
    }

    /// Returns the decoded file content, or an empty string if the file does
    /// not exist yet.
    pub async fn fetch(&self, d: &RepoFileDescriptor) -> BridgeResult<String> {
        d.validate()?;
        let url = self.file_url(d, true)?;
        let resp = self
            .client
            .get(url)
            .header("PRIVATE-TOKEN", &d.token)
            .send()
            .await?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            tracing::debug!(file = %d.file_path, "repo file not found; treating as empty");
            return Ok(String::new());
        }
        let resp = ensure_ok(resp, "GitLab API Error").await?;
        let body: FileResponse = resp.json().await?;
        Ok(decode_content(&body.content))
    }

    /// Creates or updates the file, probing existence first.
    pub async fn update(
        &self,
        d: &RepoFileDescriptor,
        content: &str,
        commit_message: &str,
    ) -> BridgeResult<()> {
        d.validate()?;

        let probe = self
            .client
            .head(self.file_url(d, true)?)
            .header("PRIVATE-TOKEN", &d.token)
            .send()
            .await?;
        let exists = probe.status() != reqwest::StatusCode::NOT_FOUND;

        let url = self.file_url(d, false)?;
        let req = if exists {
            self.client.put(url)
        } else {
            self.client.post(url)
        };
        tracing::info!(file = %d.file_path, create = !exists, "committing repo file");
        let resp = req
            .header("PRIVATE-TOKEN", &d.token)
            .json(&CommitPayload {
                branch: &d.branch,
                content,
                commit_message,
            })
            .send()
            .await?;
        ensure_ok(resp, "Failed to update file").await?;
        Ok(())
    }

    fn file_url(&self, d: &RepoFileDescriptor, with_ref: bool) -> BridgeResult<reqwest::Url> {
        let mut url = reqwest::Url::parse(self.base_url.trim_end_matches('/'))
            .map_err(|err| BridgeError::config(format!("invalid API base: {}", err)))?;
        url.path_segments_mut()
            .map_err(|_| BridgeError::config("API base cannot carry a path"))?
            .pop_if_empty()
            .extend(["projects", d.project_id.as_str(), "repository", "files"])
            .push(&d.file_path);
        if with_ref {
            url.query_pairs_mut().append_pair("ref", &d.branch);
        }
        Ok(url)
    }
}

/// Base64 content decoded as UTF-8; content that does not decode is
/// returned as-is.
fn decode_content(content: &str) -> String {
    let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    match STANDARD.decode(compact.as_bytes()) {
        Ok(bytes) => String::from_utf8(bytes).unwrap_or_else(|_| content.to_string()),
        Err(err) => {
            tracing::warn!(error = %err, "repo file content is not base64");
            content.to_string()
        }
    }
}

async fn ensure_ok(resp: reqwest::Response, label: &str) -> BridgeResult<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("message").map(|m| match m {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("").to_string());
    Err(BridgeError::RepoFile(format!(
        "{}: {} {}",
        label,
        status.as_u16(),
        message
    )))
}
