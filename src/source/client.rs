use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument};

use super::SourceError;

const USER_AGENT: &str = "pr-review-github";

/// Minimal GitHub REST surface used by the request source.
/// The facade hands this out as-is so review scripts can make further calls.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// Root URL that request paths are appended to.
    fn base_url(&self) -> &str;

    /// GET a path under the API root and decode the JSON body.
    async fn get_json(&self, path: &str) -> Result<Value, SourceError>;

    /// GET a pull request path in unified diff form.
    async fn get_diff(&self, path: &str) -> Result<String, SourceError>;
}

/// reqwest-backed client authenticated with a personal access token.
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl RestClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    /// Build a client from config; fails when no token is configured.
    pub fn from_config(config: &crate::config::Config) -> Result<Self, SourceError> {
        let token = config.github_token().ok_or(SourceError::MissingToken)?;
        Ok(Self::new(config.api_url(), token))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl GitHubApi for RestClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    #[instrument(skip(self))]
    async fn get_json(&self, path: &str) -> Result<Value, SourceError> {
        let value = self
            .http
            .get(self.url(path))
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/vnd.github+json")
            .bearer_auth(&self.token)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;
        debug!("received JSON response");
        Ok(value)
    }

    #[instrument(skip(self))]
    async fn get_diff(&self, path: &str) -> Result<String, SourceError> {
        let text = self
            .http
            .get(self.url(path))
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/vnd.github.diff")
            .bearer_auth(&self.token)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        debug!(diff_bytes = text.len(), "received diff");
        Ok(text)
    }
}
