pub mod client;
pub mod types;

pub use client::{GitHubApi, RestClient};
pub use types::{IssueSnapshot, PrUrl, PullRequestSnapshot};

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::{Config, RequestSourceKind};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("GitHub API request failed: {0}")]
    ApiRequest(#[from] reqwest::Error),

    #[error("Failed to decode GitHub payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid PR URL: {0}")]
    InvalidUrl(String),

    #[error("GitHub token not found in config or environment")]
    MissingToken,
}

/// Data a GitHub request source holds for one review run.
pub trait GitHubSource: Send + Sync {
    fn pr(&self) -> &PullRequestSnapshot;
    fn issue(&self) -> &IssueSnapshot;
    fn pr_diff(&self) -> &str;
    fn client(&self) -> Arc<dyn GitHubApi>;
}

/// The platform supplying the pull request under review.
#[derive(Clone)]
pub enum RequestSource {
    GitHub(Arc<dyn GitHubSource>),
    GitLab,
    BitbucketServer,
    LocalGit,
}

impl RequestSource {
    pub fn kind(&self) -> RequestSourceKind {
        match self {
            RequestSource::GitHub(_) => RequestSourceKind::GitHub,
            RequestSource::GitLab => RequestSourceKind::GitLab,
            RequestSource::BitbucketServer => RequestSourceKind::BitbucketServer,
            RequestSource::LocalGit => RequestSourceKind::LocalGit,
        }
    }

    pub fn github(&self) -> Option<Arc<dyn GitHubSource>> {
        match self {
            RequestSource::GitHub(source) => Some(Arc::clone(source)),
            _ => None,
        }
    }
}

impl std::fmt::Debug for RequestSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("RequestSource").field(&self.kind()).finish()
    }
}

/// Environment handed to plugins at setup time.
#[derive(Debug, Clone)]
pub struct ReviewEnv {
    pub config: Config,
    pub request_source: RequestSource,
}

impl ReviewEnv {
    pub fn new(config: Config, request_source: RequestSource) -> Self {
        Self {
            config,
            request_source,
        }
    }

    pub fn request_source(&self) -> &RequestSource {
        &self.request_source
    }
}

/// Snapshot of a GitHub pull request fetched up front.
pub struct GitHubRequestSource {
    pr: PullRequestSnapshot,
    issue: IssueSnapshot,
    diff: String,
    client: Arc<dyn GitHubApi>,
}

impl GitHubRequestSource {
    /// Assemble a source from payloads that were already retrieved.
    pub fn from_parts(
        pr_json: serde_json::Value,
        issue_json: serde_json::Value,
        diff: impl Into<String>,
        client: Arc<dyn GitHubApi>,
    ) -> Result<Self, SourceError> {
        Ok(Self {
            pr: PullRequestSnapshot::from_json(pr_json)?,
            issue: serde_json::from_value(issue_json)?,
            diff: diff.into(),
            client,
        })
    }

    /// Fetch pull request metadata, issue labels and the diff from GitHub.
    #[instrument(skip(client), fields(owner = %pr_url.owner, repo = %pr_url.repo, pr = pr_url.pr_number))]
    pub async fn fetch(client: Arc<dyn GitHubApi>, pr_url: &PrUrl) -> Result<Self, SourceError> {
        let repo_path = format!("repos/{}/{}", pr_url.owner, pr_url.repo);
        let pull_path = format!("{}/pulls/{}", repo_path, pr_url.pr_number);
        let issue_path = format!("{}/issues/{}", repo_path, pr_url.pr_number);

        debug!("fetching PR metadata from GitHub API");
        let pr_json = client.get_json(&pull_path).await?;

        debug!("fetching issue metadata from GitHub API");
        let issue_json = client.get_json(&issue_path).await?;

        debug!("fetching PR diff from GitHub API");
        let diff = client.get_diff(&pull_path).await?;

        let source = Self::from_parts(pr_json, issue_json, diff, client)?;
        debug!(
            title = source.pr.title.as_deref().unwrap_or_default(),
            labels = source.issue.labels.len(),
            "built GitHub request source"
        );
        Ok(source)
    }
}

impl GitHubSource for GitHubRequestSource {
    fn pr(&self) -> &PullRequestSnapshot {
        &self.pr
    }

    fn issue(&self) -> &IssueSnapshot {
        &self.issue
    }

    fn pr_diff(&self) -> &str {
        &self.diff
    }

    fn client(&self) -> Arc<dyn GitHubApi> {
        Arc::clone(&self.client)
    }
}

/// Parse a pull request URL of the form https://{host}/{owner}/{repo}/pull/{number}.
pub fn parse_pr_url(url: &str, host: &str) -> Result<PrUrl, SourceError> {
    let invalid = || SourceError::InvalidUrl(url.to_string());
    let parsed = reqwest::Url::parse(url).map_err(|_| invalid())?;

    if parsed.host_str() != Some(host) {
        return Err(invalid());
    }

    let segments: Vec<_> = parsed
        .path_segments()
        .ok_or_else(invalid)?
        .filter(|segment| !segment.is_empty())
        .collect();

    if segments.len() != 4 || segments[2] != "pull" {
        return Err(invalid());
    }

    let pr_number = segments[3].parse::<u64>().map_err(|_| invalid())?;

    Ok(PrUrl {
        owner: segments[0].to_string(),
        repo: segments[1].to_string(),
        pr_number,
    })
}
