use serde::Deserialize;
use serde_json::Value;

/// Pull request fields read by the facade, parsed once from the REST payload.
/// Every field is optional so a sparse payload still loads; the facade reports
/// which field was missing when it is asked for it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PullRequestSnapshot {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub base: Option<GitRef>,
    #[serde(default)]
    pub head: Option<GitRef>,
    /// Untouched JSON the snapshot was parsed from
    #[serde(skip)]
    pub raw: Value,
}

impl PullRequestSnapshot {
    /// Parse the typed view and keep the original value alongside it.
    pub fn from_json(raw: Value) -> Result<Self, serde_json::Error> {
        let mut snapshot: PullRequestSnapshot = serde_json::from_value(raw.clone())?;
        snapshot.raw = raw;
        Ok(snapshot)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub login: Option<String>,
}

/// One side of a pull request (`base` or `head`).
#[derive(Debug, Clone, Deserialize)]
pub struct GitRef {
    #[serde(rename = "ref")]
    pub ref_name: Option<String>,
    pub sha: Option<String>,
    /// Null when the fork behind the head branch was deleted
    #[serde(default)]
    pub repo: Option<Repository>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub html_url: Option<String>,
}

/// The issue half of a pull request; GitHub only exposes labels here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssueSnapshot {
    #[serde(default)]
    pub labels: Vec<Label>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Label {
    pub name: Option<String>,
}

/// Represents the parsed components of a GitHub PR URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrUrl {
    pub owner: String,
    pub repo: String,
    pub pr_number: u64,
}
