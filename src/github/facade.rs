use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use super::diff::{self, ChangedFile};
use super::FacadeError;
use crate::source::types::GitRef;
use crate::source::{GitHubApi, GitHubSource, PullRequestSnapshot, ReviewEnv};

/// Read-only view of the GitHub pull request under review.
///
/// Built unconditionally at setup; when the run's request source is not
/// GitHub the facade carries no source and every accessor fails with
/// [`FacadeError::NotInitialized`].
#[derive(Clone)]
pub struct GitHubFacade {
    source: Option<Arc<dyn GitHubSource>>,
}

impl GitHubFacade {
    /// Name review scripts use to look the facade up.
    pub const NAME: &'static str = "github";

    pub fn new(env: &ReviewEnv) -> Self {
        let source = env.request_source().github();
        match source {
            Some(_) => debug!("github facade attached to request source"),
            None => warn!(
                request_source = %env.request_source().kind(),
                "request source is not GitHub; github accessors will fail"
            ),
        }
        Self { source }
    }

    pub fn is_initialized(&self) -> bool {
        self.source.is_some()
    }

    fn source(&self) -> Result<&dyn GitHubSource, FacadeError> {
        self.source.as_deref().ok_or(FacadeError::NotInitialized)
    }

    fn pr(&self) -> Result<&PullRequestSnapshot, FacadeError> {
        Ok(self.source()?.pr())
    }

    fn base(&self) -> Result<&GitRef, FacadeError> {
        self.pr()?.base.as_ref().ok_or(FacadeError::MissingField("base"))
    }

    fn head(&self) -> Result<&GitRef, FacadeError> {
        self.pr()?.head.as_ref().ok_or(FacadeError::MissingField("head"))
    }

    /// Null titles read as an empty string.
    pub fn title(&self) -> Result<String, FacadeError> {
        Ok(self.pr()?.title.clone().unwrap_or_default())
    }

    /// Null bodies read as an empty string.
    pub fn body(&self) -> Result<String, FacadeError> {
        Ok(self.pr()?.body.clone().unwrap_or_default())
    }

    pub fn author(&self) -> Result<String, FacadeError> {
        self.pr()?
            .user
            .as_ref()
            .and_then(|user| user.login.clone())
            .ok_or(FacadeError::MissingField("user.login"))
    }

    /// Label names in the order GitHub returned them.
    pub fn labels(&self) -> Result<Vec<String>, FacadeError> {
        self.source()?
            .issue()
            .labels
            .iter()
            .map(|label| field(&label.name, "issue.labels[].name"))
            .collect()
    }

    pub fn branch_for_base(&self) -> Result<String, FacadeError> {
        field(&self.base()?.ref_name, "base.ref")
    }

    pub fn branch_for_head(&self) -> Result<String, FacadeError> {
        field(&self.head()?.ref_name, "head.ref")
    }

    pub fn base_commit(&self) -> Result<String, FacadeError> {
        field(&self.base()?.sha, "base.sha")
    }

    pub fn head_commit(&self) -> Result<String, FacadeError> {
        field(&self.head()?.sha, "head.sha")
    }

    /// The pull request payload exactly as fetched.
    pub fn pr_json(&self) -> Result<Value, FacadeError> {
        Ok(self.pr()?.raw.clone())
    }

    /// Client the request source fetched with, for calls this facade does not cover.
    pub fn api(&self) -> Result<Arc<dyn GitHubApi>, FacadeError> {
        Ok(self.source()?.client())
    }

    pub fn pr_diff(&self) -> Result<String, FacadeError> {
        Ok(self.source()?.pr_diff().to_string())
    }

    pub fn changed_files(&self) -> Result<Vec<ChangedFile>, FacadeError> {
        Ok(diff::changed_files(self.source()?.pr_diff()))
    }

    /// Link a single file in the head repository at the head commit.
    pub fn html_link_file(&self, path: &str) -> Result<String, FacadeError> {
        self.html_link([path])
    }

    /// Link files in the head repository at the head commit.
    ///
    /// One path yields a single anchor; several are joined as `a, b & c`.
    /// An empty input is rejected.
    pub fn html_link<I, S>(&self, paths: I) -> Result<String, FacadeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let head = self.head()?;
        let repo_url = head
            .repo
            .as_ref()
            .ok_or(FacadeError::MissingField("head.repo"))?
            .html_url
            .as_deref()
            .ok_or(FacadeError::MissingField("head.repo.html_url"))?;
        let sha = head
            .sha
            .as_deref()
            .ok_or(FacadeError::MissingField("head.sha"))?;

        let mut anchors: Vec<String> = paths
            .into_iter()
            .map(|path| {
                let path = path.as_ref();
                let slashed = if path.starts_with('/') {
                    path.to_string()
                } else {
                    format!("/{path}")
                };
                format!("<a href='{repo_url}/blob/{sha}{slashed}'>{path}</a>")
            })
            .collect();

        let Some(last) = anchors.pop() else {
            return Err(FacadeError::InvalidArgument(
                "html_link needs at least one path".to_string(),
            ));
        };
        if anchors.is_empty() {
            return Ok(last);
        }
        Ok(format!("{} & {}", anchors.join(", "), last))
    }
}

impl std::fmt::Debug for GitHubFacade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubFacade")
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

fn field(value: &Option<String>, name: &'static str) -> Result<String, FacadeError> {
    value.clone().ok_or(FacadeError::MissingField(name))
}
