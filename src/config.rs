use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Unknown request source: {0}")]
    UnknownSource(String),
}

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_HOST: &str = "github.com";

/// Which code-hosting platform supplies pull request data for a review run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestSourceKind {
    #[default]
    #[serde(rename = "github")]
    GitHub,
    #[serde(rename = "gitlab")]
    GitLab,
    BitbucketServer,
    LocalGit,
}

impl std::str::FromStr for RequestSourceKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "github" => Ok(Self::GitHub),
            "gitlab" => Ok(Self::GitLab),
            "bitbucket_server" => Ok(Self::BitbucketServer),
            "local_git" => Ok(Self::LocalGit),
            other => Err(ConfigError::UnknownSource(other.to_string())),
        }
    }
}

impl std::fmt::Display for RequestSourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestSourceKind::GitHub => write!(f, "github"),
            RequestSourceKind::GitLab => write!(f, "gitlab"),
            RequestSourceKind::BitbucketServer => write!(f, "bitbucket_server"),
            RequestSourceKind::LocalGit => write!(f, "local_git"),
        }
    }
}

/// Top-level configuration loaded from .pr-review.toml.
/// All fields are optional — the tool works with zero config.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Active request source for this run
    #[serde(default)]
    pub request_source: RequestSourceKind,

    /// GitHub-specific settings
    #[serde(default)]
    pub github: GitHubConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitHubConfig {
    /// GitHub API token. If None, falls back to GITHUB_TOKEN env var.
    pub token: Option<String>,
    /// REST API root, for GitHub Enterprise installs
    pub api_url: Option<String>,
    /// Web host accepted in PR URLs
    pub host: Option<String>,
}

impl Config {
    /// Load configuration from .pr-review.toml in the current directory.
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Config, ConfigError> {
        let path = Path::new(".pr-review.toml");
        let mut config = if path.exists() {
            Self::load_from(path)?
        } else {
            Config::default()
        };

        if let Ok(kind) = std::env::var("PR_REVIEW_REQUEST_SOURCE") {
            config.request_source = kind.parse()?;
        }

        if config.github.token.is_none() {
            if let Ok(token) = std::env::var("GITHUB_TOKEN") {
                config.github.token = Some(token);
            }
        }

        Ok(config)
    }

    /// Load from a specific path (useful for testing).
    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Resolve the GitHub token: config file value takes precedence,
    /// falls back to GITHUB_TOKEN env var.
    pub fn github_token(&self) -> Option<String> {
        self.github
            .token
            .clone()
            .or_else(|| std::env::var("GITHUB_TOKEN").ok())
    }

    pub fn api_url(&self) -> &str {
        self.github
            .api_url
            .as_deref()
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
    }

    pub fn host(&self) -> &str {
        self.github.host.as_deref().unwrap_or(DEFAULT_HOST)
    }
}
