mod config;
mod github;
mod plugin;
mod source;
mod summary;

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, info_span};
use tracing_subscriber::EnvFilter;

use config::{Config, RequestSourceKind};
use github::GitHubFacade;
use plugin::PluginRegistry;
use source::{GitHubApi, GitHubRequestSource, RequestSource, RestClient, ReviewEnv, SourceError};

/// pr-review-github — loads a GitHub pull request and exposes it to review
/// automation through the `github` plugin, printing a summary of the PR.
#[derive(Parser, Debug)]
#[command(name = "pr-review-github", version, about)]
struct Cli {
    /// GitHub Pull Request URL (e.g., https://github.com/org/repo/pull/42)
    ///
    /// Not required when --fixture is used.
    pr_url: Option<String>,

    /// Optional output file path for markdown summary
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Use a built-in fixture PR (no GitHub token needed)
    #[arg(long)]
    fixture: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    info!("loading configuration");
    let config = Config::load()?;
    debug!(request_source = %config.request_source, api_url = config.api_url(), "configuration loaded");

    let request_source = match config.request_source {
        RequestSourceKind::GitHub => {
            let source = if cli.fixture {
                info!("using fixture PR data");
                fixture_source(&config)?
            } else {
                let pr_url = cli.pr_url.as_deref().ok_or(
                    "PR URL is required unless --fixture is used. Usage: pr-review-github <URL> or pr-review-github --fixture",
                )?;
                let _main_span = info_span!("pr_review", pr_url = %pr_url).entered();

                let parsed_url = source::parse_pr_url(pr_url, config.host())?;
                debug!(owner = %parsed_url.owner, repo = %parsed_url.repo, pr = parsed_url.pr_number, "parsed PR URL");

                info!("fetching pull request from GitHub");
                let client: Arc<dyn GitHubApi> = Arc::new(RestClient::from_config(&config)?);
                GitHubRequestSource::fetch(client, &parsed_url).await?
            };
            RequestSource::GitHub(Arc::new(source))
        }
        RequestSourceKind::GitLab => RequestSource::GitLab,
        RequestSourceKind::BitbucketServer => RequestSource::BitbucketServer,
        RequestSourceKind::LocalGit => RequestSource::LocalGit,
    };

    let env = ReviewEnv::new(config, request_source);
    info!(request_source = %env.config.request_source, "setting up review plugins");
    let mut plugins = PluginRegistry::new();
    plugins.register(GitHubFacade::new(&env));
    debug!(plugins = ?plugins.names().collect::<Vec<_>>(), "plugins registered");

    let github = plugins
        .get::<GitHubFacade>(GitHubFacade::NAME)
        .ok_or("github plugin is not registered")?;

    info!("building summary");
    let built = summary::build(github)?;
    summary::output(&built, cli.output.as_deref())?;
    info!(files = built.files.len(), labels = built.labels.len(), "done");

    Ok(())
}

/// Build a GitHub request source from the embedded fixtures.
/// This enables running the full pipeline without a GitHub token.
fn fixture_source(config: &Config) -> Result<GitHubRequestSource, SourceError> {
    let pr_json = serde_json::from_str(include_str!("../tests/fixtures/pull_request.json"))?;
    let issue_json = serde_json::from_str(include_str!("../tests/fixtures/issue.json"))?;
    let diff = include_str!("../tests/fixtures/sample_diff.patch");
    let client = Arc::new(RestClient::new(
        config.api_url(),
        config.github_token().unwrap_or_default(),
    ));
    GitHubRequestSource::from_parts(pr_json, issue_json, diff, client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_source_builds_summary() {
        let source = fixture_source(&Config::default()).unwrap();
        let env = ReviewEnv::new(Config::default(), RequestSource::GitHub(Arc::new(source)));
        let github = GitHubFacade::new(&env);

        assert_eq!(github.title().unwrap(), "Add OAuth2 login flow");
        assert_eq!(github.labels().unwrap(), vec!["security", "auth"]);

        let built = summary::build(&github).unwrap();
        assert_eq!(built.pr_number, Some(42));
        assert_eq!(built.files.len(), 3);
        assert!(built.file_links.unwrap().contains(" & "));
    }

    #[test]
    fn test_cli_parses_fixture_flag() {
        let cli = Cli::parse_from(["pr-review-github", "--fixture", "-o", "out.md"]);
        assert!(cli.fixture);
        assert!(cli.pr_url.is_none());
        assert_eq!(cli.output, Some(PathBuf::from("out.md")));
    }
}
