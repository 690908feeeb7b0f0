pub mod types;

pub use types::Summary;

use crate::github::{FacadeError, FileStatus, GitHubFacade};
use colored::Colorize;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("Failed to read pull request: {0}")]
    Facade(#[from] FacadeError),

    #[error("Failed to write summary file: {0}")]
    FileWrite(#[from] std::io::Error),
}

/// Collect a Summary through the github facade.
pub fn build(github: &GitHubFacade) -> Result<Summary, SummaryError> {
    let files = github.changed_files()?;
    let present: Vec<&str> = files
        .iter()
        .filter(|f| f.status != FileStatus::Deleted)
        .map(|f| f.path.as_str())
        .collect();
    let file_links = if present.is_empty() {
        None
    } else {
        Some(github.html_link(&present)?)
    };

    Ok(Summary {
        pr_number: github.pr_json()?.get("number").and_then(|n| n.as_u64()),
        title: github.title()?,
        author: github.author()?,
        base_branch: github.branch_for_base()?,
        head_branch: github.branch_for_head()?,
        base_commit: github.base_commit()?,
        head_commit: github.head_commit()?,
        labels: github.labels()?,
        files,
        file_links,
    })
}

/// Output the summary to terminal (default) or to a markdown file.
#[instrument(skip(summary), fields(title = %summary.title))]
pub fn output(summary: &Summary, output_path: Option<&Path>) -> Result<(), SummaryError> {
    match output_path {
        None => {
            debug!("writing summary to terminal");
            print_terminal_summary(summary);
            Ok(())
        }
        Some(path) => {
            debug!(path = %path.display(), "writing summary to file");
            std::fs::write(path, render_markdown(summary))?;
            Ok(())
        }
    }
}

/// PR #42: "Add OAuth2 login flow"
/// Author: alice | main <- feature/oauth | +12 -3
///
/// ═══ Labels ═══
/// ...
fn print_terminal_summary(summary: &Summary) {
    println!();
    println!("{}", summary.heading().bold());
    println!(
        "Author: {} | {} <- {} | {} {}",
        summary.author,
        summary.base_branch,
        summary.head_branch,
        format!("+{}", summary.additions()).green(),
        format!("-{}", summary.deletions()).red()
    );
    println!("Commits: {}..{}", short_sha(&summary.base_commit), short_sha(&summary.head_commit));
    println!();

    println!("═══ Labels ═══");
    if summary.labels.is_empty() {
        println!("  No labels.");
    } else {
        println!("  {}", summary.labels.join(", ").cyan());
    }
    println!();

    println!("═══ Files ═══");
    if summary.files.is_empty() {
        println!("  No changes.");
    }
    for file in &summary.files {
        println!(
            "  • {} [{}] +{} -{}",
            file.path,
            colorize_status(file.status),
            file.additions,
            file.deletions
        );
    }
    println!();
}

/// Markdown keeps the HTML anchors, which GitHub renders inline.
fn render_markdown(summary: &Summary) -> String {
    let mut md = String::new();
    md.push_str(&format!("# {}\n\n", summary.heading()));
    md.push_str(&format!(
        "**Author:** {} | **Branches:** `{}` <- `{}` | **+{} -{}**\n\n",
        summary.author,
        summary.base_branch,
        summary.head_branch,
        summary.additions(),
        summary.deletions()
    ));
    md.push_str(&format!(
        "**Commits:** `{}`..`{}`\n\n",
        summary.base_commit, summary.head_commit
    ));

    md.push_str("## Labels\n\n");
    if summary.labels.is_empty() {
        md.push_str("No labels.\n\n");
    } else {
        for label in &summary.labels {
            md.push_str(&format!("- {}\n", label));
        }
        md.push('\n');
    }

    md.push_str("## Files\n\n");
    match &summary.file_links {
        Some(links) => md.push_str(&format!("Changed: {}\n\n", links)),
        None => md.push_str("No files at the head commit.\n\n"),
    }
    for file in &summary.files {
        md.push_str(&format!(
            "- `{}` ({}) +{} -{}\n",
            file.path, file.status, file.additions, file.deletions
        ));
    }

    md
}

fn short_sha(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}

fn colorize_status(status: FileStatus) -> colored::ColoredString {
    match status {
        FileStatus::Added => "added".green(),
        FileStatus::Modified => "modified".yellow(),
        FileStatus::Deleted => "deleted".red(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::github::facade::tests::test_facade;
    use crate::source::tests::StubApi;
    use crate::source::{GitHubRequestSource, RequestSource, ReviewEnv};
    use serde_json::json;
    use std::sync::Arc;

    const DIFF: &str = "diff --git a/src/lib.rs b/src/lib.rs
--- a/src/lib.rs
+++ b/src/lib.rs
@@ -1,2 +1,2 @@
-old
+new
diff --git a/gone.txt b/gone.txt
--- a/gone.txt
+++ /dev/null
@@ -1 +0,0 @@
-bye
";

    fn facade_with_diff(diff: &str) -> GitHubFacade {
        let pr = json!({
            "number": 8,
            "title": "Tidy lib",
            "user": { "login": "carol" },
            "base": { "ref": "main", "sha": "1111111aaaa" },
            "head": {
                "ref": "tidy",
                "sha": "2222222bbbb",
                "repo": { "html_url": "https://github.com/org/repo" },
            },
        });
        let issue = json!({ "labels": [{ "name": "cleanup" }] });
        let api = Arc::new(StubApi::new(pr.clone(), issue.clone(), diff));
        let source = GitHubRequestSource::from_parts(pr, issue, diff, api).unwrap();
        GitHubFacade::new(&ReviewEnv::new(
            Config::default(),
            RequestSource::GitHub(Arc::new(source)),
        ))
    }

    #[test]
    fn test_build_summary_metadata() {
        let summary = build(&test_facade()).unwrap();
        assert_eq!(summary.pr_number, Some(42));
        assert_eq!(summary.author, "alice");
        assert_eq!(summary.base_branch, "main");
        assert_eq!(summary.labels, vec!["security", "needs-review"]);
        assert!(summary.files.is_empty());
        assert!(summary.file_links.is_none());
    }

    #[test]
    fn test_build_summary_links_skip_deleted_files() {
        let summary = build(&facade_with_diff(DIFF)).unwrap();
        assert_eq!(summary.files.len(), 2);
        assert_eq!(
            summary.file_links.as_deref(),
            Some("<a href='https://github.com/org/repo/blob/2222222bbbb/src/lib.rs'>src/lib.rs</a>")
        );
    }

    #[test]
    fn test_build_summary_skips_binary_delete() {
        let diff = "diff --git a/assets/logo.png b/assets/logo.png
deleted file mode 100644
index 3f1a2b4..0000000
Binary files a/assets/logo.png and /dev/null differ
diff --git a/read me.md b/read me.md
--- a/read me.md
+++ b/read me.md
@@ -1 +1 @@
-a
+b
";
        let summary = build(&facade_with_diff(diff)).unwrap();
        assert_eq!(summary.files.len(), 2);
        assert_eq!(
            summary.file_links.as_deref(),
            Some("<a href='https://github.com/org/repo/blob/2222222bbbb/read me.md'>read me.md</a>")
        );
    }

    #[test]
    fn test_build_summary_not_initialized() {
        let env = ReviewEnv::new(Config::default(), RequestSource::LocalGit);
        let result = build(&GitHubFacade::new(&env));
        assert!(matches!(
            result,
            Err(SummaryError::Facade(FacadeError::NotInitialized))
        ));
    }

    #[test]
    fn test_render_markdown() {
        let summary = build(&facade_with_diff(DIFF)).unwrap();
        let md = render_markdown(&summary);
        assert!(md.contains("# PR #8: \"Tidy lib\""));
        assert!(md.contains("**Author:** carol"));
        assert!(md.contains("`main` <- `tidy`"));
        assert!(md.contains("- cleanup"));
        assert!(md.contains("Changed: <a href='https://github.com/org/repo/blob/2222222bbbb/src/lib.rs'>"));
        assert!(md.contains("- `gone.txt` (deleted) +0 -1"));
    }

    #[test]
    fn test_short_sha() {
        assert_eq!(short_sha("1111111aaaa"), "1111111");
        assert_eq!(short_sha("abc"), "abc");
    }

    #[test]
    fn test_output_to_file() {
        let summary = build(&facade_with_diff(DIFF)).unwrap();
        let path = std::env::temp_dir().join("pr_review_github_summary.md");
        output(&summary, Some(&path)).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("## Files"));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_output_to_terminal() {
        let summary = build(&facade_with_diff(DIFF)).unwrap();
        // Should not panic
        output(&summary, None).unwrap();
    }
}
