use crate::github::ChangedFile;

/// Everything the summary prints about one pull request.
#[derive(Debug)]
pub struct Summary {
    /// PR number, when the payload carries one
    pub pr_number: Option<u64>,
    pub title: String,
    pub author: String,
    /// `base <- head` branch names
    pub base_branch: String,
    pub head_branch: String,
    pub base_commit: String,
    pub head_commit: String,
    pub labels: Vec<String>,
    /// Files parsed from the PR diff
    pub files: Vec<ChangedFile>,
    /// HTML links to every file still present at the head commit
    pub file_links: Option<String>,
}

impl Summary {
    pub fn additions(&self) -> usize {
        self.files.iter().map(|f| f.additions).sum()
    }

    pub fn deletions(&self) -> usize {
        self.files.iter().map(|f| f.deletions).sum()
    }

    pub fn heading(&self) -> String {
        match self.pr_number {
            Some(number) => format!("PR #{}: \"{}\"", number, self.title),
            None => format!("PR: \"{}\"", self.title),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::FileStatus;

    fn summary(pr_number: Option<u64>) -> Summary {
        Summary {
            pr_number,
            title: "Bump deps".to_string(),
            author: "bob".to_string(),
            base_branch: "main".to_string(),
            head_branch: "deps".to_string(),
            base_commit: "b".to_string(),
            head_commit: "h".to_string(),
            labels: vec![],
            files: vec![
                ChangedFile {
                    path: "Cargo.toml".to_string(),
                    status: FileStatus::Modified,
                    additions: 3,
                    deletions: 2,
                },
                ChangedFile {
                    path: "Cargo.lock".to_string(),
                    status: FileStatus::Modified,
                    additions: 40,
                    deletions: 38,
                },
            ],
            file_links: None,
        }
    }

    #[test]
    fn test_totals() {
        let summary = summary(Some(3));
        assert_eq!(summary.additions(), 43);
        assert_eq!(summary.deletions(), 40);
    }

    #[test]
    fn test_heading_with_and_without_number() {
        assert_eq!(summary(Some(3)).heading(), "PR #3: \"Bump deps\"");
        assert_eq!(summary(None).heading(), "PR: \"Bump deps\"");
    }
}
