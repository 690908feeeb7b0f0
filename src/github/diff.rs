/// How a file changed within the pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Added,
    Modified,
    Deleted,
}

impl std::fmt::Display for FileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileStatus::Added => write!(f, "added"),
            FileStatus::Modified => write!(f, "modified"),
            FileStatus::Deleted => write!(f, "deleted"),
        }
    }
}

/// Per-file summary of a unified diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedFile {
    /// Path relative to the repository root (post-image path unless deleted)
    pub path: String,
    pub status: FileStatus,
    pub additions: usize,
    pub deletions: usize,
}

/// Summarise a unified diff file by file.
///
/// Sections begin at `diff --git a/{path} b/{path}`. Extended headers
/// (`new file mode`, `deleted file mode`) and the `---`/`+++` lines set the
/// status; binary changes carry only the extended headers. The `+++ b/` line,
/// when present, is the authoritative path. Lines inside hunks are counted by
/// their `+`/`-` prefix.
pub fn changed_files(raw_diff: &str) -> Vec<ChangedFile> {
    let mut files: Vec<ChangedFile> = Vec::new();
    let mut in_hunk = false;

    for line in raw_diff.lines() {
        if let Some(rest) = line.strip_prefix("diff --git ") {
            files.push(ChangedFile {
                path: header_path(rest),
                status: FileStatus::Modified,
                additions: 0,
                deletions: 0,
            });
            in_hunk = false;
            continue;
        }

        let Some(file) = files.last_mut() else {
            continue;
        };

        if line.starts_with("@@") {
            in_hunk = true;
        } else if !in_hunk {
            if line.starts_with("new file mode") || line == "--- /dev/null" {
                file.status = FileStatus::Added;
            } else if line.starts_with("deleted file mode") || line == "+++ /dev/null" {
                file.status = FileStatus::Deleted;
            } else if let Some(path) = line.strip_prefix("+++ b/") {
                file.path = path.trim_end_matches('\t').to_string();
            }
        } else if line.starts_with('+') {
            file.additions += 1;
        } else if line.starts_with('-') {
            file.deletions += 1;
        }
    }

    files
}

/// Path from `a/{old} b/{new}`. Paths may contain spaces, so an unrenamed
/// header is split at its midpoint; otherwise the last ` b/` wins.
fn header_path(rest: &str) -> String {
    if let Some(after_a) = rest.strip_prefix("a/") {
        if let Some(path_len) = after_a.len().checked_sub(3).map(|n| n / 2) {
            if let (Some(path), Some(tail)) = (after_a.get(..path_len), after_a.get(path_len..)) {
                if tail.strip_prefix(" b/") == Some(path) {
                    return path.to_string();
                }
            }
        }
    }
    match rest.rsplit_once(" b/") {
        Some((_, b_path)) => b_path.to_string(),
        None => rest.strip_prefix("a/").unwrap_or(rest).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_DIFF: &str = r#"diff --git a/src/main.rs b/src/main.rs
index abc1234..def5678 100644
--- a/src/main.rs
+++ b/src/main.rs
@@ -1,5 +1,7 @@
 fn main() {
-    println!("old");
+    println!("new");
+    // Added a comment
 }
diff --git a/docs/new.md b/docs/new.md
new file mode 100644
index 0000000..e69de29
--- /dev/null
+++ b/docs/new.md
@@ -0,0 +1,2 @@
+hello
+world
diff --git a/old.txt b/old.txt
deleted file mode 100644
index e69de29..0000000
--- a/old.txt
+++ /dev/null
@@ -1,3 +0,0 @@
-a
--- not a header
-c
"#;

    #[test]
    fn test_changed_files_statuses_and_counts() {
        let files = changed_files(SAMPLE_DIFF);
        assert_eq!(
            files,
            vec![
                ChangedFile {
                    path: "src/main.rs".to_string(),
                    status: FileStatus::Modified,
                    additions: 2,
                    deletions: 1,
                },
                ChangedFile {
                    path: "docs/new.md".to_string(),
                    status: FileStatus::Added,
                    additions: 2,
                    deletions: 0,
                },
                ChangedFile {
                    path: "old.txt".to_string(),
                    status: FileStatus::Deleted,
                    additions: 0,
                    deletions: 3,
                },
            ]
        );
    }

    #[test]
    fn test_binary_delete_and_add_use_extended_headers() {
        let diff = "diff --git a/logo.png b/logo.png
deleted file mode 100644
index 3f1a2b4..0000000
Binary files a/logo.png and /dev/null differ
diff --git a/icon.svg b/icon.svg
new file mode 100644
index 0000000..8c9d0e1
Binary files /dev/null and b/icon.svg differ
";
        let files = changed_files(diff);
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].path, "logo.png");
        assert_eq!(files[0].status, FileStatus::Deleted);
        assert_eq!(files[1].path, "icon.svg");
        assert_eq!(files[1].status, FileStatus::Added);
    }

    #[test]
    fn test_paths_with_spaces() {
        let diff = "diff --git a/my file.txt b/my file.txt
index abc1234..def5678 100644
--- a/my file.txt\t
+++ b/my file.txt\t
@@ -1 +1 @@
-old
+new
";
        let files = changed_files(diff);
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "my file.txt");
        assert_eq!(files[0].status, FileStatus::Modified);
        assert_eq!(files[0].additions, 1);
        assert_eq!(files[0].deletions, 1);
    }

    #[test]
    fn test_header_path_without_file_lines() {
        assert_eq!(header_path("a/docs/a b.md b/docs/a b.md"), "docs/a b.md");
        assert_eq!(header_path("a/old name.rs b/new name.rs"), "new name.rs");
        assert_eq!(header_path("a/x b/x"), "x");
    }

    #[test]
    fn test_changed_files_empty_diff() {
        assert!(changed_files("").is_empty());
        assert!(changed_files("   \n").is_empty());
    }

    #[test]
    fn test_file_status_display() {
        assert_eq!(FileStatus::Added.to_string(), "added");
        assert_eq!(FileStatus::Deleted.to_string(), "deleted");
    }
}
