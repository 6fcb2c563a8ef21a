use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::read::run_command;

/// One line of `git log --pretty=format:%h|%s`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommitLine {
    /// Position in the log, 0 = newest.
    pub id: u32,
    pub hash: String,
    pub text: String,
}

/// Read-only git queries against one working tree.
///
/// Every query returns an empty result when the directory is not a
/// repository or `git` is not installed.
#[derive(Debug, Clone)]
pub struct GitHistory {
    cwd: PathBuf,
}

impl GitHistory {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self { cwd: cwd.into() }
    }

    fn git(&self, args: &[&str]) -> String {
        run_command("git", args, &self.cwd)
    }

    /// The `n` most recent commits, newest first.
    pub fn recent_commits(&self, n: usize) -> Vec<CommitLine> {
        let limit = format!("-{n}");
        parse_log(&self.git(&["log", &limit, "--pretty=format:%h|%s"]))
    }

    /// Raw `git status -sb` lines, branch summary line included.
    pub fn working_tree_changes(&self) -> Vec<String> {
        let output = self.git(&["status", "-sb"]);
        if output.is_empty() {
            return Vec::new();
        }
        output.lines().map(str::to_string).collect()
    }

    /// Number of commits reachable from HEAD, `"0"` when unknown.
    pub fn commit_count(&self) -> String {
        let count = self.git(&["rev-list", "--count", "HEAD"]);
        if count.is_empty() {
            "0".to_string()
        } else {
            count
        }
    }
}

/// Parse `hash|subject` lines. A line without `|` keeps an empty subject.
pub fn parse_log(output: &str) -> Vec<CommitLine> {
    if output.is_empty() {
        return Vec::new();
    }
    output
        .lines()
        .enumerate()
        .map(|(index, line)| {
            let (hash, text) = line.split_once('|').unwrap_or((line, ""));
            CommitLine {
                id: index as u32,
                hash: hash.to_string(),
                text: text.to_string(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::process::Command;

    fn git(dir: &Path, args: &[&str]) {
        let _ = Command::new("git").args(args).current_dir(dir).output();
    }

    fn init_repo(dir: &Path) {
        git(dir, &["init", "-q"]);
        git(dir, &["config", "user.email", "test@test.com"]);
        git(dir, &["config", "user.name", "Test"]);
    }

    fn git_available() -> bool {
        Command::new("git")
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    #[test]
    fn parse_log_positions_and_subjects() {
        let commits = parse_log("abc123|Add skills page\ndef456|Fix: a|b split\n789fff");
        assert_eq!(commits.len(), 3);
        assert_eq!(commits[0].id, 0);
        assert_eq!(commits[0].hash, "abc123");
        assert_eq!(commits[0].text, "Add skills page");
        assert_eq!(commits[1].text, "Fix: a|b split");
        assert_eq!(commits[2].hash, "789fff");
        assert_eq!(commits[2].text, "");
    }

    #[test]
    fn parse_log_empty() {
        assert!(parse_log("").is_empty());
    }

    #[test]
    fn not_a_repo_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let history = GitHistory::new(tmp.path().join("missing"));
        assert!(history.recent_commits(5).is_empty());
        assert!(history.working_tree_changes().is_empty());
        assert_eq!(history.commit_count(), "0");
    }

    #[test]
    fn reads_commits_and_status() {
        if !git_available() {
            return;
        }
        let tmp = tempfile::tempdir().unwrap();
        init_repo(tmp.path());
        std::fs::write(tmp.path().join("README"), "hi").unwrap();
        git(tmp.path(), &["add", "."]);
        git(tmp.path(), &["commit", "-q", "-m", "first"]);
        std::fs::write(tmp.path().join("README"), "changed").unwrap();
        git(tmp.path(), &["commit", "-q", "-am", "second"]);
        std::fs::write(tmp.path().join("dirty.txt"), "x").unwrap();

        let history = GitHistory::new(tmp.path());
        let commits = history.recent_commits(5);
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].text, "second");
        assert_eq!(commits[1].text, "first");
        assert_eq!(history.commit_count(), "2");

        let status = history.working_tree_changes();
        assert!(status[0].starts_with("##"));
        assert!(status.iter().any(|l| l.contains("dirty.txt")));
    }
}
