use std::path::{Path, PathBuf};

use serde::Deserialize;

const DEFAULT_COMMIT_LIMIT: usize = 5;
const DEFAULT_EVENT_LIMIT: usize = 5;
const DEFAULT_TRACE_NOTE_LIMIT: usize = 3;

/// All well-known files read by the aggregation engine.
#[derive(Debug, Clone)]
pub struct WorkspacePaths {
    pub project_root: PathBuf,
    pub workspace_root: PathBuf,
    pub memory_dir: PathBuf,
    pub skills_dir: PathBuf,
    pub position_log: PathBuf,
    pub sentiment_note: PathBuf,
    pub soul_file: PathBuf,
    pub workspace_checkin: PathBuf,
    pub requirements_note: PathBuf,
    pub checkin_log: PathBuf,
    pub thesis_tracker: PathBuf,
    pub config_json: PathBuf,
}

impl WorkspacePaths {
    /// Derive all paths from the two roots. Pure computation, no I/O.
    pub fn discover(project_root: impl Into<PathBuf>, workspace_root: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        let workspace_root = workspace_root.into();
        let memory_dir = workspace_root.join("memory");
        Self {
            skills_dir: workspace_root.join("skills"),
            position_log: workspace_root.join("sui-pnl-log.csv"),
            sentiment_note: memory_dir.join("crypto-sentiment.md"),
            soul_file: workspace_root.join("SOUL.md"),
            workspace_checkin: workspace_root.join("buddy-checkin.md"),
            requirements_note: project_root.join("function-req.txt"),
            checkin_log: project_root.join("buddy-checkin.md"),
            thesis_tracker: project_root.join("thesis-tracker.md"),
            config_json: project_root.join(".kidboard").join("config.json"),
            memory_dir,
            project_root,
            workspace_root,
        }
    }

    /// Definition document of the skill in directory `dir_name`.
    pub fn skill_doc(&self, dir_name: &str) -> PathBuf {
        self.skills_dir.join(dir_name).join("SKILL.md")
    }
}

/// Explicit configuration handed to every builder.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkspaceConfig {
    /// Directory holding the dashboard project (git queries run here).
    pub project_root: PathBuf,
    /// Directory holding `memory/`, `skills/` and the automation logs.
    pub workspace_root: PathBuf,
    pub commit_limit: usize,
    pub event_limit: usize,
    pub trace_note_limit: usize,
}

/// Optional overrides read from `.kidboard/config.json`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileOverrides {
    workspace_root: Option<PathBuf>,
    commit_limit: Option<usize>,
    event_limit: Option<usize>,
    trace_note_limit: Option<usize>,
}

fn parent_or_up(project_root: &Path) -> PathBuf {
    match project_root.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => project_root.join(".."),
    }
}

impl WorkspaceConfig {
    /// Defaults only: the workspace is the project's parent directory.
    pub fn discover(project_root: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        Self {
            workspace_root: parent_or_up(&project_root),
            project_root,
            commit_limit: DEFAULT_COMMIT_LIMIT,
            event_limit: DEFAULT_EVENT_LIMIT,
            trace_note_limit: DEFAULT_TRACE_NOTE_LIMIT,
        }
    }

    /// Defaults, then `.kidboard/config.json`, then `KIDBOARD_*` env vars.
    ///
    /// A missing config file is fine; a malformed one is an error.
    pub fn load(project_root: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let mut config = Self::discover(project_root);
        let config_json = config.paths().config_json;
        if config_json.exists() {
            let content = std::fs::read_to_string(&config_json)?;
            let overrides: FileOverrides = serde_json::from_str(&content).map_err(|e| {
                anyhow::anyhow!("invalid config {}: {e}", config_json.display())
            })?;
            config.apply(overrides);
        }
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// `KIDBOARD_COMMIT_LIMIT` / `KIDBOARD_EVENT_LIMIT` from `lookup`.
    /// Unparseable values are ignored.
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let limit = |key: &str| lookup(key).and_then(|v| v.trim().parse::<usize>().ok());
        if let Some(n) = limit("KIDBOARD_COMMIT_LIMIT") {
            self.commit_limit = n;
        }
        if let Some(n) = limit("KIDBOARD_EVENT_LIMIT") {
            self.event_limit = n;
        }
    }

    fn apply(&mut self, overrides: FileOverrides) {
        if let Some(root) = overrides.workspace_root {
            self.workspace_root = if root.is_absolute() {
                root
            } else {
                self.project_root.join(root)
            };
        }
        if let Some(n) = overrides.commit_limit {
            self.commit_limit = n;
        }
        if let Some(n) = overrides.event_limit {
            self.event_limit = n;
        }
        if let Some(n) = overrides.trace_note_limit {
            self.trace_note_limit = n;
        }
    }

    pub fn with_workspace_root(mut self, workspace_root: impl Into<PathBuf>) -> Self {
        self.workspace_root = workspace_root.into();
        self
    }

    pub fn paths(&self) -> WorkspacePaths {
        WorkspacePaths::discover(&self.project_root, &self.workspace_root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discover_builds_correct_paths() {
        let p = WorkspacePaths::discover("/ws/dashboard", "/ws");
        assert_eq!(p.memory_dir, PathBuf::from("/ws/memory"));
        assert_eq!(p.skills_dir, PathBuf::from("/ws/skills"));
        assert_eq!(p.sentiment_note, PathBuf::from("/ws/memory/crypto-sentiment.md"));
        assert_eq!(p.position_log, PathBuf::from("/ws/sui-pnl-log.csv"));
        assert_eq!(
            p.requirements_note,
            PathBuf::from("/ws/dashboard/function-req.txt")
        );
        assert_eq!(
            p.config_json,
            PathBuf::from("/ws/dashboard/.kidboard/config.json")
        );
        assert_eq!(
            p.skill_doc("web-research"),
            PathBuf::from("/ws/skills/web-research/SKILL.md")
        );
    }

    #[test]
    fn workspace_defaults_to_project_parent() {
        let c = WorkspaceConfig::discover("/ws/dashboard");
        assert_eq!(c.workspace_root, PathBuf::from("/ws"));
        assert_eq!(c.commit_limit, 5);
        assert_eq!(c.event_limit, 5);
        assert_eq!(c.trace_note_limit, 3);
    }

    #[test]
    fn relative_project_walks_up() {
        let c = WorkspaceConfig::discover("dashboard");
        assert_eq!(c.workspace_root, PathBuf::from("dashboard/.."));
    }

    #[test]
    fn load_without_config_file_uses_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let c = WorkspaceConfig::load(tmp.path()).unwrap();
        assert_eq!(c.project_root, tmp.path());
        assert_eq!(c.trace_note_limit, 3);
    }

    #[test]
    fn load_applies_file_overrides() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join(".kidboard")).unwrap();
        std::fs::write(
            tmp.path().join(".kidboard/config.json"),
            r#"{"workspace_root": "shared", "trace_note_limit": 1}"#,
        )
        .unwrap();
        let c = WorkspaceConfig::load(tmp.path()).unwrap();
        assert_eq!(c.workspace_root, tmp.path().join("shared"));
        assert_eq!(c.trace_note_limit, 1);
    }

    #[test]
    fn load_rejects_malformed_config() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join(".kidboard")).unwrap();
        std::fs::write(tmp.path().join(".kidboard/config.json"), "{ nope").unwrap();
        let err = WorkspaceConfig::load(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("invalid config"));
    }

    #[test]
    fn env_overrides_limits_after_file() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join(".kidboard")).unwrap();
        std::fs::write(
            tmp.path().join(".kidboard/config.json"),
            r#"{"commit_limit": 9, "event_limit": 9}"#,
        )
        .unwrap();
        let mut c = WorkspaceConfig::load(tmp.path()).unwrap();
        c.apply_env(|key| match key {
            "KIDBOARD_COMMIT_LIMIT" => Some(" 2 ".to_string()),
            "KIDBOARD_EVENT_LIMIT" => Some("lots".to_string()),
            _ => None,
        });
        assert_eq!(c.commit_limit, 2);
        // unparseable value keeps the file setting
        assert_eq!(c.event_limit, 9);
        assert_eq!(c.trace_note_limit, 3);
    }

    #[test]
    fn env_absent_keeps_defaults() {
        let mut c = WorkspaceConfig::discover("/ws/dashboard");
        c.apply_env(|_| None);
        assert_eq!(c.commit_limit, 5);
        assert_eq!(c.event_limit, 5);
    }
}
