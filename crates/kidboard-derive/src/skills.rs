use kidboard_core::frontmatter::{self, SkillFrontmatter};
use kidboard_core::relative::{relative, within_day};
use kidboard_core::{Freshness, Skill};
use kidboard_store::{list_entries, modified_ms, read_text, WorkspacePaths};

const DEFAULT_ICON: &str = "🧠";
const DEFAULT_DESCRIPTION: &str = "Ready for fast installs.";
const META_NAMESPACE: &str = "clawdbot";

fn refresh_command(dir_name: &str) -> String {
    format!("codex exec -- \"cd ../skills/{dir_name} && git pull\"")
}

/// Placeholder rating for skill `index`: 4.0 through 4.5, cycling.
pub(crate) fn filler_rating(index: usize) -> String {
    let tenths = 40 + index % 6;
    format!("{}.{}", tenths / 10, tenths % 10)
}

/// Placeholder download count for skill `index`: `floor(3 + 0.8 * index)` K.
pub(crate) fn filler_downloads(index: usize) -> String {
    format!("{}K", (30 + index * 8) / 10)
}

/// Catalog shown when no skill directory can be found.
pub fn fallback_catalog() -> Vec<Skill> {
    vec![
        Skill {
            name: "kid-insights".into(),
            description: "Monitor Kid core signals".into(),
            downloads: "6.4K".into(),
            last_updated: "1d ago".into(),
            status: Freshness::Fresh,
            rating: "4.9".into(),
            icon: "💡".into(),
            refresh_command: refresh_command("kid-insights"),
        },
        Skill {
            name: "vibe-ml".into(),
            description: "Generative timeline prompts".into(),
            downloads: "3.2K".into(),
            last_updated: "3d ago".into(),
            status: Freshness::Stale,
            rating: "4.6".into(),
            icon: "✨".into(),
            refresh_command: refresh_command("vibe-ml"),
        },
    ]
}

/// Enumerates `skills/<dir>/` and enriches each entry from its `SKILL.md`.
pub struct SkillCatalogBuilder<'a> {
    paths: &'a WorkspacePaths,
    now_ms: i64,
}

impl<'a> SkillCatalogBuilder<'a> {
    pub fn new(paths: &'a WorkspacePaths, now_ms: i64) -> Self {
        Self { paths, now_ms }
    }

    /// Skills sorted by name; the fallback catalog when none are found.
    pub fn build(&self) -> Vec<Skill> {
        let dirs: Vec<String> = list_entries(&self.paths.skills_dir)
            .into_iter()
            .filter(|e| e.is_dir)
            .map(|e| e.name)
            .collect();
        if dirs.is_empty() {
            tracing::debug!(dir = %self.paths.skills_dir.display(), "no skills found, using fallback catalog");
            return fallback_catalog();
        }

        let mut skills: Vec<Skill> = dirs
            .iter()
            .enumerate()
            .map(|(index, dir)| self.build_one(index, dir))
            .collect();
        skills.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        });
        skills
    }

    fn build_one(&self, index: usize, dir: &str) -> Skill {
        let meta: SkillFrontmatter = frontmatter::parse(&read_text(&self.paths.skill_doc(dir)));
        let mtime = modified_ms(&self.paths.skills_dir.join(dir));
        let status = if within_day(mtime, self.now_ms) {
            Freshness::Fresh
        } else {
            Freshness::Stale
        };

        Skill {
            name: non_empty_or(meta.name.clone(), dir),
            description: non_empty_or(meta.description.clone(), DEFAULT_DESCRIPTION),
            downloads: meta
                .meta_text(META_NAMESPACE, "downloads")
                .unwrap_or_else(|| filler_downloads(index)),
            last_updated: relative(mtime, self.now_ms),
            status,
            rating: meta
                .meta_text(META_NAMESPACE, "rating")
                .unwrap_or_else(|| filler_rating(index)),
            icon: meta
                .meta_text(META_NAMESPACE, "emoji")
                .unwrap_or_else(|| DEFAULT_ICON.to_string()),
            refresh_command: refresh_command(dir),
        }
    }
}

fn non_empty_or(value: String, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kidboard_core::relative::now_ms;
    use std::fs;

    const DAY_MS: i64 = 86_400_000;

    fn workspace() -> (tempfile::TempDir, WorkspacePaths) {
        let tmp = tempfile::tempdir().unwrap();
        let paths = WorkspacePaths::discover(tmp.path().join("dashboard"), tmp.path());
        (tmp, paths)
    }

    #[test]
    fn filler_values_are_index_derived() {
        assert_eq!(filler_rating(0), "4.0");
        assert_eq!(filler_rating(5), "4.5");
        assert_eq!(filler_rating(6), "4.0");
        assert_eq!(filler_downloads(0), "3K");
        assert_eq!(filler_downloads(1), "3K");
        assert_eq!(filler_downloads(2), "4K");
        assert_eq!(filler_downloads(10), "11K");
    }

    #[test]
    fn missing_root_returns_fallback() {
        let (_tmp, paths) = workspace();
        let skills = SkillCatalogBuilder::new(&paths, now_ms()).build();
        assert_eq!(skills, fallback_catalog());
        assert_eq!(skills.len(), 2);
        assert!(skills.windows(2).all(|w| w[0].name <= w[1].name));
    }

    #[test]
    fn empty_root_returns_fallback() {
        let (_tmp, paths) = workspace();
        fs::create_dir_all(&paths.skills_dir).unwrap();
        fs::write(paths.skills_dir.join("README.md"), "not a skill").unwrap();
        let skills = SkillCatalogBuilder::new(&paths, now_ms()).build();
        assert_eq!(skills[0].name, "kid-insights");
        assert_eq!(skills[1].name, "vibe-ml");
    }

    #[test]
    fn directory_without_doc_gets_defaults() {
        let (_tmp, paths) = workspace();
        fs::create_dir_all(paths.skills_dir.join("web-research")).unwrap();
        let skills = SkillCatalogBuilder::new(&paths, now_ms()).build();
        assert_eq!(skills.len(), 1);
        let s = &skills[0];
        assert_eq!(s.name, "web-research");
        assert_eq!(s.description, "Ready for fast installs.");
        assert_eq!(s.icon, "🧠");
        assert_eq!(s.rating, "4.0");
        assert_eq!(s.downloads, "3K");
        assert_eq!(s.status, Freshness::Fresh);
        assert_eq!(s.last_updated, "just now");
        assert_eq!(
            s.refresh_command,
            "codex exec -- \"cd ../skills/web-research && git pull\""
        );
    }

    #[test]
    fn metadata_overrides_and_sorting() {
        let (_tmp, paths) = workspace();
        for dir in ["b-dir", "a-dir"] {
            fs::create_dir_all(paths.skills_dir.join(dir)).unwrap();
        }
        fs::write(
            paths.skill_doc("b-dir"),
            "---\nname: Alpha Tool\ndescription: Does alpha things\nmetadata: {\"clawdbot\":{\"emoji\":\"🛠\",\"rating\":\"4.8\",\"downloads\":\"12.4K\"}}\n---\n",
        )
        .unwrap();
        let skills = SkillCatalogBuilder::new(&paths, now_ms()).build();
        assert_eq!(skills.len(), 2);
        // "a-dir" sorts before "Alpha Tool" case-insensitively
        assert_eq!(skills[0].name, "a-dir");
        assert_eq!(skills[0].rating, "4.0");
        assert_eq!(skills[1].name, "Alpha Tool");
        assert_eq!(skills[1].icon, "🛠");
        assert_eq!(skills[1].rating, "4.8");
        assert_eq!(skills[1].downloads, "12.4K");
        assert_eq!(skills[1].description, "Does alpha things");
        // index follows the directory listing, not the sorted output
        assert!(skills[1].refresh_command.contains("b-dir"));
    }

    #[test]
    fn old_directories_are_stale() {
        let (_tmp, paths) = workspace();
        fs::create_dir_all(paths.skills_dir.join("slack-mod")).unwrap();
        let later = now_ms() + 3 * DAY_MS;
        let skills = SkillCatalogBuilder::new(&paths, later).build();
        assert_eq!(skills[0].status, Freshness::Stale);
        assert_eq!(skills[0].last_updated, "3d ago");
    }

    #[test]
    fn repeated_builds_are_identical() {
        let (_tmp, paths) = workspace();
        for dir in ["one", "two", "three"] {
            fs::create_dir_all(paths.skills_dir.join(dir)).unwrap();
        }
        let now = now_ms();
        let first = SkillCatalogBuilder::new(&paths, now).build();
        let second = SkillCatalogBuilder::new(&paths, now).build();
        assert_eq!(first, second);
    }
}
