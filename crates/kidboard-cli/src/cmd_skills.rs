use kidboard_core::relative::now_ms;
use kidboard_core::{Freshness, Skill};
use kidboard_derive::SkillCatalogBuilder;
use kidboard_store::WorkspaceConfig;

pub fn execute(config: &WorkspaceConfig) -> anyhow::Result<()> {
    let paths = config.paths();
    let skills = SkillCatalogBuilder::new(&paths, now_ms()).build();
    for skill in &skills {
        println!("{}", format_line(skill));
    }
    Ok(())
}

fn format_line(skill: &Skill) -> String {
    let status = match skill.status {
        Freshness::Fresh => "fresh",
        Freshness::Stale => "stale",
    };
    format!(
        "{} {:<24} {:>4}  {:>6}  {:<10} {}",
        skill.icon, skill.name, skill.rating, skill.downloads, skill.last_updated, status
    )
}
