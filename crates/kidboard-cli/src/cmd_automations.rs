use kidboard_derive::build_automations;
use kidboard_store::WorkspaceConfig;

pub fn execute(config: &WorkspaceConfig) -> anyhow::Result<()> {
    let summary = build_automations(config);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
