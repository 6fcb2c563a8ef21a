use kidboard_core::WorkspaceSnapshot;
use kidboard_derive::SnapshotBuilder;
use kidboard_store::WorkspaceConfig;

pub fn execute(config: WorkspaceConfig, compact: bool) -> anyhow::Result<()> {
    let snapshot = SnapshotBuilder::new(config).build();
    println!("{}", render(&snapshot, compact)?);
    Ok(())
}

fn render(snapshot: &WorkspaceSnapshot, compact: bool) -> anyhow::Result<String> {
    Ok(if compact {
        serde_json::to_string(snapshot)?
    } else {
        serde_json::to_string_pretty(snapshot)?
    })
}
