use kidboard_serve::ServeConfig;
use kidboard_store::WorkspaceConfig;

pub fn execute(config: WorkspaceConfig, bind: &str, port: u16) -> anyhow::Result<()> {
    let serve = ServeConfig {
        bind: bind.to_string(),
        port,
    };
    tokio::runtime::Runtime::new()?.block_on(kidboard_serve::serve(config, serve))
}
