mod cmd_automations;
mod cmd_serve;
mod cmd_skills;
mod cmd_snapshot;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use kidboard_store::WorkspaceConfig;

#[derive(Parser)]
#[command(name = "kidboard", version, about = "Live telemetry for a personal agent workspace")]
struct Cli {
    /// Dashboard project directory (default: current directory)
    #[arg(long, global = true)]
    project: Option<PathBuf>,
    /// Workspace root holding memory/ and skills/ (default: project parent)
    #[arg(long, global = true)]
    workspace: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the full workspace snapshot as JSON
    Snapshot {
        /// Single-line JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },
    /// List the skill catalog
    Skills,
    /// Print the live automations summary as JSON
    Automations,
    /// Start the HTTP API server
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
        /// Port to listen on
        #[arg(long, default_value = "7878")]
        port: u16,
    },
}

fn log_filter() -> tracing_subscriber::EnvFilter {
    let level = std::env::var("KIDBOARD_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "warn".to_string());
    tracing_subscriber::EnvFilter::try_new(level)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
}

fn load_config(project: Option<&Path>, workspace: Option<&Path>) -> anyhow::Result<WorkspaceConfig> {
    let project_root = match project {
        Some(p) => p.to_path_buf(),
        None => std::env::current_dir()?,
    };
    let config = WorkspaceConfig::load(project_root)?;
    Ok(match workspace {
        Some(ws) => config.with_workspace_root(ws),
        None => config,
    })
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.project.as_deref(), cli.workspace.as_deref())?;
    tracing::debug!(
        project = %config.project_root.display(),
        workspace = %config.workspace_root.display(),
        "workspace resolved"
    );

    match cli.cmd {
        Command::Snapshot { compact } => cmd_snapshot::execute(config, compact),
        Command::Skills => cmd_skills::execute(&config),
        Command::Automations => cmd_automations::execute(&config),
        Command::Serve { bind, port } => cmd_serve::execute(config, &bind, port),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_schema_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["kidboard", "serve", "--port", "9000", "--project", "/tmp/p"]);
        assert_eq!(cli.project.as_deref(), Some(Path::new("/tmp/p")));
        match cli.cmd {
            Command::Serve { bind, port } => {
                assert_eq!(bind, "127.0.0.1");
                assert_eq!(port, 9000);
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn workspace_flag_overrides_parent() {
        let tmp = tempfile::tempdir().unwrap();
        let project = tmp.path().join("dashboard");
        std::fs::create_dir_all(&project).unwrap();
        let elsewhere = tmp.path().join("elsewhere");

        let config = load_config(Some(&project), None).unwrap();
        assert_eq!(config.workspace_root, tmp.path());
        let config = load_config(Some(&project), Some(&elsewhere)).unwrap();
        assert_eq!(config.workspace_root, elsewhere);
    }
}
