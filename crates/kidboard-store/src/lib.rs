pub mod error;
pub mod git;
pub mod paths;
pub mod read;

pub use error::ReadError;
pub use git::{CommitLine, GitHistory};
pub use paths::{WorkspaceConfig, WorkspacePaths};
pub use read::{list_entries, modified_ms, read_text, run_command, DirEntryRef};
