use std::path::PathBuf;

/// Why a workspace read came back empty.
///
/// These never leave the crate's safe readers: callers only see the
/// empty/default value, and the cause goes to the debug log.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("{path} unavailable: {source}")]
    ResourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("`{program}` exited with {status}")]
    CommandFailed { program: String, status: String },
    #[error("could not parse {what}: {detail}")]
    ParseFailure { what: String, detail: String },
}

impl ReadError {
    pub fn unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ResourceUnavailable {
            path: path.into(),
            source,
        }
    }

    pub fn parse(what: impl Into<String>, detail: impl ToString) -> Self {
        Self::ParseFailure {
            what: what.into(),
            detail: detail.to_string(),
        }
    }
}
