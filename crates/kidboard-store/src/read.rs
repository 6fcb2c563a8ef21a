//! Fail-soft readers.
//!
//! Every public function here returns an empty value instead of an error.
//! The `try_*` twins carry the cause, which is logged at debug level and
//! then dropped.

use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::UNIX_EPOCH;

use crate::error::ReadError;

/// One directory entry, as seen by the collectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryRef {
    pub name: String,
    pub is_dir: bool,
    pub is_file: bool,
}

pub fn try_read_text(path: &Path) -> Result<String, ReadError> {
    fs::read_to_string(path).map_err(|e| ReadError::unavailable(path, e))
}

/// Entries of `dir`, sorted by name.
pub fn try_list_entries(dir: &Path) -> Result<Vec<DirEntryRef>, ReadError> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| ReadError::unavailable(dir, e))? {
        let entry = entry.map_err(|e| ReadError::unavailable(dir, e))?;
        let file_type = entry
            .file_type()
            .map_err(|e| ReadError::unavailable(entry.path(), e))?;
        entries.push(DirEntryRef {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir: file_type.is_dir(),
            is_file: file_type.is_file(),
        });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

pub fn try_modified_ms(path: &Path) -> Result<i64, ReadError> {
    let modified = fs::metadata(path)
        .and_then(|m| m.modified())
        .map_err(|e| ReadError::unavailable(path, e))?;
    let since_epoch = modified
        .duration_since(UNIX_EPOCH)
        .map_err(|e| ReadError::parse(format!("mtime of {}", path.display()), e))?;
    Ok(since_epoch.as_millis() as i64)
}

/// Run `program args...` in `cwd` and return stdout with trailing
/// whitespace removed. Stderr is discarded.
pub fn try_run_command(program: &str, args: &[&str], cwd: &Path) -> Result<String, ReadError> {
    let output = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .map_err(|e| ReadError::unavailable(program, e))?;
    if !output.status.success() {
        return Err(ReadError::CommandFailed {
            program: program.to_string(),
            status: output.status.to_string(),
        });
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(stdout.trim_end().to_string())
}

fn absorb<T: Default>(result: Result<T, ReadError>) -> T {
    result.unwrap_or_else(|e| {
        tracing::debug!(error = %e, "workspace read degraded to default");
        T::default()
    })
}

/// File contents, or `""` when unreadable.
pub fn read_text(path: &Path) -> String {
    absorb(try_read_text(path))
}

/// Directory entries sorted by name, or empty when unreadable.
pub fn list_entries(dir: &Path) -> Vec<DirEntryRef> {
    absorb(try_list_entries(dir))
}

/// Modification time in ms since the epoch, or `None` when unreadable.
pub fn modified_ms(path: &Path) -> Option<i64> {
    match try_modified_ms(path) {
        Ok(ms) => Some(ms),
        Err(e) => {
            tracing::debug!(error = %e, "mtime unavailable");
            None
        }
    }
}

/// Command stdout, or `""` on spawn failure or non-zero exit.
pub fn run_command(program: &str, args: &[&str], cwd: &Path) -> String {
    absorb(try_run_command(program, args, cwd))
}
