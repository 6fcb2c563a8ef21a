//! Per-section collectors. Each one reads a slice of the workspace and
//! falls back to a fixed default when the slice is missing.

use kidboard_core::{ChatLine, DecisionTraceEntry, LiveEvent, MemoryFileRef, TraceKind};
use kidboard_store::{list_entries, modified_ms, read_text, CommitLine, WorkspacePaths};

pub(crate) const DEFAULT_MEMORY_FILE: &str = "MEMORY.md";
pub(crate) const NEXT_MOVE_IDLE: &str = "Ask me anything about your thesis, and I will log it here.";

const CHAT_TAIL: usize = 4;
const BUDDY_TAIL: usize = 3;
const THESIS_HEAD: usize = 20;
const TRACE_NOTE_BASE_ID: u32 = 100;

// ── Memory ──

/// `.md` files under `memory/`, newest first.
pub(crate) fn memory_files(paths: &WorkspacePaths) -> Vec<MemoryFileRef> {
    let mut files: Vec<MemoryFileRef> = list_entries(&paths.memory_dir)
        .into_iter()
        .filter(|e| e.is_file && e.name.ends_with(".md"))
        .map(|e| MemoryFileRef {
            modified: modified_ms(&paths.memory_dir.join(&e.name)).unwrap_or(0),
            name: e.name,
        })
        .collect();
    files.sort_by(|a, b| b.modified.cmp(&a.modified));
    files
}

/// Name and content of the newest memory file.
pub(crate) fn latest_memory(paths: &WorkspacePaths, files: &[MemoryFileRef]) -> (String, String) {
    match files.first() {
        Some(f) => (f.name.clone(), read_text(&paths.memory_dir.join(&f.name))),
        None => (DEFAULT_MEMORY_FILE.to_string(), String::new()),
    }
}

/// Last few non-blank lines of the current memory note, as chat bubbles.
pub(crate) fn chat_logs(memory_content: &str) -> Vec<ChatLine> {
    let lines: Vec<&str> = memory_content
        .split('\n')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    let start = lines.len().saturating_sub(CHAT_TAIL);
    lines[start..]
        .iter()
        .enumerate()
        .map(|(i, line)| ChatLine {
            role: "note".into(),
            text: line.to_string(),
            time: format!("{}:00", 16 - i),
        })
        .collect()
}

// ── Live events ──

/// One event per working-tree status line, or a single "clean" event.
pub(crate) fn live_events(status_lines: &[String], limit: usize) -> Vec<LiveEvent> {
    let mut events: Vec<LiveEvent> = status_lines
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, line)| LiveEvent {
            icon: "⚙️".into(),
            text: line.clone(),
            time: format!("{}m ago", i * 2 + 1),
            status: "done".into(),
            skill: None,
        })
        .collect();
    if events.is_empty() {
        events.push(LiveEvent {
            icon: "✅".into(),
            text: "Workspace clean".into(),
            time: "just now".into(),
            status: "done".into(),
            skill: None,
        });
    }
    events
}

// ── Decision trace ──

/// Leading lines of the requirements note, then recent commits.
pub(crate) fn decision_trace(
    paths: &WorkspacePaths,
    commits: &[CommitLine],
    note_limit: usize,
) -> Vec<DecisionTraceEntry> {
    let notes = read_text(&paths.requirements_note);
    let manual = notes
        .split('\n')
        .filter(|l| !l.is_empty())
        .take(note_limit)
        .enumerate()
        .map(|(i, line)| DecisionTraceEntry {
            id: TRACE_NOTE_BASE_ID + i as u32,
            kind: TraceKind::Action,
            content: line.trim().to_string(),
        });
    let tools = commits.iter().map(|c| DecisionTraceEntry {
        id: c.id,
        kind: TraceKind::Tool,
        content: format!("git {}", c.text),
    });
    manual.chain(tools).collect()
}

// ── Check-ins and thesis ──

/// Last three check-in lines with their list marker stripped.
pub(crate) fn buddy_log(paths: &WorkspacePaths) -> Vec<String> {
    let text = read_text(&paths.checkin_log);
    let lines: Vec<&str> = text.split('\n').filter(|l| !l.is_empty()).collect();
    let start = lines.len().saturating_sub(BUDDY_TAIL);
    lines[start..]
        .iter()
        .map(|l| strip_list_marker(l).to_string())
        .collect()
}

fn strip_list_marker(line: &str) -> &str {
    match line.strip_prefix('-') {
        Some(rest) => rest.trim_start(),
        None => line,
    }
}

/// First lines of the thesis tracker.
pub(crate) fn thesis_summary(paths: &WorkspacePaths) -> String {
    let text = read_text(&paths.thesis_tracker);
    if text.is_empty() {
        return String::new();
    }
    text.split('\n').take(THESIS_HEAD).collect::<Vec<_>>().join("\n")
}

/// Suggest the next step from the latest check-in and the thesis tracker.
pub(crate) fn next_move(buddy_log: &[String], thesis_summary: &str) -> String {
    if buddy_log.is_empty() && thesis_summary.is_empty() {
        return NEXT_MOVE_IDLE.to_string();
    }
    let latest = buddy_log
        .last()
        .map(String::as_str)
        .unwrap_or("No recent question yet.");
    let thesis_line = thesis_summary
        .split('\n')
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(|hint| format!("I also captured: \"{hint}\"."))
        .unwrap_or_default();
    format!(
        "Next move: respond to the question \"{latest}\". {thesis_line} If you need a subtask, tell me to log it."
    )
}
