//! Loose parser for the `---` header block at the top of a `SKILL.md`.
//!
//! Only `name`, `description` and a single-line JSON `metadata` value are
//! recognised. Anything that does not fit yields empty defaults.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

static HEADER_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)---\n(.*?)\n---").unwrap());
static NAME_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*name:\s*(.+)$").unwrap());
static DESCRIPTION_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*description:\s*(.+)$").unwrap());
static METADATA_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*metadata:\s*(\{.*\})$").unwrap());

#[derive(Debug, Clone, PartialEq)]
pub struct SkillFrontmatter {
    pub name: String,
    pub description: String,
    /// Always a JSON object; `{}` when absent or unparseable.
    pub metadata: Value,
}

impl Default for SkillFrontmatter {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            metadata: Value::Object(serde_json::Map::new()),
        }
    }
}

impl SkillFrontmatter {
    /// Look up `metadata.<namespace>.<key>` as display text.
    ///
    /// Strings are returned as-is, numbers in their JSON form. Empty
    /// strings, zero and other falsy values count as missing.
    pub fn meta_text(&self, namespace: &str, key: &str) -> Option<String> {
        match self.metadata.get(namespace)?.get(key)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
            _ => None,
        }
    }
}

fn capture(section: &str, re: &Regex) -> String {
    re.captures(section)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// Parse the first header block of `text`.
pub fn parse(text: &str) -> SkillFrontmatter {
    let Some(section) = HEADER_BLOCK
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
    else {
        return SkillFrontmatter::default();
    };

    let raw_metadata = capture(section, &METADATA_KEY);
    let metadata = if raw_metadata.is_empty() {
        None
    } else {
        serde_json::from_str::<Value>(&raw_metadata)
            .ok()
            .filter(Value::is_object)
    };

    SkillFrontmatter {
        name: capture(section, &NAME_KEY),
        description: capture(section, &DESCRIPTION_KEY),
        metadata: metadata.unwrap_or_else(|| Value::Object(serde_json::Map::new())),
    }
}
