//! Correlate free-text live events with cataloged skills.

use crate::types::{ActiveSkillBinding, LiveEvent, Skill};

/// Finds the skill a piece of event text refers to.
pub trait SkillMatcher {
    fn find<'a>(&self, text: &str, catalog: &'a [Skill]) -> Option<&'a Skill>;
}

/// Lower-case `text` and collapse every run of characters outside
/// `[a-z0-9]` into a single space. Edges are not trimmed.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_gap = false;
    for ch in text.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            out.push(ch);
            in_gap = false;
        } else if !in_gap {
            out.push(' ');
            in_gap = true;
        }
    }
    out
}

fn first_token(normalized: &str) -> &str {
    normalized.split(' ').next().unwrap_or("")
}

/// Substring heuristic: the event mentions the full skill name, the
/// name's first token, or the description's first token.
///
/// First-token hits on common words ("sync", "ready") are accepted false
/// positives. The first match in catalog order wins.
#[derive(Debug, Default, Clone, Copy)]
pub struct SubstringMatcher;

impl SkillMatcher for SubstringMatcher {
    fn find<'a>(&self, text: &str, catalog: &'a [Skill]) -> Option<&'a Skill> {
        let event = normalize(text);
        if event.is_empty() {
            return None;
        }
        catalog.iter().find(|skill| {
            let name = normalize(&skill.name);
            let desc = normalize(&skill.description);
            let name_word = first_token(&name);
            let desc_word = first_token(&desc);
            // An empty token (name or description led by punctuation) never
            // matches. A bare `contains("")` would bind the skill to every event.
            (!name.is_empty() && event.contains(name.as_str()))
                || (!name_word.is_empty() && event.contains(name_word))
                || (!desc_word.is_empty() && event.contains(desc_word))
        })
    }
}

/// Build one binding per matched skill, in first-encountered order.
///
/// A later event matching the same skill only refreshes `last_seen`.
pub fn build_bindings(
    events: &[LiveEvent],
    catalog: &[Skill],
    matcher: &dyn SkillMatcher,
) -> Vec<ActiveSkillBinding> {
    let mut bindings: Vec<ActiveSkillBinding> = Vec::new();
    for event in events {
        let Some(skill) = matcher.find(&event.text, catalog) else {
            continue;
        };
        match bindings.iter_mut().find(|b| b.name == skill.name) {
            Some(existing) => existing.last_seen = event.time.clone(),
            None => bindings.push(ActiveSkillBinding {
                name: skill.name.clone(),
                icon: skill.icon.clone(),
                last_seen: event.time.clone(),
                event: event.text.clone(),
                status: skill.status,
            }),
        }
    }
    bindings
}

/// Annotate each event with the name of the skill it matches.
pub fn tag_events(events: &mut [LiveEvent], catalog: &[Skill], matcher: &dyn SkillMatcher) {
    for event in events.iter_mut() {
        event.skill = matcher.find(&event.text, catalog).map(|s| s.name.clone());
    }
}
