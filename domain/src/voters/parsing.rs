//! Voter reference parsing.
//!
//! Turns the loosely formatted user, group and channel references that
//! arrive from chat input into normalized identifiers. These are pure
//! functions: no lookups, no logging.
//!
//! # Recognized forms
//!
//! | Kind | Forms |
//! |------|-------|
//! | User | `<@U123>`, `<@U123\|Jane Doe>`, `U123`, `W123` |
//! | Group | `<!subteam^S123>`, `<!subteam^S123\|@eng>`, `S123`, `@eng` (unresolved) |
//! | Channel | `<#C123>`, `<#C123\|general>`, `C123`, `G123` |
//!
//! Inputs may hold several references separated by commas, whitespace or
//! newlines. Text inside `<...>` is never split, so labels may contain
//! spaces.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hash;

use super::value_objects::{ChannelId, GroupId};
use crate::decision::UserId;

/// Raw reference input: free text, or a pre-parsed list kept for
/// compatibility with older callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReferenceInput {
    Text(String),
    List(Vec<String>),
}

impl ReferenceInput {
    pub fn empty() -> Self {
        ReferenceInput::List(Vec::new())
    }

    /// Split into individual reference tokens.
    pub fn tokens(&self) -> Vec<&str> {
        match self {
            ReferenceInput::Text(text) => tokenize(text),
            ReferenceInput::List(items) => items.iter().flat_map(|s| tokenize(s)).collect(),
        }
    }
}

impl Default for ReferenceInput {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<&str> for ReferenceInput {
    fn from(s: &str) -> Self {
        ReferenceInput::Text(s.to_string())
    }
}

impl From<String> for ReferenceInput {
    fn from(s: String) -> Self {
        ReferenceInput::Text(s)
    }
}

impl From<Vec<String>> for ReferenceInput {
    fn from(items: Vec<String>) -> Self {
        ReferenceInput::List(items)
    }
}

impl From<Vec<&str>> for ReferenceInput {
    fn from(items: Vec<&str>) -> Self {
        ReferenceInput::List(items.into_iter().map(String::from).collect())
    }
}

/// Result of parsing user references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedUsers {
    /// Deduplicated user ids in first-seen order
    pub user_ids: Vec<UserId>,
    /// Tokens that did not look like a user reference
    pub ignored: Vec<String>,
}

/// Result of parsing group references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedGroups {
    /// Deduplicated group ids in first-seen order
    pub group_ids: Vec<GroupId>,
    /// Human-readable handles with no derivable id (without leading `@`)
    pub unresolved_handles: Vec<String>,
}

/// Parse user references into deduplicated user ids.
pub fn parse_user_references(input: &ReferenceInput) -> ParsedUsers {
    let mut ids = OrderedSet::default();
    let mut ignored = Vec::new();

    for token in input.tokens() {
        let id = if let Some(inner) = bracketed(token, "<@") {
            Some(inner)
        } else if is_raw_id(token, &['U', 'W']) {
            Some(token)
        } else {
            None
        };

        match id {
            Some(id) => ids.insert(UserId::new(id)),
            None => ignored.push(token.to_string()),
        }
    }

    ParsedUsers {
        user_ids: ids.into_vec(),
        ignored,
    }
}

/// Parse group references into deduplicated group ids plus unresolved handles.
pub fn parse_group_references(input: &ReferenceInput) -> ParsedGroups {
    let mut ids = OrderedSet::default();
    let mut handles = OrderedSet::default();

    for token in input.tokens() {
        if let Some(inner) = bracketed(token, "<!subteam^") {
            ids.insert(GroupId::new(inner));
        } else if is_raw_id(token, &['S']) {
            ids.insert(GroupId::new(token));
        } else {
            let handle = token.trim_start_matches('@');
            if !handle.is_empty() {
                handles.insert(handle.to_string());
            }
        }
    }

    ParsedGroups {
        group_ids: ids.into_vec(),
        unresolved_handles: handles.into_vec(),
    }
}

/// Parse a single channel reference.
pub fn parse_channel_reference(input: &str) -> Option<ChannelId> {
    let token = input.trim();
    if let Some(inner) = bracketed(token, "<#") {
        return Some(ChannelId::new(inner));
    }
    is_raw_id(token, &['C', 'G']).then(|| ChannelId::new(token))
}

/// Split text on commas and whitespace, keeping `<...>` spans intact.
///
/// A `<` only opens a span when a `>` follows before the next `<`; an
/// unclosed `<` is an ordinary character so the rest of the input still
/// splits normally.
fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;
    let mut in_brackets = false;

    for (i, ch) in text.char_indices() {
        if in_brackets {
            if ch == '>' {
                if let Some(s) = start.take() {
                    tokens.push(&text[s..=i]);
                }
                in_brackets = false;
            }
            continue;
        }

        if ch == '<' && closes_before_next_open(&text[i + 1..]) {
            if let Some(s) = start.take() {
                tokens.push(&text[s..i]);
            }
            start = Some(i);
            in_brackets = true;
        } else if ch == ',' || ch.is_whitespace() {
            if let Some(s) = start.take() {
                tokens.push(&text[s..i]);
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }

    if let Some(s) = start {
        tokens.push(&text[s..]);
    }

    tokens
        .into_iter()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

fn closes_before_next_open(rest: &str) -> bool {
    match (rest.find('>'), rest.find('<')) {
        (Some(close), Some(open)) => close < open,
        (Some(_), None) => true,
        (None, _) => false,
    }
}

/// Extract the id from `<{prefix}ID>` or `<{prefix}ID|label>`.
fn bracketed<'a>(token: &'a str, prefix: &str) -> Option<&'a str> {
    let inner = token.strip_prefix(prefix)?.strip_suffix('>')?;
    let id = inner.split('|').next().unwrap_or_default().trim();
    (!id.is_empty() && !id.contains(char::is_whitespace)).then_some(id)
}

/// `[prefix][A-Z0-9]{2,}`
fn is_raw_id(token: &str, prefixes: &[char]) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) if prefixes.contains(&first) => {
            let rest = chars.as_str();
            rest.len() >= 2
                && rest
                    .chars()
                    .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        }
        _ => false,
    }
}

/// Insertion-ordered deduplicating collection.
struct OrderedSet<T> {
    seen: HashSet<T>,
    items: Vec<T>,
}

impl<T> Default for OrderedSet<T> {
    fn default() -> Self {
        Self {
            seen: HashSet::new(),
            items: Vec::new(),
        }
    }
}

impl<T: Eq + Hash + Clone> OrderedSet<T> {
    fn insert(&mut self, item: T) {
        if self.seen.insert(item.clone()) {
            self.items.push(item);
        }
    }

    fn into_vec(self) -> Vec<T> {
        self.items
    }
}
