// src/core/usernames.rs
//
// Free text (GUI text area, CLI argument) → ordered username list.
// Order and duplicates are kept; the orchestrator scrapes exactly what it
// is given.

use super::sanitize::strip_at;

/// One username per line; commas also separate, so `alice, bob` works on the
/// command line. Blank entries and a leading `@` are dropped.
pub fn parse_usernames(text: &str) -> Vec<String> {
    text.split(['\n', ','])
        .map(strip_at)
        .filter(|u| !u.is_empty())
        .map(String::from)
        .collect()
}
