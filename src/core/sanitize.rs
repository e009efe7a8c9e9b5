// src/core/sanitize.rs

/// Collapse every whitespace run (newlines included) into one space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// `@zuck` → `zuck`. Only one leading `@` is removed.
pub fn strip_at(s: &str) -> &str {
    let s = s.trim();
    s.strip_prefix('@').unwrap_or(s).trim_start()
}

/// Single-line preview of `s`, cut to `max` chars with a trailing `…`.
pub fn preview(s: &str, max: usize) -> String {
    let flat = normalize_ws(s);
    if flat.chars().count() <= max {
        return flat;
    }
    let mut out: String = flat.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_ws_collapses_newlines() {
        assert_eq!(normalize_ws("  a\n\n b\tc  "), "a b c");
    }

    #[test]
    fn strip_at_removes_one_prefix() {
        assert_eq!(strip_at("@zuck"), "zuck");
        assert_eq!(strip_at("  @ zuck "), "zuck");
        assert_eq!(strip_at("@@x"), "@x");
        assert_eq!(strip_at("plain"), "plain");
    }

    #[test]
    fn preview_cuts_on_chars_not_bytes() {
        assert_eq!(preview("héllo wörld", 5), "héll…");
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("line one\nline two", 40), "line one line two");
    }
}
