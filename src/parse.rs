// src/parse.rs
//
// RawItem → Post.
//
// Invalid shape is not an error: an item without a usable `id` or `text`
// is simply skipped (`None`). Known fields are copied through when they have
// the expected type and left absent otherwise; engagement numbers are never
// made up. Keys the parser does not know travel along in `Post::extra`.

use serde_json::Value;

use crate::core::sanitize::strip_at;
use crate::post::{Post, RawItem, POST_FIELDS};

pub trait Parser: Send + Sync {
    /// Normalize one raw item. `fallback_username` fills `username` when the
    /// item does not carry one (usually the user whose feed was fetched).
    fn parse(&self, raw: &RawItem, fallback_username: &str) -> Option<Post>;
}

/// Parser for the Threads post shape:
/// `{ id, username, text, like_count, reply_count, repost_count, created_at, url }`.
#[derive(Clone, Copy, Debug, Default)]
pub struct PostParser;

impl Parser for PostParser {
    fn parse(&self, raw: &RawItem, fallback_username: &str) -> Option<Post> {
        let id = read_id(raw.get("id"))?;
        let text = read_text(raw.get("text"))?;

        let username = read_string(raw.get("username"))
            .map(|u| s!(strip_at(&u)))
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| s!(strip_at(fallback_username)));

        let extra = raw
            .iter()
            .filter(|(k, _)| !POST_FIELDS.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Some(Post {
            id,
            username,
            text,
            like_count: read_count(raw.get("like_count")),
            reply_count: read_count(raw.get("reply_count")),
            repost_count: read_count(raw.get("repost_count")),
            created_at: read_string(raw.get("created_at")),
            url: read_string(raw.get("url")),
            extra,
        })
    }
}

/// Non-empty string (trimmed) or an integer number.
fn read_id(v: Option<&Value>) -> Option<String> {
    match v? {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s!(s))
        }
        Value::Number(n) if n.is_u64() || n.is_i64() => Some(n.to_string()),
        _ => None,
    }
}

/// Any string with visible content, kept verbatim.
fn read_text(v: Option<&Value>) -> Option<String> {
    match v? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn read_string(v: Option<&Value>) -> Option<String> {
    match v? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// Non-negative integer, or a string holding one (`"1200"`).
fn read_count(v: Option<&Value>) -> Option<u64> {
    match v? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(v: Value) -> RawItem {
        match v {
            Value::Object(m) => m,
            _ => panic!("test fixture must be an object"),
        }
    }

    #[test]
    fn id_accepts_integers_and_trims_strings() {
        assert_eq!(read_id(Some(&json!(123456789012u64))).as_deref(), Some("123456789012"));
        assert_eq!(read_id(Some(&json!("  abc "))).as_deref(), Some("abc"));
        assert_eq!(read_id(Some(&json!(""))), None);
        assert_eq!(read_id(Some(&json!(1.5))), None);
        assert_eq!(read_id(Some(&json!(null))), None);
        assert_eq!(read_id(None), None);
    }

    #[test]
    fn counts_reject_negative_and_fractional() {
        assert_eq!(read_count(Some(&json!(12))), Some(12));
        assert_eq!(read_count(Some(&json!("1200"))), Some(1200));
        assert_eq!(read_count(Some(&json!(-3))), None);
        assert_eq!(read_count(Some(&json!(2.5))), None);
        assert_eq!(read_count(Some(&json!("many"))), None);
        assert_eq!(read_count(Some(&json!(true))), None);
    }

    #[test]
    fn whitespace_text_is_skipped() {
        let item = raw(json!({ "id": "1", "text": "   \n" }));
        assert_eq!(PostParser.parse(&item, "alice"), None);
    }

    #[test]
    fn text_is_kept_verbatim() {
        let item = raw(json!({ "id": "1", "text": "  héllo 👋\nworld " }));
        let post = PostParser.parse(&item, "alice").unwrap();
        assert_eq!(post.text, "  héllo 👋\nworld ");
    }

    #[test]
    fn username_at_prefix_is_dropped() {
        let item = raw(json!({ "id": "1", "text": "t", "username": "@bob" }));
        assert_eq!(PostParser.parse(&item, "alice").unwrap().username, "bob");
    }

    #[test]
    fn unknown_keys_land_in_extra_in_raw_order() {
        let item = raw(json!({ "id": "1", "views": 10, "text": "t", "lang": "en" }));
        let post = PostParser.parse(&item, "alice").unwrap();
        let keys: Vec<&str> = post.extra.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["views", "lang"]);
    }
}
