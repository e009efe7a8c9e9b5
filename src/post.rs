// src/post.rs
//
// Record shapes flowing through the pipeline:
//
//   Fetcher ──RawItem──▶ Parser ──Post──▶ ResultSet ──▶ Exporter
//
// `RawItem` is whatever the source handed us. `Post` is the validated,
// canonical record: `id`, `username` and `text` are always present, every
// other field is optional and never invented.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Unvalidated record as returned by a fetcher.
pub type RawItem = Map<String, Value>;

/// Canonical column names, in record order. Unknown raw keys follow these.
pub const POST_FIELDS: [&str; 8] = [
    "id",
    "username",
    "text",
    "like_count",
    "reply_count",
    "repost_count",
    "created_at",
    "url",
];

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub username: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub like_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repost_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Raw keys the parser does not know about, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Post {
    /// `(column, cell)` pairs for every field this record carries, in
    /// record order. Absent optional fields are skipped, so two posts may
    /// yield different column sets.
    pub fn fields(&self) -> Vec<(&str, String)> {
        let mut out: Vec<(&str, String)> = Vec::with_capacity(POST_FIELDS.len() + self.extra.len());
        out.push(("id", self.id.clone()));
        out.push(("username", self.username.clone()));
        out.push(("text", self.text.clone()));

        let counters = [
            ("like_count", self.like_count),
            ("reply_count", self.reply_count),
            ("repost_count", self.repost_count),
        ];
        for (name, v) in counters {
            if let Some(n) = v {
                out.push((name, n.to_string()));
            }
        }
        if let Some(ts) = &self.created_at {
            out.push(("created_at", ts.clone()));
        }
        if let Some(url) = &self.url {
            out.push(("url", url.clone()));
        }
        for (k, v) in &self.extra {
            out.push((k.as_str(), cell_text(v)));
        }
        out
    }

    /// Cell text for `column`, or `None` when the record lacks it.
    pub fn get(&self, column: &str) -> Option<String> {
        self.fields()
            .into_iter()
            .find(|(name, _)| *name == column)
            .map(|(_, cell)| cell)
    }
}

/// Flat text for a JSON value: strings unquoted, null empty, the rest as JSON.
pub fn cell_text(v: &Value) -> String {
    match v {
        Value::Null => s!(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Ordered aggregate of every post collected in one run.
/// Order: requested-user order, then the order each fetch returned.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultSet {
    posts: Vec<Post>,
}

impl ResultSet {
    pub fn new() -> Self { Self::default() }

    pub fn len(&self) -> usize { self.posts.len() }
    pub fn is_empty(&self) -> bool { self.posts.is_empty() }
    pub fn iter(&self) -> std::slice::Iter<'_, Post> { self.posts.iter() }
    pub fn records(&self) -> &[Post] { &self.posts }

    /// Append-only; the orchestrator is the sole writer.
    pub(crate) fn extend(&mut self, posts: impl IntoIterator<Item = Post>) {
        self.posts.extend(posts);
    }

    /// Union of the column names of all records, first-seen order.
    pub fn field_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for post in &self.posts {
            for (name, _) in post.fields() {
                if !names.iter().any(|n| n == name) {
                    names.push(s!(name));
                }
            }
        }
        names
    }

    /// Number of records attributed to `username`.
    pub fn count_for(&self, username: &str) -> usize {
        self.posts.iter().filter(|p| p.username == username).count()
    }
}

impl From<Vec<Post>> for ResultSet {
    fn from(posts: Vec<Post>) -> Self { Self { posts } }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a Post;
    type IntoIter = std::slice::Iter<'a, Post>;
    fn into_iter(self) -> Self::IntoIter { self.posts.iter() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal() -> Post {
        Post { id: s!("1"), username: s!("alice"), text: s!("hi"), ..Post::default() }
    }

    #[test]
    fn fields_skip_absent_optionals() {
        let p = minimal();
        let cols: Vec<&str> = p.fields().into_iter().map(|(n, _)| n).collect();
        assert_eq!(cols, vec!["id", "username", "text"]);
    }

    #[test]
    fn fields_keep_record_order_with_extras_last() {
        let mut p = minimal();
        p.url = Some(s!("https://example.test/1"));
        p.like_count = Some(7);
        p.extra.insert(s!("lang"), json!("en"));
        p.extra.insert(s!("media"), json!(null));

        let fields = p.fields();
        let cols: Vec<&str> = fields.iter().map(|(n, _)| *n).collect();
        assert_eq!(cols, vec!["id", "username", "text", "like_count", "url", "lang", "media"]);
        assert_eq!(fields[3].1, "7");
        assert_eq!(fields[6].1, "");
    }

    #[test]
    fn field_names_union_first_seen() {
        let mut a = minimal();
        a.extra.insert(s!("lang"), json!("en"));
        let mut b = minimal();
        b.like_count = Some(1);
        let rs = ResultSet::from(vec![a, b]);
        assert_eq!(rs.field_names(), vec!["id", "username", "text", "lang", "like_count"]);
    }

    #[test]
    fn get_reads_extra_and_known_columns() {
        let mut p = minimal();
        p.extra.insert(s!("views"), json!(42));
        assert_eq!(p.get("text").as_deref(), Some("hi"));
        assert_eq!(p.get("views").as_deref(), Some("42"));
        assert_eq!(p.get("url"), None);
    }
}
