// src/fetch/mock.rs
use rand::Rng;
use serde_json::{Value, json};

use super::{FetchError, Fetcher};
use crate::config::consts::MOCK_CAP;
use crate::post::RawItem;

const MOCK_CREATED_AT: &str = "2023-10-27T10:00:00Z";

/// Stand-in for a real Threads fetcher. Produces `min(limit, cap)` posts per
/// user with a fixed shape; only the engagement counters are random.
#[derive(Clone, Debug)]
pub struct MockFetcher {
    cap: usize,
}

impl Default for MockFetcher {
    fn default() -> Self { Self { cap: MOCK_CAP } }
}

impl MockFetcher {
    pub fn with_cap(cap: usize) -> Self { Self { cap } }

    fn item(rng: &mut impl Rng, username: &str, i: usize) -> RawItem {
        let value = json!({
            "id": format!("mock_{username}_{i}"),
            "username": username,
            "text": format!(
                "This is a mock thread post #{} for @{username}. \
                 The real scraper logic needs to be implemented using Playwright.",
                i + 1
            ),
            "like_count": rng.random_range(10..=1000u64),
            "reply_count": rng.random_range(0..=50u64),
            "repost_count": rng.random_range(0..=20u64),
            "created_at": MOCK_CREATED_AT,
            "url": format!("https://www.threads.net/@{username}/post/dummy_{i}"),
        });
        match value {
            Value::Object(map) => map,
            _ => RawItem::new(),
        }
    }
}

impl Fetcher for MockFetcher {
    fn name(&self) -> &str { "mock" }

    fn fetch(&self, username: &str, limit: usize) -> Result<Vec<RawItem>, FetchError> {
        logd!("Fetch[mock]: @{username} limit={limit}");
        let mut rng = rand::rng();
        Ok((0..limit.min(self.cap))
            .map(|i| Self::item(&mut rng, username, i))
            .collect())
    }
}
