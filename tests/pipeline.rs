// tests/pipeline.rs
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use serde_json::{json, Value};

use threads_scrape::{
    Exporter, FetchError, Fetcher, InputError, MockFetcher, PostParser, Progress, RawItem,
    RunOutcome, Scraper, UserOutcome,
};

/// Keep test runs from writing into the working tree's `logs/`.
fn quiet_log() {
    threads_scrape::log::init(std::env::temp_dir().join("threads_scrape_tests.log"));
}

fn users(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn raw(v: Value) -> RawItem {
    match v {
        Value::Object(map) => map,
        other => panic!("not an object: {other}"),
    }
}

/// Canned per-user responses; unknown users get an empty feed.
#[derive(Default)]
struct ScriptedFetcher {
    feeds: HashMap<String, Result<Vec<RawItem>, FetchError>>,
    delays_ms: HashMap<String, u64>,
    calls: AtomicUsize,
}

impl ScriptedFetcher {
    fn feed(mut self, user: &str, items: Vec<Value>) -> Self {
        self.feeds.insert(user.to_string(), Ok(items.into_iter().map(raw).collect()));
        self
    }
    fn fail(mut self, user: &str, err: FetchError) -> Self {
        self.feeds.insert(user.to_string(), Err(err));
        self
    }
    fn delay(mut self, user: &str, ms: u64) -> Self {
        self.delays_ms.insert(user.to_string(), ms);
        self
    }
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Fetcher for ScriptedFetcher {
    fn name(&self) -> &str { "scripted" }

    fn fetch(&self, username: &str, limit: usize) -> Result<Vec<RawItem>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(ms) = self.delays_ms.get(username) {
            thread::sleep(Duration::from_millis(*ms));
        }
        match self.feeds.get(username) {
            Some(Ok(items)) => Ok(items.iter().take(limit).cloned().collect()),
            Some(Err(e)) => Err(e.clone()),
            None => Ok(Vec::new()),
        }
    }
}

fn post(id: &str, user: &str) -> Value {
    json!({ "id": id, "username": user, "text": format!("post {id}") })
}

#[derive(Default)]
struct Recorder {
    begun: Option<usize>,
    done: Vec<usize>,
    failed: Vec<String>,
    lines: Vec<String>,
    finished: usize,
}

impl Progress for Recorder {
    fn begin(&mut self, total: usize) { self.begun = Some(total); }
    fn log(&mut self, msg: &str) { self.lines.push(msg.to_string()); }
    fn user_done(&mut self, _u: &str, _kept: usize, _skipped: usize, done: usize, _total: usize) {
        self.done.push(done);
    }
    fn user_failed(&mut self, u: &str, _e: &FetchError, done: usize, _total: usize) {
        self.failed.push(u.to_string());
        self.done.push(done);
    }
    fn finish(&mut self) { self.finished += 1; }
}

#[test]
fn mock_two_users_limit_two() {
    quiet_log();
    let scraper = Scraper::new(MockFetcher::default(), PostParser);
    let report = scraper.run(&users(&["alice", "bob"]), 2, None, None).unwrap();

    assert_eq!(report.outcome(), RunOutcome::Collected(4));
    assert_eq!(report.summary(), "Collected total 4 posts.");
    let ids: Vec<&str> = report.records.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["mock_alice_0", "mock_alice_1", "mock_bob_0", "mock_bob_1"]);
    for p in &report.records {
        assert!((10..=1000).contains(&p.like_count.unwrap()));
        assert!(p.reply_count.unwrap() <= 50);
        assert!(p.repost_count.unwrap() <= 20);
    }

    let exporter = Exporter;
    let csv = String::from_utf8(exporter.to_csv(&report.records).unwrap()).unwrap();
    assert_eq!(csv.lines().count(), 5);
    assert!(csv.starts_with("id,username,text,like_count,reply_count,repost_count,created_at,url\n"));

    let json: Value = serde_json::from_str(&exporter.to_json(&report.records).unwrap()).unwrap();
    assert_eq!(json.as_array().map(Vec::len), Some(4));
}

#[test]
fn mock_caps_posts_per_user() {
    quiet_log();
    let scraper = Scraper::new(MockFetcher::with_cap(5), PostParser);
    let report = scraper.run(&users(&["alice"]), 50, None, None).unwrap();
    assert_eq!(report.records.len(), 5);
}

#[test]
fn failing_user_does_not_abort_run() {
    quiet_log();
    let fetcher = ScriptedFetcher::default()
        .feed("alice", vec![post("a1", "alice"), post("a2", "alice")])
        .fail("bob", FetchError::Network("connection reset".into()))
        .feed("carol", vec![post("c1", "carol")]);
    let scraper = Scraper::new(fetcher, PostParser);
    let mut rec = Recorder::default();

    let report = scraper.run(&users(&["alice", "bob", "carol"]), 10, Some(&mut rec), None).unwrap();

    assert_eq!(report.statuses.len(), 3);
    assert_eq!(report.records.len(), 3);
    assert_eq!(report.records.count_for("alice"), 2);
    assert_eq!(report.records.count_for("bob"), 0);
    assert_eq!(report.records.count_for("carol"), 1);

    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0, "bob");
    assert_eq!(report.statuses[1].describe(), "Error for @bob: network error: connection reset");
    assert_eq!(rec.failed, ["bob"]);
}

#[test]
fn blank_input_is_rejected_before_fetching() {
    quiet_log();
    let scraper = Scraper::new(ScriptedFetcher::default(), PostParser);
    let mut rec = Recorder::default();

    assert_eq!(scraper.run(&[], 10, None, None), Err(InputError::EmptyUsernames));
    assert_eq!(
        scraper.run(&users(&["", "  "]), 10, Some(&mut rec), None),
        Err(InputError::EmptyUsernames)
    );
    assert_eq!(scraper.run(&users(&["alice"]), 0, None, None), Err(InputError::ZeroLimit));

    assert_eq!(scraper.fetcher().calls(), 0);
    assert_eq!(rec.begun, None);
    assert_eq!(rec.finished, 0);
}

#[test]
fn malformed_items_are_skipped_and_counted() {
    quiet_log();
    let fetcher = ScriptedFetcher::default().feed(
        "alice",
        vec![
            post("a1", "alice"),
            json!({ "username": "alice", "text": "no id" }),
            json!({ "id": "a3", "text": "   " }),
            json!({ "id": 4, "text": "numeric id, no username" }),
        ],
    );
    let scraper = Scraper::new(fetcher, PostParser);
    let report = scraper.run(&users(&["alice"]), 10, None, None).unwrap();

    assert_eq!(report.records.len(), 2);
    assert_eq!(report.records.records()[1].id, "4");
    assert_eq!(report.records.records()[1].username, "alice");
    assert_eq!(report.statuses[0].outcome, UserOutcome::Fetched { kept: 2, skipped: 2 });
    assert_eq!(report.skipped_total(), 2);
}

#[test]
fn no_posts_anywhere_is_no_results() {
    quiet_log();
    let scraper = Scraper::new(ScriptedFetcher::default(), PostParser);
    let report = scraper.run(&users(&["ghost"]), 10, None, None).unwrap();
    assert_eq!(report.outcome(), RunOutcome::NoResults);
    assert_eq!(report.summary(), "No results found.");
    assert_eq!(report.statuses[0].outcome, UserOutcome::Fetched { kept: 0, skipped: 0 });
}

#[test]
fn duplicate_usernames_are_fetched_each_time() {
    quiet_log();
    let fetcher = ScriptedFetcher::default().feed("alice", vec![post("a1", "alice")]);
    let scraper = Scraper::new(fetcher, PostParser);
    let report = scraper.run(&users(&["alice", "alice"]), 10, None, None).unwrap();
    assert_eq!(scraper.fetcher().calls(), 2);
    assert_eq!(report.records.len(), 2);
    assert_eq!(report.statuses.len(), 2);
}

#[test]
fn parallel_run_keeps_request_order() {
    quiet_log();
    let names = ["u0", "u1", "u2", "u3", "u4", "u5"];
    let build = || {
        let mut f = ScriptedFetcher::default();
        for (i, u) in names.iter().enumerate() {
            f = f
                .feed(u, vec![post(&format!("{u}_a"), u), post(&format!("{u}_b"), u)])
                // later users answer first
                .delay(u, (names.len() - i) as u64 * 5);
        }
        f
    };

    let sequential = Scraper::new(build(), PostParser)
        .run(&users(&names), 10, None, None)
        .unwrap();

    let mut rec = Recorder::default();
    let parallel = Scraper::new(build(), PostParser)
        .with_workers(4)
        .run(&users(&names), 10, Some(&mut rec), None)
        .unwrap();

    assert_eq!(parallel.records, sequential.records);
    assert_eq!(parallel.statuses, sequential.statuses);
    assert_eq!(rec.done, [1, 2, 3, 4, 5, 6]);
}

#[test]
fn progress_is_monotonic_and_finishes_once() {
    quiet_log();
    let fetcher = ScriptedFetcher::default()
        .feed("a", vec![post("1", "a")])
        .fail("b", FetchError::RateLimited { retry_after_secs: Some(30) })
        .feed("c", vec![post("2", "c")]);
    let scraper = Scraper::new(fetcher, PostParser);
    let mut rec = Recorder::default();

    scraper.run(&users(&["a", "b", "c"]), 10, Some(&mut rec), None).unwrap();

    assert_eq!(rec.begun, Some(3));
    assert_eq!(rec.done, [1, 2, 3]);
    assert_eq!(rec.finished, 1);
    assert_eq!(rec.lines, ["Scraping @a...", "Scraping @b...", "Scraping @c..."]);
}

#[test]
fn cancelled_run_reports_every_user() {
    quiet_log();
    let fetcher = ScriptedFetcher::default().feed("alice", vec![post("a1", "alice")]);
    let scraper = Scraper::new(fetcher, PostParser);
    let cancel = AtomicBool::new(true);
    let mut rec = Recorder::default();

    let report = scraper
        .run(&users(&["alice", "bob"]), 10, Some(&mut rec), Some(&cancel))
        .unwrap();

    assert_eq!(scraper.fetcher().calls(), 0);
    assert!(report.was_cancelled());
    assert_eq!(report.statuses.len(), 2);
    assert!(report.statuses.iter().all(|s| s.outcome == UserOutcome::Cancelled));
    assert_eq!(report.outcome(), RunOutcome::NoResults);
    assert_eq!(rec.finished, 1);
}

/// Panics for one user, delegates to a scripted feed for everyone else.
struct PanicsOn {
    user: &'static str,
    inner: ScriptedFetcher,
}

impl Fetcher for PanicsOn {
    fn name(&self) -> &str { "panics-on" }

    fn fetch(&self, username: &str, limit: usize) -> Result<Vec<RawItem>, FetchError> {
        if username == self.user {
            panic!("selector vanished for @{username}");
        }
        self.inner.fetch(username, limit)
    }
}

fn panicking_middle() -> PanicsOn {
    PanicsOn {
        user: "bob",
        inner: ScriptedFetcher::default()
            .feed("alice", vec![post("a1", "alice")])
            .feed("carol", vec![post("c1", "carol")]),
    }
}

#[test]
fn panicking_fetcher_fails_only_that_user() {
    quiet_log();
    for workers in [1, 3] {
        let scraper = Scraper::new(panicking_middle(), PostParser).with_workers(workers);
        let mut rec = Recorder::default();

        let report = scraper
            .run(&users(&["alice", "bob", "carol"]), 10, Some(&mut rec), None)
            .unwrap();

        assert_eq!(report.statuses.len(), 3, "workers={workers}");
        assert_eq!(report.records.count_for("alice"), 1);
        assert_eq!(report.records.count_for("carol"), 1);
        match &report.statuses[1].outcome {
            UserOutcome::Failed(FetchError::Other(msg)) => {
                assert!(msg.contains("selector vanished for @bob"), "{msg}");
            }
            other => panic!("expected bob to fail, got {other:?}"),
        }
        assert_eq!(rec.failed, ["bob"]);
        assert_eq!(rec.finished, 1);
    }
}

#[test]
fn blank_entries_among_usernames_are_not_fetched() {
    quiet_log();
    let fetcher = ScriptedFetcher::default().feed("alice", vec![post("a1", "alice")]);
    let scraper = Scraper::new(fetcher, PostParser);
    let mut rec = Recorder::default();

    let report = scraper
        .run(&users(&["  ", " alice ", ""]), 10, Some(&mut rec), None)
        .unwrap();

    assert_eq!(scraper.fetcher().calls(), 1);
    assert_eq!(rec.begun, Some(1));
    assert_eq!(report.statuses.len(), 1);
    assert_eq!(report.statuses[0].username, "alice");
    assert_eq!(report.records.len(), 1);
}

#[test]
fn test_runs_log_outside_the_tree() {
    quiet_log();
    Scraper::new(MockFetcher::default(), PostParser)
        .run(&users(&["alice"]), 1, None, None)
        .unwrap();
    assert!(threads_scrape::log::log_path().starts_with(std::env::temp_dir()));
}
