// src/scrape.rs
//
// The orchestrator: usernames in, one ordered ResultSet out.
//
// Each user is an isolated unit of work folded into
// `Result<UserBatch, FetchError>`; a failure is recorded against that user
// and the run moves on. Nothing but bad input escapes `Scraper::run`.

use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        mpsc,
    },
    thread,
};

use thiserror::Error;

use crate::{
    config::consts::MAX_WORKERS,
    fetch::{FetchError, Fetcher},
    parse::Parser,
    post::{Post, ResultSet},
    progress::{scraping_msg, Progress},
};

/// Rejected before the first fetch; no partial side effects.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Please enter at least one username.")]
    EmptyUsernames,
    #[error("Max posts per user must be at least 1.")]
    ZeroLimit,
}

/// What one user contributed to the run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserOutcome {
    /// Fetch succeeded; `kept` posts entered the ResultSet and `skipped`
    /// raw items failed validation.
    Fetched { kept: usize, skipped: usize },
    Failed(FetchError),
    /// Never started because the run was cancelled first.
    Cancelled,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserStatus {
    pub username: String,
    pub outcome: UserOutcome,
}

impl UserStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, UserOutcome::Failed(_))
    }

    /// One line for the status log.
    pub fn describe(&self) -> String {
        match &self.outcome {
            UserOutcome::Fetched { kept, skipped: 0 } => {
                format!("@{}: {kept} post(s)", self.username)
            }
            UserOutcome::Fetched { kept, skipped } => {
                format!("@{}: {kept} post(s), {skipped} malformed item(s) skipped", self.username)
            }
            UserOutcome::Failed(e) => format!("Error for @{}: {e}", self.username),
            UserOutcome::Cancelled => format!("@{}: cancelled", self.username),
        }
    }
}

/// Terminal state of a run. Both are normal, non-error outcomes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Collected(usize),
    NoResults,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScrapeReport {
    pub records: ResultSet,
    /// Exactly one entry per requested (non-blank) user, in request order.
    pub statuses: Vec<UserStatus>,
}

impl ScrapeReport {
    pub fn outcome(&self) -> RunOutcome {
        match self.records.len() {
            0 => RunOutcome::NoResults,
            n => RunOutcome::Collected(n),
        }
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &FetchError)> {
        self.statuses.iter().filter_map(|s| match &s.outcome {
            UserOutcome::Failed(e) => Some((s.username.as_str(), e)),
            _ => None,
        })
    }

    pub fn skipped_total(&self) -> usize {
        self.statuses
            .iter()
            .map(|s| match s.outcome {
                UserOutcome::Fetched { skipped, .. } => skipped,
                _ => 0,
            })
            .sum()
    }

    pub fn was_cancelled(&self) -> bool {
        self.statuses.iter().any(|s| s.outcome == UserOutcome::Cancelled)
    }

    /// Final banner text ("Collected total 4 posts." / "No results found.").
    pub fn summary(&self) -> String {
        match self.outcome() {
            RunOutcome::Collected(n) => format!("Collected total {n} posts."),
            RunOutcome::NoResults => s!("No results found."),
        }
    }
}

/// Posts that survived parsing for one user, plus how many items did not.
#[derive(Debug)]
struct UserBatch {
    posts: Vec<Post>,
    skipped: usize,
}

type UserResult = Result<UserBatch, FetchError>;

enum Event {
    Started(usize),
    Finished(usize, UserResult),
}

/// Drives fetch → parse → accumulate for a list of users.
pub struct Scraper<F, P> {
    fetcher: F,
    parser: P,
    workers: usize,
}

impl<F: Fetcher, P: Parser> Scraper<F, P> {
    pub fn new(fetcher: F, parser: P) -> Self {
        Self { fetcher, parser, workers: 1 }
    }

    /// Fetch up to `n` users at once. Output order is unaffected.
    pub fn with_workers(mut self, n: usize) -> Self {
        self.set_workers(n);
        self
    }

    pub fn set_workers(&mut self, n: usize) {
        self.workers = n.clamp(1, MAX_WORKERS);
    }

    pub fn workers(&self) -> usize { self.workers }
    pub fn fetcher(&self) -> &F { &self.fetcher }

    /// Scrape every user in `usernames` (order and duplicates kept).
    /// Entries are trimmed and blank ones dropped, so `statuses` has one
    /// entry per non-blank username.
    ///
    /// `cancel` is checked before each user starts; users not started by
    /// then are reported as `Cancelled`.
    pub fn run(
        &self,
        usernames: &[String],
        limit: usize,
        mut progress: Option<&mut dyn Progress>,
        cancel: Option<&AtomicBool>,
    ) -> Result<ScrapeReport, InputError> {
        let usernames: Vec<String> = usernames
            .iter()
            .map(|u| u.trim())
            .filter(|u| !u.is_empty())
            .map(String::from)
            .collect();
        if usernames.is_empty() {
            logd!("Scrape: Rejected, no usernames");
            return Err(InputError::EmptyUsernames);
        }
        if limit == 0 {
            logd!("Scrape: Rejected, limit=0");
            return Err(InputError::ZeroLimit);
        }

        let total = usernames.len();
        let workers = self.workers.min(total);
        logf!(
            "Scrape: Begin fetcher={} users={} limit={} workers={}",
            self.fetcher.name(), total, limit, workers
        );
        notify!(progress, begin(total));

        let slots = if workers <= 1 {
            self.run_sequential(&usernames, limit, progress.as_deref_mut(), cancel)
        } else {
            self.run_parallel(&usernames, limit, workers, progress.as_deref_mut(), cancel)
        };

        // Fold per-user results into one ResultSet, request order.
        let mut records = ResultSet::new();
        let mut statuses = Vec::with_capacity(total);
        for (username, slot) in usernames.into_iter().zip(slots) {
            let outcome = match slot {
                Some(Ok(batch)) => {
                    let kept = batch.posts.len();
                    records.extend(batch.posts);
                    UserOutcome::Fetched { kept, skipped: batch.skipped }
                }
                Some(Err(e)) => UserOutcome::Failed(e),
                None => UserOutcome::Cancelled,
            };
            statuses.push(UserStatus { username, outcome });
        }

        let report = ScrapeReport { records, statuses };
        logf!(
            "Scrape: Done records={} failed={} skipped={} cancelled={}",
            report.records.len(),
            report.failures().count(),
            report.skipped_total(),
            report.was_cancelled()
        );
        notify!(progress, finish());
        Ok(report)
    }

    fn run_sequential(
        &self,
        usernames: &[String],
        limit: usize,
        mut progress: Option<&mut (dyn Progress + '_)>,
        cancel: Option<&AtomicBool>,
    ) -> Vec<Option<UserResult>> {
        let total = usernames.len();
        let mut slots: Vec<Option<UserResult>> = (0..total).map(|_| None).collect();

        for (i, username) in usernames.iter().enumerate() {
            if is_cancelled(cancel) {
                logf!("Scrape: Cancelled after {i}/{total} user(s)");
                break;
            }
            notify!(progress, log(&scraping_msg(username)));
            let res = self.scrape_user(username, limit);
            report_user(progress.as_deref_mut(), username, &res, i + 1, total);
            slots[i] = Some(res);
        }
        slots
    }

    /// Workers pull user indices from a shared cursor and send results back
    /// to this thread, which is the only one touching `progress` and `slots`.
    fn run_parallel(
        &self,
        usernames: &[String],
        limit: usize,
        workers: usize,
        mut progress: Option<&mut (dyn Progress + '_)>,
        cancel: Option<&AtomicBool>,
    ) -> Vec<Option<UserResult>> {
        let total = usernames.len();
        let mut slots: Vec<Option<UserResult>> = (0..total).map(|_| None).collect();
        let cursor = AtomicUsize::new(0);
        let (tx, rx) = mpsc::channel::<Event>();

        thread::scope(|scope| {
            for _ in 0..workers {
                let tx = tx.clone();
                let cursor = &cursor;
                scope.spawn(move || loop {
                    if is_cancelled(cancel) {
                        break;
                    }
                    let i = cursor.fetch_add(1, Ordering::Relaxed);
                    if i >= total {
                        break;
                    }
                    if tx.send(Event::Started(i)).is_err() {
                        break;
                    }
                    let res = self.scrape_user(&usernames[i], limit);
                    if tx.send(Event::Finished(i, res)).is_err() {
                        break;
                    }
                });
            }
            drop(tx); // this thread is the sole receiver now

            let mut done = 0usize;
            for event in rx {
                match event {
                    Event::Started(i) => {
                        notify!(progress, log(&scraping_msg(&usernames[i])));
                    }
                    Event::Finished(i, res) => {
                        done += 1;
                        report_user(progress.as_deref_mut(), &usernames[i], &res, done, total);
                        slots[i] = Some(res);
                    }
                }
            }
        });

        if is_cancelled(cancel) {
            let finished = slots.iter().filter(|s| s.is_some()).count();
            logf!("Scrape: Cancelled after {finished}/{total} user(s)");
        }
        slots
    }

    /// Fetch one user and parse what came back. Malformed items are counted,
    /// not reported as errors. A panicking fetcher fails only this user.
    fn scrape_user(&self, username: &str, limit: usize) -> UserResult {
        let fetched = panic::catch_unwind(AssertUnwindSafe(|| self.fetcher.fetch(username, limit)))
            .unwrap_or_else(|payload| Err(FetchError::Other(panic_message(payload))));
        let raw_items = fetched.inspect_err(|e| {
            loge!("Scrape: @{username} failed: {e}");
        })?;

        let fetched = raw_items.len();
        let posts: Vec<Post> = raw_items
            .iter()
            .filter_map(|raw| self.parser.parse(raw, username))
            .collect();
        let skipped = fetched - posts.len();

        if skipped > 0 {
            logd!("Scrape: @{username} skipped {skipped}/{fetched} malformed item(s)");
        }
        logf!("Scrape: @{username} OK kept={}", posts.len());
        Ok(UserBatch { posts, skipped })
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| s!("unknown cause"));
    format!("fetcher panicked: {detail}")
}

fn is_cancelled(cancel: Option<&AtomicBool>) -> bool {
    cancel.is_some_and(|c| c.load(Ordering::Relaxed))
}

fn report_user(
    mut progress: Option<&mut (dyn Progress + '_)>,
    username: &str,
    res: &UserResult,
    done: usize,
    total: usize,
) {
    match res {
        Ok(batch) => notify!(progress, user_done(username, batch.posts.len(), batch.skipped, done, total)),
        Err(e) => notify!(progress, user_failed(username, e, done, total)),
    }
}
