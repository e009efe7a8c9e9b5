// src/progress.rs
use crate::fetch::FetchError;

/// Lightweight progress reporting used by the scrape run.
/// Frontends (GUI/CLI) implement this to surface status to users.
///
/// `done` counts users finished so far (successful or not), so
/// `done as f32 / total as f32` only ever grows and ends at 1.0.
pub trait Progress {
    /// Called once at the start with the number of users to scrape.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes ("Scraping @alice...").
    fn log(&mut self, _msg: &str) {}

    /// One user finished with `kept` records (`skipped` raw items dropped).
    fn user_done(&mut self, _username: &str, _kept: usize, _skipped: usize, _done: usize, _total: usize) {}

    /// One user's fetch failed. The run goes on.
    fn user_failed(&mut self, _username: &str, _error: &FetchError, _done: usize, _total: usize) {}

    /// Called at the end, successful, empty or cancelled.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Completion fraction in `[0, 1]`. An empty run counts as complete.
pub fn fraction(done: usize, total: usize) -> f32 {
    if total == 0 {
        return 1.0;
    }
    (done.min(total) as f32) / (total as f32)
}

/// Status line shown before a user is fetched.
pub fn scraping_msg(username: &str) -> String {
    format!("Scraping @{username}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_is_clamped() {
        assert_eq!(fraction(0, 4), 0.0);
        assert_eq!(fraction(2, 4), 0.5);
        assert_eq!(fraction(4, 4), 1.0);
        assert_eq!(fraction(9, 4), 1.0);
        assert_eq!(fraction(0, 0), 1.0);
    }

    #[test]
    fn scraping_msg_has_at_prefix() {
        assert_eq!(scraping_msg("alice"), "Scraping @alice...");
    }
}
