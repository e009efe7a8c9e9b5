// src/gui/actions/scrape.rs
use std::{
    sync::{atomic::Ordering, mpsc, Arc},
    thread,
};

use eframe::egui;

use crate::{
    core::parse_usernames,
    gui::{
        app::App,
        progress::{self, GuiProgress, RunStatus},
    },
    scrape::InputError,
};

/// Validate the side panel and start a background run.
/// Empty input is rejected here; the scraper is never invoked.
pub fn start_scrape(app: &mut App, ctx: &egui::Context) {
    if app.running {
        return;
    }

    let usernames = parse_usernames(&app.state.gui.usernames_text);
    if usernames.is_empty() {
        logd!("Scrape: Clicked with no usernames");
        app.input_error = Some(InputError::EmptyUsernames.to_string());
        return;
    }
    app.state.options.scrape.usernames = usernames.clone();
    let limit = app.state.options.scrape.limit();

    logf!("Scrape: Begin users={:?} limit={}", usernames, limit);

    // fresh run: drop the previous results and messages
    app.input_error = None;
    app.export_msg = None;
    app.report = None;
    *progress::lock(&app.status) = RunStatus::default();
    app.cancel.store(false, Ordering::Relaxed);

    let (tx, rx) = mpsc::channel();
    let scraper = Arc::clone(&app.scraper);
    let status = Arc::clone(&app.status);
    let cancel = Arc::clone(&app.cancel);
    let ctx = ctx.clone();

    // → This is where the scrape happens ←
    thread::spawn(move || {
        let mut prog = GuiProgress::new(status, ctx.clone());
        let res = scraper.run(&usernames, limit, Some(&mut prog), Some(cancel.as_ref()));
        let _ = tx.send(res);
        ctx.request_repaint();
    });

    app.job = Some(rx);
    app.running = true;
}

pub fn cancel_scrape(app: &mut App) {
    if app.running {
        logf!("Scrape: Cancel requested");
        app.cancel.store(true, Ordering::Relaxed);
        progress::lock(&app.status).line = s!("Cancelling...");
    }
}

/// Pick up a finished run, if any. Called once per frame.
pub fn poll_scrape(app: &mut App) {
    let Some(rx) = app.job.as_ref() else { return };

    let res = match rx.try_recv() {
        Ok(res) => res,
        Err(mpsc::TryRecvError::Empty) => return,
        Err(mpsc::TryRecvError::Disconnected) => {
            loge!("Scrape: Worker thread ended without a result");
            app.job = None;
            app.running = false;
            progress::lock(&app.status).line = s!("Scrape failed unexpectedly");
            return;
        }
    };

    app.job = None;
    app.running = false;

    match res {
        Ok(report) => {
            logf!(
                "Scrape: OK records={} failed={}",
                report.records.len(),
                report.failures().count()
            );
            if report.was_cancelled() {
                progress::lock(&app.status).line = s!("Cancelled");
            }
            app.report = Some(report);
        }
        Err(e) => {
            loge!("Scrape: Rejected: {}", e);
            app.input_error = Some(e.to_string());
        }
    }
}
