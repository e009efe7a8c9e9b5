// src/gui/components/sidebar.rs
//
// Left panel: usernames, limit, worker count and the Run button.
// Edits go straight into `app.state`; nothing is validated until Run.

use eframe::egui::{self, widgets::Spinner};
use crate::{config::consts::MAX_WORKERS, gui::{actions, app::App}};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.heading("Configuration");
    ui.add_space(4.0);

    ui.label("Usernames (one per line)");
    let resp = ui.add_enabled(
        !app.running,
        egui::TextEdit::multiline(&mut app.state.gui.usernames_text)
            .desired_rows(10)
            .desired_width(f32::INFINITY)
            .font(egui::TextStyle::Monospace),
    );
    if resp.changed() {
        app.input_error = None;
    }

    ui.add_space(6.0);

    let scrape = &mut app.state.options.scrape;
    let mut limit = scrape.limit();
    ui.horizontal(|ui| {
        ui.label("Max posts per user");
        ui.add_enabled(!app.running, egui::DragValue::new(&mut limit).range(1..=usize::MAX).speed(1));
    });
    if limit != scrape.limit() {
        scrape.set_limit(limit);
        logd!("UI: limit → {}", scrape.limit());
    }

    let mut workers = scrape.workers();
    ui.horizontal(|ui| {
        ui.label("Parallel users");
        ui.add_enabled(!app.running, egui::DragValue::new(&mut workers).range(1..=MAX_WORKERS));
    });
    if workers != scrape.workers() {
        scrape.set_workers(workers);
        logd!("UI: workers → {}", scrape.workers());
    }

    ui.add_space(8.0);

    ui.horizontal(|ui| {
        let red = egui::Color32::from_rgb(220, 30, 30);
        let black = egui::Color32::BLACK;

        let button_run = ui.add_enabled(
            !app.running,
            egui::Button::new(
                egui::RichText::new("Run Scraper")
                .color(black)
                .strong())
            .fill(red));

        if button_run.clicked() {
            sync_workers(app);
            actions::start_scrape(app, ui.ctx());
        }

        if app.running {
            if ui.button("Cancel").clicked() {
                actions::cancel_scrape(app);
            }
            ui.add(Spinner::new().size(16.0));
        }
    });

    if let Some(err) = &app.input_error {
        ui.add_space(4.0);
        ui.colored_label(ui.visuals().error_fg_color, err);
    }
}

/// The scraper is shared with the worker thread, so a worker-count change is
/// applied by swapping in a reconfigured scraper between runs.
fn sync_workers(app: &mut App) {
    let wanted = app.state.options.scrape.workers();
    if app.scraper.workers() == wanted {
        return;
    }
    match std::sync::Arc::get_mut(&mut app.scraper) {
        Some(scraper) => {
            scraper.set_workers(wanted);
            logf!("UI: scraper workers → {}", wanted);
        }
        None => logd!("UI: scraper busy, keeping workers={}", app.scraper.workers()),
    }
}
