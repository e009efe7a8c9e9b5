// src/gui/components/run_panel.rs
//
// Progress bar, live status line, one line per failed user and the final
// success/warning banner.

use eframe::egui::{self, Color32, ProgressBar, RichText};
use crate::{
    gui::{app::App, progress},
    scrape::RunOutcome,
};

const OK_GREEN: Color32 = Color32::from_rgb(0x3C, 0xB3, 0x71);
const WARN_YELLOW: Color32 = Color32::from_rgb(0xF0, 0xD2, 0x3C);

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let status = progress::lock(&app.status).clone();

    if app.running || status.total > 0 {
        let text = format!("{}/{}", status.done, status.total);
        ui.add(ProgressBar::new(status.fraction()).text(text).desired_width(ui.available_width()));
    }
    ui.label(format!("Status: {}", status.line));

    for line in &status.errors {
        ui.colored_label(ui.visuals().error_fg_color, line);
    }
    for line in &status.notes {
        ui.label(RichText::new(line).weak());
    }

    if app.running {
        return;
    }
    if let Some(report) = &app.report {
        let summary = report.summary();
        match report.outcome() {
            RunOutcome::Collected(_) => {
                ui.label(RichText::new(format!("✔ {summary}")).color(OK_GREEN).strong());
            }
            RunOutcome::NoResults => {
                ui.label(RichText::new(format!("⚠ {summary}")).color(WARN_YELLOW).strong());
            }
        }
    }
}
