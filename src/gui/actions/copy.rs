// src/gui/actions/copy.rs
use eframe::egui;
use crate::{export::ExportFormat, gui::app::App};

pub fn copy(app: &mut App, ui_ctx: &egui::Context, format: ExportFormat) {
    let status_msg = match super::current_records(app) {
        None => {
            logd!("Copy: Clicked, but there's nothing to copy");
            s!("Nothing to copy")
        }
        Some(records) => {
            logf!("Copy: format={} rows={}", format.label(), records.len());
            match app.exporter.render(format, records) {
                Ok(art) => {
                    // Clipboard wants text; both renderings are UTF-8.
                    ui_ctx.copy_text(String::from_utf8_lossy(&art.bytes).into_owned());
                    format!("Copied {} to clipboard", format.label())
                }
                Err(e) => {
                    loge!("Copy: Error: {}", e);
                    format!("Copy error: {e}")
                }
            }
        }
    };

    app.export_msg = Some(status_msg);
}
