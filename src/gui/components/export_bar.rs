// src/gui/components/export_bar.rs
//
// Output folder + the download buttons. Everything here works off the last
// finished run; buttons stay disabled until there is something to save.

use eframe::egui;
use crate::{
    export::ExportFormat,
    file,
    gui::{actions, app::App},
};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let has_records = !app.running
        && app.report.as_ref().is_some_and(|r| !r.records.is_empty());

    // --- Output field ---
    let mut open_folder_clicked = false;
    ui.horizontal(|ui| {
        ui.label("Output folder:");
        if ui
            .add(egui::TextEdit::singleline(&mut app.state.gui.out_dir_text)
                .font(egui::TextStyle::Monospace))
            .changed()
        {
            app.state.gui.out_dir_dirty = true;
            logd!("UI: out_dir_text changed (dirty=true) → {}", app.state.gui.out_dir_text);
        }

        if ui.button("📁").on_hover_text("Open output folder").clicked() {
            open_folder_clicked = true;
        }
    });

    if open_folder_clicked {
        open_output_folder(app);
    }

    // --- Actions: Save / Copy ---
    ui.horizontal(|ui| {
        for format in ExportFormat::ALL {
            let label = format!("Save {}", format.label());
            let hover = format!(
                "{} ({})",
                app.state.options.export.out_path(format).display(),
                format.mime()
            );
            if ui.add_enabled(has_records, egui::Button::new(label)).on_hover_text(hover).clicked() {
                actions::export(app, &[format]);
            }
        }
        if ui.add_enabled(has_records, egui::Button::new("Save both")).clicked() {
            actions::export(app, &ExportFormat::ALL);
        }

        ui.separator();

        if ui.add_enabled(has_records, egui::Button::new("Copy JSON")).clicked() {
            actions::copy(app, ui.ctx(), ExportFormat::Json);
        }

        if let Some(msg) = &app.export_msg {
            ui.label(msg);
        }
    });
}

/// Open the output folder (or its nearest existing parent) in the system
/// file explorer.
fn open_output_folder(app: &mut App) {
    if app.state.gui.out_dir_dirty {
        app.state.options.export.set_out_dir(&app.state.gui.out_dir_text);
        app.state.gui.out_dir_dirty = false;
    }
    let folder = file::find_nearest_existing_parent(app.state.options.export.out_dir());

    let absolute_folder = match std::fs::canonicalize(&folder) {
        Ok(abs_path) => abs_path,
        Err(e) => {
            let msg = format!("Cannot resolve folder path: {}", e);
            loge!("{}", msg);
            app.export_msg = Some(msg);
            return;
        }
    };

    if let Err(e) = file::open_folder_in_explorer(&absolute_folder) {
        loge!("Failed to open folder: {}", e);
        app.export_msg = Some(format!("Failed to open folder: {}", e));
    } else {
        logf!("Opened folder: {}", absolute_folder.display());
    }
}
