// src/gui/actions/export.rs
use crate::{export::ExportFormat, file, gui::app::App};

/// Render `formats` from the last run and save them into the output folder.
pub fn export(app: &mut App, formats: &[ExportFormat]) {
    // normalize out dir first (mutates app) before any &app borrows
    if app.state.gui.out_dir_dirty {
        app.state.options.export.set_out_dir(&app.state.gui.out_dir_text);
        logf!(
            "Export: Out dir set → {}",
            app.state.options.export.out_dir().display()
        );
        app.state.gui.out_dir_dirty = false;
    }

    let status_msg = match super::current_records(app) {
        None => {
            logd!("Export: Clicked, but there's nothing to export");
            s!("Nothing to export")
        }
        Some(records) => {
            let dir = app.state.options.export.out_dir();
            logf!(
                "Export: Begin rows={} formats={:?} dir={}",
                records.len(),
                formats,
                dir.display()
            );

            let result = app
                .exporter
                .render_all(formats, records)
                .and_then(|artifacts| file::write_artifacts(dir, &artifacts));

            match result {
                Ok(paths) => match paths.last() {
                    Some(last) => {
                        logf!("Export: OK count={} last={}", paths.len(), last.display());
                        format!("Exported {} file(s). Last: {}", paths.len(), last.display())
                    }
                    None => s!("Export done"),
                },
                Err(e) => {
                    loge!("Export: Error: {}", e);
                    format!("Export error: {e}")
                }
            }
        }
    };

    // mutate app only after the record borrows are gone
    app.export_msg = Some(status_msg);
}
