// src/gui/components/results_table.rs
//
// Read-only preview of the last ResultSet. Columns are the same first-seen
// union the CSV export uses; long text is flattened to one line.

use eframe::egui::{self, Align, Layout, RichText, TextWrapMode};
use egui_extras::{Column, TableBuilder};
use crate::{core::sanitize::preview, gui::app::App, post::POST_FIELDS};

const TEXT_PREVIEW_CHARS: usize = 80;
const NUMERIC_COLUMNS: [&str; 3] = ["like_count", "reply_count", "repost_count"];

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let Some(report) = app.report.as_ref() else {
        ui.label(RichText::new("No data yet. Enter usernames and press Run Scraper.").weak());
        return;
    };
    let records = &report.records;
    if records.is_empty() {
        return;
    }

    let headers = records.field_names();
    let cells: Vec<Vec<String>> = records
        .iter()
        .map(|post| {
            headers
                .iter()
                .map(|h| post.get(h).map(|cell| preview(&cell, TEXT_PREVIEW_CHARS)).unwrap_or_default())
                .collect()
        })
        .collect();

    ui.label(format!("{} post(s), {} column(s)", records.len(), headers.len()));

    let avail_h = ui.available_height();
    egui::ScrollArea::horizontal()
        .id_salt("results_table_hscroll")
        .max_height(avail_h)
        .show(ui, |ui| {
            let mut table = TableBuilder::new(ui)
                .striped(true)
                .min_scrolled_height(0.0)
                .max_scroll_height(avail_h);

            for h in &headers {
                table = table.column(Column::initial(initial_width(h)).resizable(true).clip(true).at_least(20.0));
            }

            table
                .header(24.0, |mut header| {
                    for h in &headers {
                        header.col(|ui| {
                            ui.style_mut().wrap_mode = Some(TextWrapMode::Extend);
                            ui.add(egui::Label::new(RichText::new(h).strong()).selectable(false));
                        });
                    }
                })
                .body(|body| {
                    body.rows(20.0, cells.len(), |mut row| {
                        let Some(data) = cells.get(row.index()) else { return };
                        for (ci, cell) in data.iter().enumerate() {
                            let numeric = headers
                                .get(ci)
                                .is_some_and(|h| NUMERIC_COLUMNS.contains(&h.as_str()));
                            row.col(|ui| {
                                ui.style_mut().wrap_mode = Some(TextWrapMode::Extend);
                                if numeric {
                                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| { ui.label(cell); });
                                } else {
                                    ui.with_layout(Layout::left_to_right(Align::Center), |ui| { ui.label(cell); });
                                }
                            });
                        }
                    });
                });
        });
}

fn initial_width(column: &str) -> f32 {
    match column {
        "text" => 420.0,
        "url" => 260.0,
        "id" | "created_at" => 160.0,
        c if NUMERIC_COLUMNS.contains(&c) => 90.0,
        c if POST_FIELDS.contains(&c) => 110.0,
        _ => 120.0,
    }
}
