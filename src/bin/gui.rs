// src/bin/gui.rs
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]
use std::path::Path;

use eframe::egui::ViewportBuilder;
use threads_scrape::{
    config::{consts::DEFAULT_SETTINGS_PATH, settings},
    gui, MockFetcher,
};

fn main() {
    let settings = settings::load_or_default(Path::new(DEFAULT_SETTINGS_PATH));

    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default().with_inner_size([1100.0, 700.0]),
        ..Default::default()
    };

    if let Err(e) = gui::run(options, settings, Box::new(MockFetcher::default())) {
        eprintln!("GUI failed: {}", e);
        std::process::exit(1);
    }
}
