// src/gui/app.rs
use std::{
    error::Error,
    sync::{atomic::AtomicBool, mpsc, Arc, Mutex},
};

use eframe::egui;

use crate::{
    config::{
        consts::APP_TITLE,
        options::AppOptions,
        settings::Settings,
        state::AppState,
    },
    export::Exporter,
    fetch::Fetcher,
    parse::PostParser,
    scrape::{InputError, ScrapeReport, Scraper},
};

use super::progress::{RunStatus, SharedStatus};

pub type GuiScraper = Scraper<Box<dyn Fetcher>, PostParser>;

pub fn run(
    options: eframe::NativeOptions,
    settings: Settings,
    fetcher: Box<dyn Fetcher>,
) -> Result<(), Box<dyn Error>> {
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(App::new(settings, fetcher)))),
    )?;
    Ok(())
}

pub struct App {
    // single source of truth (UI thread only)
    pub state: AppState,

    // pipeline pieces, injected once at startup
    pub scraper: Arc<GuiScraper>,
    pub exporter: Exporter,

    // status/progress (scrape thread writes here)
    pub status: SharedStatus,
    pub running: bool,
    pub cancel: Arc<AtomicBool>,
    pub job: Option<mpsc::Receiver<Result<ScrapeReport, InputError>>>,

    // last finished run
    pub report: Option<ScrapeReport>,
    pub input_error: Option<String>,
    pub export_msg: Option<String>,
}

impl App {
    pub fn new(settings: Settings, fetcher: Box<dyn Fetcher>) -> Self {
        let options = AppOptions::from_settings(&settings);
        let scraper = Scraper::new(fetcher, PostParser).with_workers(options.scrape.workers());

        logf!(
            "Init: fetcher={} default usernames={} limit={}",
            scraper.fetcher().name(),
            options.scrape.usernames.len(),
            options.scrape.limit()
        );

        Self {
            state: AppState::new(options),
            scraper: Arc::new(scraper),
            exporter: Exporter,
            status: Arc::new(Mutex::new(RunStatus::idle())),
            running: false,
            cancel: Arc::new(AtomicBool::new(false)),
            job: None,
            report: None,
            input_error: None,
            export_msg: None,
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        super::actions::poll_scrape(self);

        egui::SidePanel::left("config")
            .resizable(false)
            .min_width(220.0)
            .show(ctx, |ui| {
                super::components::sidebar::draw(ui, self);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Threads Scraper Local Server");
            ui.label("Scrape Threads posts from users and export them as CSV or JSON.");
            ui.separator();

            super::components::run_panel::draw(ui, self);

            ui.separator();

            super::components::export_bar::draw(ui, self);

            ui.separator();

            super::components::results_table::draw(ui, self);
        });
    }
}
