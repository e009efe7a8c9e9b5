// src/cli.rs
//
// Headless shell around the same pipeline the GUI drives:
//
//   cli alice bob --limit 5 --out output/ --format both
//
// Usernames given on the command line replace the settings-file defaults.

use std::{
    io::{self, Write},
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use clap::{Parser as _, ValueEnum};
use color_eyre::eyre::{Result, WrapErr};

use crate::{
    config::{consts::DEFAULT_SETTINGS_PATH, options::AppOptions, settings},
    core::parse_usernames,
    export::{ExportFormat, Exporter},
    fetch::{FetchError, MockFetcher},
    file,
    parse::PostParser,
    progress::{fraction, Progress},
    scrape::{InputError, RunOutcome, Scraper},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Csv,
    Json,
    Both,
}

impl FormatArg {
    pub fn formats(self) -> Vec<ExportFormat> {
        match self {
            FormatArg::Csv => vec![ExportFormat::Csv],
            FormatArg::Json => vec![ExportFormat::Json],
            FormatArg::Both => ExportFormat::ALL.to_vec(),
        }
    }
}

#[derive(Debug, clap::Parser)]
#[command(name = "threads_scrape", version, about = "Collect Threads posts per user and export CSV/JSON")]
pub struct Args {
    /// Usernames to scrape, in order (overrides the settings file)
    pub usernames: Vec<String>,

    /// Comma-separated usernames, appended after the positional ones
    #[arg(short, long, value_name = "A,B,...")]
    pub users: Option<String>,

    /// Max posts per user
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Output directory for threads_data.csv / threads_data.json
    #[arg(short, long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = FormatArg::Both)]
    pub format: FormatArg,

    /// Scrape this many users at once (output order is unchanged)
    #[arg(long)]
    pub workers: Option<usize>,

    #[arg(long, value_name = "PATH", default_value = DEFAULT_SETTINGS_PATH)]
    pub settings: PathBuf,

    /// Print the export to stdout instead of writing files
    #[arg(long)]
    pub stdout: bool,

    /// Debug log file
    #[arg(long, value_name = "PATH")]
    pub log: Option<PathBuf>,
}

impl Args {
    /// Effective options: settings file, then command-line overrides.
    pub fn resolve(&self, settings: &settings::Settings) -> AppOptions {
        let mut opts = AppOptions::from_settings(settings);

        let mut cli_users: Vec<String> = self
            .usernames
            .iter()
            .flat_map(|u| parse_usernames(u))
            .collect();
        if let Some(list) = &self.users {
            cli_users.extend(parse_usernames(list));
        }
        if !cli_users.is_empty() {
            opts.scrape.usernames = cli_users;
        }

        if let Some(limit) = self.limit {
            opts.scrape.set_limit(limit);
        }
        if let Some(workers) = self.workers {
            opts.scrape.set_workers(workers);
        }
        if let Some(out) = &self.out {
            opts.export.out_dir = out.clone();
        }
        opts.export.formats = self.format.formats();
        opts
    }
}

/// Status lines on stderr so `--stdout` output stays clean.
#[derive(Default)]
pub struct CliProgress {
    total: usize,
}

impl Progress for CliProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
    fn user_done(&mut self, username: &str, kept: usize, skipped: usize, done: usize, total: usize) {
        let pct = fraction(done, total) * 100.0;
        if skipped > 0 {
            eprintln!("  [{done}/{total} {pct:>3.0}%] @{username}: {kept} post(s), {skipped} malformed skipped");
        } else {
            eprintln!("  [{done}/{total} {pct:>3.0}%] @{username}: {kept} post(s)");
        }
    }
    fn user_failed(&mut self, username: &str, error: &FetchError, done: usize, total: usize) {
        let pct = fraction(done, total) * 100.0;
        eprintln!("  [{done}/{total} {pct:>3.0}%] Error for @{username}: {error}");
    }
    fn finish(&mut self) {
        eprintln!("Done! ({} user(s))", self.total);
    }
}

pub fn run() -> Result<()> {
    run_with(Args::parse())
}

pub fn run_with(args: Args) -> Result<()> {
    if let Some(path) = &args.log {
        crate::log::init(path.clone());
    }

    let settings = settings::load(&args.settings)?;
    let opts = args.resolve(&settings);

    // Rejected before any fetch; nothing is written.
    if opts.scrape.usernames.is_empty() {
        return Err(InputError::EmptyUsernames)
            .wrap_err("no usernames: pass them as arguments, with --users, or in the settings file");
    }

    let cancel = Arc::new(AtomicBool::new(false));
    {
        let cancel = Arc::clone(&cancel);
        if let Err(e) = ctrlc::set_handler(move || cancel.store(true, Ordering::Relaxed)) {
            logd!("CLI: Ctrl-C handler not installed: {e}");
        }
    }

    let scraper = Scraper::new(MockFetcher::default(), PostParser)
        .with_workers(opts.scrape.workers());
    let mut prog = CliProgress::default();
    let report = scraper.run(
        &opts.scrape.usernames,
        opts.scrape.limit(),
        Some(&mut prog),
        Some(cancel.as_ref()),
    )?;

    let failed = report.statuses.iter().filter(|s| s.is_failed()).count();
    if failed > 0 {
        eprintln!("{failed} of {} user(s) failed; their posts are missing.", report.statuses.len());
    }
    if report.was_cancelled() {
        eprintln!("Cancelled; exporting what was collected.");
    }

    match report.outcome() {
        RunOutcome::NoResults => {
            eprintln!("⚠ {}", report.summary());
            return Ok(());
        }
        RunOutcome::Collected(_) => eprintln!("✔ {}", report.summary()),
    }

    let exporter = Exporter;
    let artifacts = exporter.render_all(&opts.export.formats, &report.records)?;

    if args.stdout {
        let mut out = io::stdout().lock();
        for art in &artifacts {
            out.write_all(&art.bytes)?;
            if !art.bytes.ends_with(b"\n") {
                writeln!(out)?;
            }
        }
        out.flush()?;
        return Ok(());
    }

    let written = file::write_artifacts(opts.export.out_dir(), &artifacts)
        .wrap_err_with(|| format!("writing exports to {}", opts.export.out_dir().display()))?;
    for path in written {
        println!("Wrote {}", path.display());
    }
    Ok(())
}
