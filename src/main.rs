//! ZoneGrid - Entry Point

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use zonegrid::codec::{FileCookieJar, FileKeyValueStore, export_to_dir, import_file};
use zonegrid::config::{CliOverrides, apply_cli_overrides, apply_env_overrides, merge_config};
use zonegrid::model::{AppError, SortKey};
use zonegrid::source::{DocumentFetcher, Location, NetworkFetcher, id_from_location};
use zonegrid::state::AppState;
use zonegrid::view::{ColorConfig, RunOutcome, Services, StartupOptions, resolve_dark_mode};
use zonegrid::viewer::ViewerLauncher;

/// ZoneGrid - browse a zone catalog from the terminal
#[derive(Parser, Debug)]
#[command(name = "zonegrid")]
#[command(version)]
#[command(about = "Terminal catalog browser for zone collections")]
pub struct Args {
    /// Record list location (URL or file path)
    #[arg(long)]
    pub source: Option<String>,

    /// Open the zone with this id on startup
    #[arg(long)]
    pub id: Option<String>,

    /// Page URL whose `id` query parameter selects a zone to open
    #[arg(long)]
    pub location: Option<String>,

    /// Start with this search text
    #[arg(short, long)]
    pub search: Option<String>,

    /// Initial sort order
    #[arg(long, value_parser = ["default", "name", "id"])]
    pub sort: Option<String>,

    /// Zones per page (must be positive)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: Option<u32>,

    /// Start in dark mode
    #[arg(long)]
    pub dark: bool,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Export saved data to a `.data` file in DIR and exit
    #[arg(long, value_name = "DIR", conflicts_with = "import")]
    pub export: Option<PathBuf>,

    /// Import saved data from FILE and exit
    #[arg(long, value_name = "FILE")]
    pub import: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    fn cli_overrides(&self) -> CliOverrides {
        CliOverrides {
            zones_url: self.source.clone(),
            page_size: self
                .page_size
                .and_then(|n| usize::try_from(n).ok())
                .and_then(std::num::NonZeroUsize::new),
            default_sort: self.sort.as_deref().map(SortKey::parse),
            dark_mode: self.dark.then_some(true),
        }
    }

    /// `--id` wins over the `id` parameter of `--location`.
    fn startup_id(&self) -> Option<String> {
        self.id
            .clone()
            .or_else(|| self.location.as_deref().and_then(id_from_location))
    }
}

/// Run `--export` or `--import` if either was given.
///
/// Returns `true` when one ran and the TUI should not start.
fn run_headless(
    args: &Args,
    kv: &mut FileKeyValueStore,
    cookies: &mut FileCookieJar,
) -> Result<bool, AppError> {
    if let Some(dir) = &args.export {
        let path = export_to_dir(&*kv, &*cookies, dir, chrono::Utc::now())?;
        println!("{}", path.display());
        return Ok(true);
    }

    if let Some(file) = &args.import {
        let report = import_file(file, kv, cookies)?;
        println!(
            "Imported {} keys and {} cookies",
            report.keys_written, report.cookies_applied
        );
        for warning in &report.cookies_skipped {
            eprintln!("warning: {warning}");
        }
        return Ok(true);
    }

    Ok(false)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = zonegrid::config::load_config_with_precedence(args.config.clone())?;
        let merged = merge_config(config_file);
        let with_env = apply_env_overrides(merged);
        apply_cli_overrides(with_env, args.cli_overrides())
    };

    zonegrid::logging::init(&config.log_file_path)?;
    info!(config = ?config, "Configuration loaded and resolved");

    let mut kv = FileKeyValueStore::open(&config.state_dir).map_err(AppError::from)?;
    let mut cookies = FileCookieJar::open(&config.state_dir).map_err(AppError::from)?;

    if run_headless(&args, &mut kv, &mut cookies)? {
        return Ok(());
    }

    let templates = config.template_context().map_err(AppError::from)?;
    let fetcher: Arc<dyn DocumentFetcher> = Arc::new(NetworkFetcher::new());
    let dark_mode = resolve_dark_mode(args.dark, &kv, config.dark_mode);
    let app_state = AppState::new(config.page_size, config.default_sort, dark_mode);

    let services = Services {
        launcher: ViewerLauncher::new(templates, Arc::clone(&fetcher)),
        fetcher,
        zones: Location::parse(&config.zones_url),
        kv: Box::new(kv),
        cookies: Box::new(cookies),
        export_dir: config.export_dir.clone(),
        detached_dir: config.detached_dir.clone(),
    };
    let options = StartupOptions {
        open_id: args.startup_id(),
        search: args.search.clone(),
        colors: Some(ColorConfig::from_env_and_args(args.no_color)),
    };

    match zonegrid::view::run_with_services(app_state, services, options)? {
        RunOutcome::Quit => {}
        RunOutcome::Navigate(url) => {
            info!(%url, "Leaving for external zone");
            println!("{url}");
        }
    }

    Ok(())
}
