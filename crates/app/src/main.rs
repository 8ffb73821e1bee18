use std::sync::Arc;

use chrono::Local;
use clap::Parser;
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppServices, Clock};
use ui::{App, UiApp, build_app_context};

mod cli;
mod config;

use cli::{Cli, Command};
use config::{AppConfig, normalize_sqlite_url, prepare_sqlite_file};

fn init_tracing(quiet: bool, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("PRACTICE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| format!("failed to initialize tracing subscriber: {err}"))?;
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let config = AppConfig::load(&cli)?;
    let cwd = std::env::current_dir()?;
    let db_url = normalize_sqlite_url(&config.database.url, &cwd);

    // Open + migrate SQLite at startup; services stay unaware of file paths.
    prepare_sqlite_file(&db_url)?;
    let services =
        AppServices::new_sqlite(&db_url, Clock::default_clock(), config.webhook_config()).await?;
    tracing::info!(db = %db_url, command = ?cli.command(), "starting");

    match cli.command() {
        Command::Ui => {
            let app: Arc<dyn UiApp> = Arc::new(services);
            let context = build_app_context(&app);

            // Some dev setups open desktop windows always-on-top by default.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Practice")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Seed => {
            let session = services.sessions().create_sample_review(&Local::now()).await?;
            println!(
                "seeded review session {} ({}) in {db_url}",
                session.id(),
                session.problem().title()
            );
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // Reported once, here.
        eprintln!("practice: {err}");
        std::process::exit(1);
    }
}
