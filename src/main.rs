use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use portfolio_runtime::config::{ConfigError, SiteConfig};
use portfolio_runtime::contact::SubmissionState;
use portfolio_runtime::engine::{Page, PageError};
use portfolio_runtime::net::{ClientError, EmailJsClient};

#[cfg(feature = "preview")]
mod app;

/// Run a portfolio page's behavior layer.
#[derive(Parser, Debug)]
#[command(name = "portfolio-runtime", version, about)]
struct Cli {
    /// HTML page to load
    #[arg(default_value = "site/index.html")]
    page: PathBuf,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for orbit generation (overrides the config)
    #[arg(long)]
    seed: Option<u64>,

    /// Run a scripted session on the virtual clock instead of opening a window
    #[arg(long)]
    headless: bool,

    /// Virtual seconds the headless session runs for
    #[arg(long, default_value_t = 10)]
    duration: u64,

    /// Submit the contact form at the end of the headless session
    #[arg(long)]
    submit: bool,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Page(#[from] PageError),
    #[error("failed to build email client: {0}")]
    Client(#[from] ClientError),
    #[cfg(feature = "preview")]
    #[error("preview window failed: {0}")]
    Preview(#[from] eframe::Error),
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = match &cli.config {
        Some(path) => SiteConfig::load(path)?,
        None => SiteConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let delivery = Arc::new(EmailJsClient::new(&config.contact)?);
    let page = Page::load(&cli.page, config, delivery)?;
    log::info!("Loaded {}", cli.page.display());

    if cli.headless {
        run_headless(page, &cli);
        return Ok(());
    }

    #[cfg(feature = "preview")]
    app::run(page)?;

    #[cfg(not(feature = "preview"))]
    {
        log::warn!("Built without the preview window; running headless");
        run_headless(page, &cli);
    }

    Ok(())
}

/// Drive the page on its virtual clock and log what a visitor would see.
fn run_headless(mut page: Page, cli: &Cli) {
    page.ready();

    for second in 1..=cli.duration {
        page.advance(1000);
        log::info!(
            "[{:>3}s] typing: {:?}",
            second,
            page.typing_text().unwrap_or_default()
        );
    }

    // Walk through every observed section top to bottom
    let sections = page
        .scroll_spy()
        .map(|spy| spy.sections().to_vec())
        .unwrap_or_default();
    for section in sections {
        let Some(rect) = page.geometry().rect(section) else {
            continue;
        };
        page.user_scroll(rect.top());
        let revealed = page.reveal().map_or(0, |r| r.revealed_count());
        log::info!(
            "scroll {:>6.0}px  active: {:<12} revealed: {}",
            page.viewport().scroll_y,
            page.active_section_href().unwrap_or("-"),
            revealed
        );
    }

    if cli.submit {
        if !page.submit() {
            log::warn!("Nothing to submit");
            return;
        }
        let timeout = Duration::from_secs(page.config().contact.timeout_secs + 1);
        match page.await_delivery(timeout) {
            Some(SubmissionState::Succeeded) => log::info!("Contact form delivered"),
            Some(state) => log::warn!("Contact form finished as {:?}", state),
            None => log::warn!("Contact delivery still pending after {:?}", timeout),
        }
        // Let the toast run its course
        page.advance(page.config().notifications.auto_dismiss_ms);
    }
}
