use anyhow::Context;
use clap::{Parser, ValueEnum};
use rsiwatch_core::client::http::HttpRecommendationClient;
use rsiwatch_core::popup::{AlertSurface, ClickOutcome, Popup};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod page;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Html,
}

#[derive(Debug, Parser)]
#[command(name = "rsiwatch_popup")]
struct Args {
    /// Recommendation feed URL. Defaults to RECOMMENDATIONS_URL or the local service.
    #[arg(long)]
    endpoint: Option<String>,

    /// How to print the display region.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Also write a standalone HTML page to this path.
    #[arg(long)]
    out: Option<PathBuf>,
}

/// Alerts go to stderr so stdout only ever carries the display region.
struct StderrAlerts;

impl AlertSurface for StderrAlerts {
    fn alert(&self, message: &str) {
        eprintln!("{message}");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut settings = rsiwatch_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();
    if let Some(endpoint) = args.endpoint {
        settings.recommendations_url = endpoint;
    }

    let client = HttpRecommendationClient::from_settings(&settings)?;
    let popup = Popup::new(client, StderrAlerts);

    let outcome = popup.click().await;
    if let ClickOutcome::Failed { error, .. } = &outcome {
        tracing::debug!(kind = error.kind(), "fetch failed; region left unchanged");
        return Ok(());
    }

    let region = popup.snapshot().await;
    match args.format {
        OutputFormat::Text => println!("{}", region.to_text()),
        OutputFormat::Html => println!("{}", region.to_html()),
    }

    if let Some(path) = args.out {
        tokio::fs::write(&path, page::render_page(&region))
            .await
            .with_context(|| format!("failed to write popup page to {}", path.display()))?;
        tracing::info!(path = %path.display(), "wrote popup page");
    }

    Ok(())
}

fn init_sentry(settings: &rsiwatch_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
