use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rsiwatch_core::domain::recommendation::StockRecommendation;
use rsiwatch_core::ingest::provider::{HttpChartProvider, PriceHistorySource};
use rsiwatch_core::ingest::universe::resolve_tickers;

mod feed;

const DEFAULT_PORT: u16 = 5000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = rsiwatch_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let provider = HttpChartProvider::from_settings(&settings)?;
    let state = AppState {
        source: Arc::new(provider),
        opts: Arc::new(feed::FeedOptions {
            tickers: resolve_tickers(settings.screen_tickers.as_deref()),
            lookback_days: settings.require_lookback_days()?,
            rsi_window: settings.require_rsi_window()?,
        }),
    };

    let app = router(state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, market_data = %settings.market_data_base_url, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

#[derive(Clone)]
struct AppState {
    source: Arc<dyn PriceHistorySource>,
    opts: Arc<feed::FeedOptions>,
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/fetch_stock_data", get(fetch_stock_data))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

async fn fetch_stock_data(
    State(state): State<AppState>,
) -> Result<Json<Vec<StockRecommendation>>, StatusCode> {
    let feed = feed::build_feed(state.source.as_ref(), &state.opts, chrono::Utc::now())
        .await
        .map_err(|e| {
            sentry_anyhow::capture_anyhow(&e);
            tracing::error!(error = %format!("{e:#}"), "building recommendation feed failed");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(Json(feed))
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
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
