use chrono::{DateTime, Utc};
use rsiwatch_core::domain::recommendation::StockRecommendation;
use rsiwatch_core::ingest::provider::{collect_histories, PriceHistorySource};
use rsiwatch_core::ingest::types::LookbackWindow;
use rsiwatch_core::signal::screen::screen;

#[derive(Debug, Clone)]
pub struct FeedOptions {
    pub tickers: Vec<String>,
    pub lookback_days: i64,
    pub rsi_window: usize,
}

/// Builds the `/fetch_stock_data` payload as of `now`.
pub async fn build_feed(
    source: &dyn PriceHistorySource,
    opts: &FeedOptions,
    now: DateTime<Utc>,
) -> anyhow::Result<Vec<StockRecommendation>> {
    let window = LookbackWindow::ending_at(now, opts.lookback_days)?;
    let histories = collect_histories(source, &opts.tickers, window).await;

    anyhow::ensure!(
        opts.tickers.is_empty() || !histories.is_empty(),
        "no price history could be fetched for any of {} tickers",
        opts.tickers.len()
    );

    let feed = screen(&histories, opts.rsi_window);
    tracing::info!(
        tickers = opts.tickers.len(),
        histories = histories.len(),
        recommendations = feed.len(),
        "built recommendation feed"
    );
    Ok(feed)
}
