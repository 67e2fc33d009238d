use crate::config::Settings;
use crate::ingest::types::{ChartResponse, LookbackWindow, PriceHistory};
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use std::time::Duration;

const CHART_PATH: &str = "/v8/finance/chart";
const CLIENT_USER_AGENT: &str = concat!("rsiwatch/", env!("CARGO_PKG_VERSION"));

#[async_trait::async_trait]
pub trait PriceHistorySource: Send + Sync {
    fn provider_name(&self) -> &'static str;

    async fn fetch_price_history(&self, symbol: &str, window: LookbackWindow) -> Result<PriceHistory>;
}

/// Daily closes from a Yahoo-style `/v8/finance/chart/{symbol}` endpoint.
#[derive(Debug, Clone)]
pub struct HttpChartProvider {
    http: reqwest::Client,
    base_url: String,
}

impl HttpChartProvider {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(
            &settings.market_data_base_url,
            Duration::from_secs(settings.fetch_timeout_secs),
        )
    }

    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build market data http client")?;

        Ok(Self {
            http,
            base_url: base_url.trim().to_string(),
        })
    }

    fn url(&self, symbol: &str) -> String {
        format!("{}{}/{}", self.base_url.trim_end_matches('/'), CHART_PATH, symbol)
    }

    fn headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }
}

#[async_trait::async_trait]
impl PriceHistorySource for HttpChartProvider {
    fn provider_name(&self) -> &'static str {
        "http_chart"
    }

    async fn fetch_price_history(&self, symbol: &str, window: LookbackWindow) -> Result<PriceHistory> {
        let res = self
            .http
            .get(self.url(symbol))
            .headers(Self::headers())
            .query(&[
                ("period1", window.start.timestamp().to_string()),
                ("period2", window.end.timestamp().to_string()),
                ("interval", "1d".to_string()),
            ])
            .send()
            .await
            .with_context(|| format!("chart request failed for {symbol}"))?;

        let status = res.status();
        let text = res
            .text()
            .await
            .with_context(|| format!("failed to read chart response for {symbol}"))?;

        let parsed = serde_json::from_str::<ChartResponse>(&text)
            .with_context(|| format!("chart response for {symbol} is not valid JSON: {text}"))?;

        if let Some(err) = parsed.chart.error.as_ref() {
            anyhow::bail!("chart error for {symbol} (HTTP {status}): {} {}", err.code, err.description);
        }
        if !status.is_success() {
            anyhow::bail!("chart HTTP {status} for {symbol}");
        }

        parse_history(symbol, parsed)
    }
}

fn parse_history(symbol: &str, resp: ChartResponse) -> Result<PriceHistory> {
    let result = resp
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .with_context(|| format!("chart response for {symbol} has no result"))?;

    let company = result
        .meta
        .long_name
        .or(result.meta.short_name)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| {
            tracing::warn!(%symbol, "company name unavailable; using ticker");
            symbol.to_string()
        });

    let closes: Vec<f64> = result
        .indicators
        .quote
        .into_iter()
        .next()
        .map(|q| q.close.into_iter().flatten().filter(|c| c.is_finite()).collect())
        .unwrap_or_default();

    Ok(PriceHistory {
        symbol: result.meta.symbol.unwrap_or_else(|| symbol.to_string()),
        company,
        closes,
    })
}

/// Fetches every ticker in order. A ticker whose history cannot be fetched is
/// skipped; the screen runs on whatever came back.
pub async fn collect_histories(
    source: &dyn PriceHistorySource,
    tickers: &[String],
    window: LookbackWindow,
) -> Vec<PriceHistory> {
    let mut out = Vec::with_capacity(tickers.len());
    let mut failures: usize = 0;

    for symbol in tickers {
        match source.fetch_price_history(symbol, window).await {
            Ok(history) => out.push(history),
            Err(err) => {
                failures += 1;
                tracing::warn!(
                    %symbol,
                    provider = source.provider_name(),
                    failure_count = failures,
                    error = %format!("{err:#}"),
                    "price history fetch failed; skipping ticker"
                );
            }
        }
    }

    tracing::info!(
        requested = tickers.len(),
        fetched = out.len(),
        failures,
        "price histories collected"
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn window() -> LookbackWindow {
        let end = Utc.with_ymd_and_hms(2026, 1, 27, 0, 0, 0).unwrap();
        LookbackWindow::ending_at(end, 180).unwrap()
    }

    #[test]
    fn parses_closes_and_skips_nulls() {
        let v = json!({
            "chart": {
                "result": [{
                    "meta": {"symbol": "AAPL", "longName": "Apple Inc.", "shortName": "Apple"},
                    "timestamp": [1, 2, 3],
                    "indicators": {"quote": [{"close": [1.5, null, 2.5]}]}
                }],
                "error": null
            }
        });
        let resp: ChartResponse = serde_json::from_value(v).unwrap();
        let h = parse_history("AAPL", resp).unwrap();
        assert_eq!(h.company, "Apple Inc.");
        assert_eq!(h.closes, vec![1.5, 2.5]);
        assert_eq!(h.last_close(), Some(2.5));
    }

    #[test]
    fn falls_back_to_ticker_for_company() {
        let v = json!({
            "chart": {"result": [{"meta": {}, "indicators": {"quote": []}}], "error": null}
        });
        let resp: ChartResponse = serde_json::from_value(v).unwrap();
        let h = parse_history("XYZ", resp).unwrap();
        assert_eq!(h.company, "XYZ");
        assert_eq!(h.symbol, "XYZ");
        assert!(h.closes.is_empty());
    }

    #[test]
    fn empty_result_is_an_error() {
        let v = json!({"chart": {"result": [], "error": null}});
        let resp: ChartResponse = serde_json::from_value(v).unwrap();
        assert!(parse_history("XYZ", resp).is_err());
    }

    #[test]
    fn lookback_window_spans_days() {
        let w = window();
        assert_eq!((w.end - w.start).num_days(), 180);
        assert!(LookbackWindow::ending_at(w.end, 0).is_err());
    }

    struct FlakySource;

    #[async_trait::async_trait]
    impl PriceHistorySource for FlakySource {
        fn provider_name(&self) -> &'static str {
            "flaky"
        }

        async fn fetch_price_history(&self, symbol: &str, _window: LookbackWindow) -> Result<PriceHistory> {
            anyhow::ensure!(symbol != "BAD", "delisted");
            Ok(PriceHistory {
                symbol: symbol.to_string(),
                company: symbol.to_string(),
                closes: vec![1.0],
            })
        }
    }

    #[tokio::test]
    async fn collect_skips_failed_tickers() {
        let tickers = vec!["AAA".to_string(), "BAD".to_string(), "CCC".to_string()];
        let out = collect_histories(&FlakySource, &tickers, window()).await;
        let symbols: Vec<_> = out.iter().map(|h| h.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["AAA", "CCC"]);
    }

    #[tokio::test]
    async fn http_provider_reads_chart_endpoint() {
        use axum::extract::{Path, Query};
        use axum::http::StatusCode;
        use axum::routing::get;
        use std::collections::HashMap;

        let app = axum::Router::new().route(
            "/v8/finance/chart/:symbol",
            get(|Path(symbol): Path<String>, Query(q): Query<HashMap<String, String>>| async move {
                if q.get("interval").map(String::as_str) != Some("1d") || !q.contains_key("period1") {
                    return (StatusCode::BAD_REQUEST, axum::Json(json!({"chart": {"result": null}})));
                }
                (
                    StatusCode::OK,
                    axum::Json(json!({
                        "chart": {
                            "result": [{
                                "meta": {"symbol": symbol, "longName": "Acme Corp"},
                                "indicators": {"quote": [{"close": [1.0, 2.0]}]}
                            }],
                            "error": null
                        }
                    })),
                )
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let provider = HttpChartProvider::new(&format!("http://{addr}/"), Duration::from_secs(5)).unwrap();
        let h = provider.fetch_price_history("ACM", window()).await.unwrap();
        assert_eq!(h.symbol, "ACM");
        assert_eq!(h.company, "Acme Corp");
        assert_eq!(h.closes, vec![1.0, 2.0]);
    }

    #[tokio::test]
    async fn http_provider_surfaces_chart_errors() {
        use axum::http::StatusCode;
        use axum::routing::get;

        let app = axum::Router::new().route(
            "/v8/finance/chart/:symbol",
            get(|| async {
                (
                    StatusCode::NOT_FOUND,
                    axum::Json(json!({
                        "chart": {"result": null, "error": {"code": "Not Found", "description": "No data found"}}
                    })),
                )
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let provider = HttpChartProvider::new(&format!("http://{addr}"), Duration::from_secs(5)).unwrap();
        let err = provider.fetch_price_history("GONE", window()).await.unwrap_err();
        assert!(format!("{err:#}").contains("No data found"));
    }
}
