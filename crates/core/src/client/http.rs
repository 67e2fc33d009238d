use crate::client::error::describe_chain;
use crate::client::{FetchError, RecommendationSource};
use crate::config::Settings;
use crate::domain::contract::{validate_feed, WireRecommendation};
use crate::domain::recommendation::StockRecommendation;
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use std::time::Duration;

/// Fetches the recommendation feed from the local service with a single GET.
#[derive(Debug, Clone)]
pub struct HttpRecommendationClient {
    http: reqwest::Client,
    url: String,
}

impl HttpRecommendationClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(
            &settings.recommendations_url,
            Duration::from_secs(settings.fetch_timeout_secs),
        )
    }

    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let url = url.trim().to_string();
        anyhow::ensure!(!url.is_empty(), "recommendations url must be non-empty");

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build recommendations http client")?;

        Ok(Self { http, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }
}

#[async_trait::async_trait]
impl RecommendationSource for HttpRecommendationClient {
    fn source_name(&self) -> &str {
        &self.url
    }

    async fn fetch_recommendations(&self) -> Result<Vec<StockRecommendation>, FetchError> {
        let res = self
            .http
            .get(&self.url)
            .headers(Self::headers())
            .send()
            .await
            .map_err(|e| FetchError::NetworkFailure(describe_chain(&e)))?;

        let status = res.status();
        if !status.is_success() {
            let status_text = status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| status.as_u16().to_string());
            return Err(FetchError::BadStatus(status_text));
        }

        let text = res
            .text()
            .await
            .map_err(|e| FetchError::NetworkFailure(describe_chain(&e)))?;

        let items = serde_json::from_str::<Vec<WireRecommendation>>(&text)
            .map_err(|e| FetchError::DecodeFailure(e.to_string()))?;

        let recs = validate_feed(items).map_err(|e| FetchError::DecodeFailure(format!("{e:#}")))?;

        tracing::debug!(url = %self.url, count = recs.len(), "fetched recommendations");
        Ok(recs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap as AxumHeaders, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use serde_json::json;

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/fetch_stock_data")
    }

    fn client(url: &str) -> HttpRecommendationClient {
        HttpRecommendationClient::new(url, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn decodes_success_body_in_order() {
        let app = Router::new().route(
            "/fetch_stock_data",
            get(|| async {
                axum::Json(json!([
                    {"company": "Acme", "symbol": "ACM", "recommendation": "Buy", "RSI": 55, "price": 101.5},
                    {"company": "Beta", "symbol": "BET", "recommendation": "Sell", "RSI": 81.234, "price": 7}
                ]))
            }),
        );
        let url = serve(app).await;

        let recs = client(&url).fetch_recommendations().await.unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].symbol, "ACM");
        assert_eq!(recs[1].symbol, "BET");
    }

    #[tokio::test]
    async fn empty_array_is_not_an_error() {
        let app = Router::new().route("/fetch_stock_data", get(|| async { axum::Json(json!([])) }));
        let url = serve(app).await;

        let recs = client(&url).fetch_recommendations().await.unwrap();
        assert!(recs.is_empty());
    }

    #[tokio::test]
    async fn sends_json_content_type() {
        let app = Router::new().route(
            "/fetch_stock_data",
            get(|headers: AxumHeaders| async move {
                let ct = headers
                    .get("content-type")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                if ct == "application/json" {
                    (StatusCode::OK, "[]")
                } else {
                    (StatusCode::BAD_REQUEST, "missing content type")
                }
            }),
        );
        let url = serve(app).await;

        assert!(client(&url).fetch_recommendations().await.is_ok());
    }

    #[tokio::test]
    async fn server_error_maps_to_bad_status() {
        let app = Router::new().route(
            "/fetch_stock_data",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let url = serve(app).await;

        let err = client(&url).fetch_recommendations().await.unwrap_err();
        assert_eq!(err, FetchError::BadStatus("Internal Server Error".into()));
    }

    #[tokio::test]
    async fn unknown_status_falls_back_to_code() {
        let app = Router::new().route(
            "/fetch_stock_data",
            get(|| async { (StatusCode::from_u16(599).unwrap(), "odd") }),
        );
        let url = serve(app).await;

        let err = client(&url).fetch_recommendations().await.unwrap_err();
        assert_eq!(err, FetchError::BadStatus("599".into()));
    }

    #[tokio::test]
    async fn malformed_json_maps_to_decode_failure() {
        let app = Router::new().route("/fetch_stock_data", get(|| async { "[{not json" }));
        let url = serve(app).await;

        let err = client(&url).fetch_recommendations().await.unwrap_err();
        assert!(matches!(err, FetchError::DecodeFailure(_)));
    }

    #[tokio::test]
    async fn missing_field_maps_to_decode_failure() {
        let app = Router::new().route(
            "/fetch_stock_data",
            get(|| async {
                axum::Json(json!([
                    {"company": "Acme", "symbol": "ACM", "recommendation": "Buy", "price": 1.0}
                ]))
            }),
        );
        let url = serve(app).await;

        let err = client(&url).fetch_recommendations().await.unwrap_err();
        match err {
            FetchError::DecodeFailure(msg) => assert!(msg.contains("RSI is missing")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn connection_refused_maps_to_network_failure() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = format!("http://{addr}/fetch_stock_data");
        let err = client(&url).fetch_recommendations().await.unwrap_err();
        assert!(matches!(err, FetchError::NetworkFailure(_)));
    }
}
