pub mod client;
pub mod domain;
pub mod ingest;
pub mod popup;
pub mod signal;
pub mod view;

pub mod config {
    use anyhow::Context;

    pub const DEFAULT_RECOMMENDATIONS_URL: &str = "http://localhost:5000/fetch_stock_data";
    pub const DEFAULT_MARKET_DATA_BASE_URL: &str = "https://query1.finance.yahoo.com";
    const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;
    const DEFAULT_LOOKBACK_DAYS: i64 = 180;
    const DEFAULT_RSI_WINDOW: usize = 14;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub recommendations_url: String,
        pub fetch_timeout_secs: u64,
        pub market_data_base_url: String,
        pub lookback_days: i64,
        pub rsi_window: usize,
        pub screen_tickers: Option<Vec<String>>,
        pub sentry_dsn: Option<String>,
    }

    impl Default for Settings {
        fn default() -> Self {
            Self {
                recommendations_url: DEFAULT_RECOMMENDATIONS_URL.to_string(),
                fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
                market_data_base_url: DEFAULT_MARKET_DATA_BASE_URL.to_string(),
                lookback_days: DEFAULT_LOOKBACK_DAYS,
                rsi_window: DEFAULT_RSI_WINDOW,
                screen_tickers: None,
                sentry_dsn: None,
            }
        }
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            let defaults = Self::default();
            Ok(Self {
                recommendations_url: non_empty_var("RECOMMENDATIONS_URL")
                    .unwrap_or(defaults.recommendations_url),
                fetch_timeout_secs: parsed_var("FETCH_TIMEOUT_SECS")?
                    .unwrap_or(defaults.fetch_timeout_secs),
                market_data_base_url: non_empty_var("MARKET_DATA_BASE_URL")
                    .unwrap_or(defaults.market_data_base_url),
                lookback_days: parsed_var("LOOKBACK_DAYS")?.unwrap_or(defaults.lookback_days),
                rsi_window: parsed_var("RSI_WINDOW")?.unwrap_or(defaults.rsi_window),
                screen_tickers: non_empty_var("SCREEN_TICKERS").map(|s| parse_tickers(&s)),
                sentry_dsn: non_empty_var("SENTRY_DSN"),
            })
        }

        /// Checks that a window of `lookback_days` ending now is representable.
        pub fn require_lookback_days(&self) -> anyhow::Result<i64> {
            crate::ingest::types::LookbackWindow::ending_at(chrono::Utc::now(), self.lookback_days)?;
            Ok(self.lookback_days)
        }

        pub fn require_rsi_window(&self) -> anyhow::Result<usize> {
            anyhow::ensure!(
                self.rsi_window >= 2,
                "RSI_WINDOW must be >= 2 (got {})",
                self.rsi_window
            );
            Ok(self.rsi_window)
        }
    }

    fn non_empty_var(key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|s| !s.trim().is_empty())
    }

    fn parsed_var<T>(key: &str) -> anyhow::Result<Option<T>>
    where
        T: std::str::FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        non_empty_var(key)
            .map(|s| {
                s.trim()
                    .parse::<T>()
                    .with_context(|| format!("{key} is not a valid number: {s}"))
            })
            .transpose()
    }

    pub fn parse_tickers(s: &str) -> Vec<String> {
        s.split(',')
            .map(|part| part.trim().to_ascii_uppercase())
            .filter(|part| !part.is_empty())
            .collect()
    }

}
