/// Large-cap US tickers screened when `SCREEN_TICKERS` is not set.
pub const DEFAULT_TICKERS: [&str; 50] = [
    "AAPL", "MSFT", "GOOGL", "AMZN", "META", "TSLA", "NVDA", "JPM", "JNJ", "V", "PG", "UNH",
    "DIS", "HD", "MA", "PYPL", "VZ", "ADBE", "NFLX", "INTC", "KO", "NKE", "MRK", "T", "PEP",
    "PFE", "CSCO", "XOM", "ABT", "CMCSA", "ABBV", "CVX", "ACN", "MDT", "CRM", "MCD", "TMO",
    "NEE", "DHR", "COST", "LLY", "WMT", "AMGN", "HON", "TXN", "PM", "UNP", "QCOM", "LIN", "BMY",
];

pub fn resolve_tickers(configured: Option<&[String]>) -> Vec<String> {
    match configured {
        Some(list) if !list.is_empty() => list.to_vec(),
        _ => DEFAULT_TICKERS.iter().map(|s| s.to_string()).collect(),
    }
}
