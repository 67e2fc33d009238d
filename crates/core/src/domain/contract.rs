use crate::domain::recommendation::StockRecommendation;
use anyhow::ensure;
use serde::Deserialize;

/// Wire shape of one element of the `/fetch_stock_data` array.
///
/// Every field is optional here so that a missing key surfaces as a
/// validation error naming the field instead of a generic serde message.
#[derive(Debug, Clone, Deserialize)]
pub struct WireRecommendation {
    pub company: Option<String>,
    pub symbol: Option<String>,
    pub recommendation: Option<String>,
    #[serde(rename = "RSI")]
    pub rsi: Option<f64>,
    pub price: Option<f64>,
}

pub fn validate_feed(items: Vec<WireRecommendation>) -> anyhow::Result<Vec<StockRecommendation>> {
    let mut out = Vec::with_capacity(items.len());
    for (idx, item) in items.into_iter().enumerate() {
        let rec = item
            .validate_and_into_recommendation()
            .map_err(|e| e.context(format!("invalid recommendation at index {idx}")))?;
        out.push(rec);
    }
    Ok(out)
}

impl WireRecommendation {
    pub fn validate_and_into_recommendation(self) -> anyhow::Result<StockRecommendation> {
        let company = required_text(self.company, "company")?;
        let symbol = required_text(self.symbol, "symbol")?;
        let recommendation = required_text(self.recommendation, "recommendation")?;

        let rsi = self.rsi.ok_or_else(|| anyhow::anyhow!("RSI is missing"))?;
        ensure!(rsi.is_finite(), "RSI must be finite (got {rsi})");

        let price = self.price.ok_or_else(|| anyhow::anyhow!("price is missing"))?;
        ensure!(price.is_finite(), "price must be finite (got {price})");

        Ok(StockRecommendation {
            company,
            symbol,
            recommendation,
            rsi,
            price,
        })
    }
}

fn required_text(v: Option<String>, field: &str) -> anyhow::Result<String> {
    let v = v.ok_or_else(|| anyhow::anyhow!("{field} is missing"))?;
    ensure!(!v.trim().is_empty(), "{field} must be non-empty");
    Ok(v)
}
