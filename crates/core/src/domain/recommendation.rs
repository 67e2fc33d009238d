use serde::{Deserialize, Serialize};
use std::fmt;

/// One row of the recommendation feed, already validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecommendation {
    pub company: String,
    pub symbol: String,
    pub recommendation: String,
    #[serde(rename = "RSI")]
    pub rsi: f64,
    pub price: f64,
}

impl StockRecommendation {
    pub fn category(&self) -> RecommendationCategory {
        RecommendationCategory::from_label(&self.recommendation)
    }
}

/// Closed set of advisory labels. Anything the server sends outside of
/// buy/sell/hold is kept for display but styled as `Unrated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecommendationCategory {
    Buy,
    Sell,
    Hold,
    Unrated,
}

impl RecommendationCategory {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "buy" => Self::Buy,
            "sell" => Self::Sell,
            "hold" => Self::Hold,
            _ => Self::Unrated,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Buy => "Buy",
            Self::Sell => "Sell",
            Self::Hold => "Hold",
            Self::Unrated => "Unrated",
        }
    }

    pub fn style_token(self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
            Self::Hold => "hold",
            Self::Unrated => "unrated",
        }
    }
}

impl fmt::Display for RecommendationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
