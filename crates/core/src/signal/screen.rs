use crate::domain::recommendation::{RecommendationCategory, StockRecommendation};
use crate::ingest::types::PriceHistory;
use crate::signal::rsi::relative_strength_index;

pub const OVERSOLD_BELOW: f64 = 30.0;
pub const OVERBOUGHT_ABOVE: f64 = 70.0;
pub const TOP_PER_SIDE: usize = 5;

pub fn classify(rsi: f64) -> Option<RecommendationCategory> {
    if rsi < OVERSOLD_BELOW {
        Some(RecommendationCategory::Buy)
    } else if rsi > OVERBOUGHT_ABOVE {
        Some(RecommendationCategory::Sell)
    } else {
        None
    }
}

/// Turns price histories into the recommendation feed: the most oversold
/// buys (lowest RSI first) followed by the most overbought sells (highest
/// RSI first), at most `TOP_PER_SIDE` of each.
pub fn screen(histories: &[PriceHistory], window: usize) -> Vec<StockRecommendation> {
    let mut buys = Vec::new();
    let mut sells = Vec::new();

    for history in histories {
        let Some(price) = history.last_close() else {
            tracing::debug!(symbol = %history.symbol, "no closes; skipping");
            continue;
        };
        let Some(rsi) = relative_strength_index(&history.closes, window) else {
            tracing::debug!(symbol = %history.symbol, closes = history.closes.len(), "RSI undefined; skipping");
            continue;
        };
        let Some(category) = classify(rsi) else {
            continue;
        };

        let rec = StockRecommendation {
            company: history.company.clone(),
            symbol: history.symbol.clone(),
            recommendation: category.label().to_string(),
            rsi,
            price,
        };
        match category {
            RecommendationCategory::Buy => buys.push(rec),
            RecommendationCategory::Sell => sells.push(rec),
            RecommendationCategory::Hold | RecommendationCategory::Unrated => {}
        }
    }

    buys.sort_by(|a, b| a.rsi.total_cmp(&b.rsi));
    sells.sort_by(|a, b| b.rsi.total_cmp(&a.rsi));
    buys.truncate(TOP_PER_SIDE);
    sells.truncate(TOP_PER_SIDE);

    buys.extend(sells);
    buys
}
