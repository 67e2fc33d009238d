use crate::domain::recommendation::StockRecommendation;
use crate::view::region::{Block, DisplayRegion};
use rust_decimal::{Decimal, RoundingStrategy};

pub const PLACEHOLDER_TEXT: &str = "No recommendations available.";

const BLOCK_CLASS: &str = "recommendation";
const BORDER_CLASS: &str = "border";

/// Replaces the region's content with one block per record, in input order.
pub fn render(region: &mut DisplayRegion, results: &[StockRecommendation]) {
    region.clear();
    if results.is_empty() {
        region.set_text(PLACEHOLDER_TEXT);
        return;
    }

    for rec in results {
        region.append(block_for(rec));
    }
}

fn block_for(rec: &StockRecommendation) -> Block {
    Block {
        classes: vec![BLOCK_CLASS, rec.category().style_token(), BORDER_CLASS],
        heading: format!("{} ({})", rec.company, rec.symbol),
        lines: vec![
            format!("Recommendation: {}", rec.recommendation),
            format!("RSI: {}", fixed_2(rec.rsi)),
            format!("Price: ${}", fixed_2(rec.price)),
        ],
    }
}

/// Two-decimal text of the exact binary value, ties rounded away from zero.
/// `{:.2}` alone would send ties such as 12.625 to the even digit.
pub fn fixed_2(value: f64) -> String {
    match Decimal::from_f64_retain(value) {
        Some(d) => format!(
            "{:.2}",
            d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        ),
        None => format!("{value:.2}"),
    }
}
