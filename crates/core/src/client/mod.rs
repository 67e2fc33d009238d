pub mod error;
pub mod http;

use crate::domain::recommendation::StockRecommendation;
pub use error::FetchError;

/// Anything that can produce one batch of recommendations per call.
#[async_trait::async_trait]
pub trait RecommendationSource: Send + Sync {
    fn source_name(&self) -> &str;

    async fn fetch_recommendations(&self) -> Result<Vec<StockRecommendation>, FetchError>;
}
