use crate::model::{AnalysisResponse, RequestError, SearchForm};
use serde_json::Value;

/// The three endpoints of the search backend.
///
/// Listing endpoints hand back the raw JSON body because it comes in two shapes
/// (see `normalizer::normalize_listings`).
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    async fn search(&self, form: &SearchForm) -> Result<Value, RequestError>;
    async fn scrape_location(&self, location: &str) -> Result<Value, RequestError>;
    async fn price_analysis(&self, title: &str) -> Result<AnalysisResponse, RequestError>;
}
