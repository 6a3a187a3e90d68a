//! Capability traits
//!
//! Pages depend on these traits rather than on the concrete HTTP client, so
//! they can be driven by any implementation (the real client, a recorded
//! fixture, a test double).

use async_trait::async_trait;

use crate::error::ClientError;
use crate::types::{
    MonitoringReport, Prediction, PredictionFilters, PredictionPage, PredictionStats, SortBy,
    VideoAnalysis,
};

/// Classification of user-supplied content
#[async_trait]
pub trait DetectionCapability: Send + Sync {
    /// Classify one text.
    async fn analyze_text(&self, text: &str) -> Result<Prediction, ClientError>;

    /// Classify several texts in one request. Callers keep batches at 100 texts or fewer.
    async fn analyze_batch(&self, texts: &[String]) -> Result<Vec<Prediction>, ClientError>;

    /// Fetch and classify the comments of a YouTube video.
    async fn analyze_youtube(
        &self,
        video_url: &str,
        max_comments: u32,
        sort_by: SortBy,
    ) -> Result<VideoAnalysis, ClientError>;
}

/// Access to the predictions the service has stored
#[async_trait]
pub trait HistoryCapability: Send + Sync {
    async fn get_stats(&self) -> Result<PredictionStats, ClientError>;

    async fn get_predictions(
        &self,
        filters: &PredictionFilters,
    ) -> Result<PredictionPage, ClientError>;

    /// Compare the last `recent_limit` predictions against the whole history.
    async fn get_monitoring(&self, recent_limit: u32) -> Result<MonitoringReport, ClientError>;
}
