//! Request and response types of the detection service API.

pub mod history;
pub mod monitoring;
pub mod prediction;
pub mod service;
pub mod youtube;

pub use history::{PredictionFilters, PredictionPage, PredictionSource, PredictionStats, StoredPrediction};
pub use monitoring::{ConfidenceComparison, MonitorStatus, MonitoringReport};
pub use prediction::{BatchPredictRequest, PredictRequest, Prediction, ToxicityLabel};
pub use service::{ApiInfo, Experiment, ExperimentList, ExperimentRun, HealthStatus, RunMetrics};
pub use youtube::{CommentAnalysis, SortBy, VideoAnalysis, VideoAnalysisRequest};
