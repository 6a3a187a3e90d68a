//! Service metadata: health, API info and tracked training experiments.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Response of `GET /health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// `"healthy"` or `"unhealthy"`
    pub status: String,
    #[serde(default)]
    pub model_loaded: bool,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Response of `GET /`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiInfo {
    pub message: String,
    pub version: String,
    #[serde(default)]
    pub docs: Option<String>,
    #[serde(default)]
    pub health: Option<String>,
}

/// Metrics logged for a training run. Every metric is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunMetrics {
    pub f1_test: Option<f64>,
    pub f1_train: Option<f64>,
    pub accuracy_test: Option<f64>,
    pub precision_test: Option<f64>,
    pub recall_test: Option<f64>,
    /// Train/test F1 gap
    pub overfitting: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentRun {
    pub run_id: String,
    pub run_name: String,
    pub status: String,
    /// Milliseconds since the epoch
    #[serde(default)]
    pub start_time: Option<i64>,
    #[serde(default)]
    pub end_time: Option<i64>,
    #[serde(default)]
    pub metrics: RunMetrics,
    #[serde(default)]
    pub params: HashMap<String, String>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experiment {
    pub experiment_id: String,
    pub name: String,
    #[serde(default)]
    pub artifact_location: Option<String>,
    #[serde(default)]
    pub lifecycle_stage: Option<String>,
    #[serde(default)]
    pub runs_count: u64,
    /// At most the ten best runs by test F1
    #[serde(default)]
    pub runs: Vec<ExperimentRun>,
}

/// Response of `GET /api/mlflow/experiments`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperimentList {
    #[serde(default)]
    pub experiments: Vec<Experiment>,
    #[serde(default)]
    pub total_experiments: Option<u64>,
    /// Set when the service has no tracking directory yet
    #[serde(default)]
    pub message: Option<String>,
}
