//! Model monitoring report (`GET /predictions/monitor`).

use serde::{Deserialize, Serialize};

use super::history::PredictionStats;
use crate::defaults;

/// Health of the model as judged by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonitorStatus {
    Healthy,
    /// Recent confidence dropped more than 5%
    Warning,
    /// Recent confidence dropped more than 10%
    Degraded,
    /// Fewer stored predictions than the recent window
    InsufficientData,
    #[serde(other)]
    Unknown,
}

impl MonitorStatus {
    /// Heading shown on the monitoring page
    pub const fn title(self) -> &'static str {
        match self {
            Self::Healthy => "Model healthy",
            Self::Warning => "Attention required",
            Self::Degraded => "Degradation detected",
            Self::InsufficientData => "Insufficient data",
            Self::Unknown => "Unknown status",
        }
    }
}

/// Recent vs historical confidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceComparison {
    /// Historical minus recent average confidence; positive means it dropped
    pub confidence_drop: f64,
    /// `confidence_drop` relative to the historical average, in percent
    pub confidence_drop_percentage: f64,
    pub recent_limit: u32,
}

/// Response of `GET /predictions/monitor`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoringReport {
    pub status: MonitorStatus,
    #[serde(default)]
    pub alert: Option<String>,
    pub historical: PredictionStats,
    pub recent: PredictionStats,
    pub comparison: ConfidenceComparison,
}

impl MonitoringReport {
    /// Whether the confidence moved by more than the alert threshold, either way.
    pub fn alert_triggered(&self) -> bool {
        self.comparison.confidence_drop_percentage.abs() > defaults::monitoring::ALERT_THRESHOLD_PCT
    }

    pub fn confidence_dropped(&self) -> bool {
        self.comparison.confidence_drop_percentage > 0.0
    }
}
