//! Stored predictions and their aggregate statistics.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::prediction::ToxicityLabel;
use crate::error::ClientError;

/// Where a stored prediction came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionSource {
    /// `/predict`
    Api,
    /// `/predict/batch`
    Batch,
    /// `/analyze/youtube`
    Youtube,
}

impl PredictionSource {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::Batch => "batch",
            Self::Youtube => "youtube",
        }
    }
}

impl fmt::Display for PredictionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PredictionSource {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "api" => Ok(Self::Api),
            "batch" => Ok(Self::Batch),
            "youtube" => Ok(Self::Youtube),
            other => Err(ClientError::InvalidInput(format!(
                "Unknown source '{other}'. Valid options: api, batch, youtube"
            ))),
        }
    }
}

/// Query filters of `GET /predictions`. Unset fields are left to the service defaults
/// (limit 100, offset 0, no filtering).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_toxic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PredictionSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
}

impl PredictionFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub const fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub const fn toxic(mut self, is_toxic: bool) -> Self {
        self.is_toxic = Some(is_toxic);
        self
    }

    pub const fn source(mut self, source: PredictionSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn video_id<S: Into<String>>(mut self, video_id: S) -> Self {
        self.video_id = Some(video_id.into());
        self
    }

    /// Query pairs for the present filters, in a stable order.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            query.push(("offset", offset.to_string()));
        }
        if let Some(is_toxic) = self.is_toxic {
            query.push(("is_toxic", is_toxic.to_string()));
        }
        if let Some(source) = self.source {
            query.push(("source", source.as_str().to_string()));
        }
        if let Some(video_id) = &self.video_id {
            query.push(("video_id", video_id.clone()));
        }
        query
    }
}

/// A prediction persisted by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredPrediction {
    pub id: u64,
    pub text: String,
    pub is_toxic: bool,
    #[serde(default)]
    pub toxicity_label: ToxicityLabel,
    pub probability_toxic: f64,
    #[serde(default)]
    pub probability_not_toxic: f64,
    pub confidence: f64,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub video_id: Option<String>,
    /// UTC, without offset
    pub created_at: NaiveDateTime,
}

/// Response of `GET /predictions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionPage {
    pub predictions: Vec<StoredPrediction>,
    pub count: u64,
}

/// Response of `GET /predictions/stats`, also used for both sides of the monitoring report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionStats {
    pub total_predictions: u64,
    pub toxic_count: u64,
    pub not_toxic_count: u64,
    pub toxic_percentage: f64,
    pub not_toxic_percentage: f64,
    pub average_confidence: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn only_present_filters_become_query_pairs() {
        assert!(PredictionFilters::new().to_query().is_empty());

        let filters = PredictionFilters::new()
            .limit(20)
            .toxic(true)
            .source(PredictionSource::Youtube)
            .video_id("dQw4w9WgXcQ");
        assert_eq!(
            filters.to_query(),
            vec![
                ("limit", "20".to_string()),
                ("is_toxic", "true".to_string()),
                ("source", "youtube".to_string()),
                ("video_id", "dQw4w9WgXcQ".to_string()),
            ]
        );
    }

    #[test]
    fn decodes_stored_prediction_page() {
        let page: PredictionPage = serde_json::from_value(json!({
            "predictions": [{
                "id": 7,
                "text": "hello",
                "is_toxic": false,
                "toxicity_label": "Not Toxic",
                "probability_toxic": 0.2,
                "probability_not_toxic": 0.8,
                "confidence": 0.8,
                "source": "api",
                "video_id": null,
                "created_at": "2025-11-02T10:15:30.123456"
            }],
            "count": 1
        }))
        .unwrap();
        assert_eq!(page.count, 1);
        assert_eq!(page.predictions[0].source.as_deref(), Some("api"));
        assert_eq!(page.predictions[0].created_at.to_string(), "2025-11-02 10:15:30.123456");
    }

    #[test]
    fn stats_accept_integer_percentages() {
        let stats: PredictionStats = serde_json::from_value(json!({
            "total_predictions": 0,
            "toxic_count": 0,
            "not_toxic_count": 0,
            "toxic_percentage": 0,
            "not_toxic_percentage": 0,
            "average_confidence": 0.0
        }))
        .unwrap();
        assert_eq!(stats, PredictionStats::default());
    }
}
