//! Single and batch predictions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Body of `POST /predict`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictRequest {
    pub text: String,
}

/// Body of `POST /predict/batch`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchPredictRequest {
    pub texts: Vec<String>,
}

/// Label attached to a prediction.
///
/// The service sends `"Toxic"` or `"Not Toxic"`; anything else is kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ToxicityLabel {
    Toxic,
    #[default]
    NotToxic,
    Other(String),
}

impl ToxicityLabel {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Toxic => "Toxic",
            Self::NotToxic => "Not Toxic",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for ToxicityLabel {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Toxic" => Self::Toxic,
            "Not Toxic" => Self::NotToxic,
            _ => Self::Other(value),
        }
    }
}

impl From<ToxicityLabel> for String {
    fn from(label: ToxicityLabel) -> Self {
        match label {
            ToxicityLabel::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for ToxicityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of one text, as returned by `/predict` and `/predict/batch`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// The text as the service received it
    pub text: String,
    pub is_toxic: bool,
    #[serde(default)]
    pub toxicity_label: ToxicityLabel,
    /// Probability of being toxic (0-1)
    pub probability_toxic: f64,
    /// Probability of not being toxic (0-1)
    #[serde(default)]
    pub probability_not_toxic: f64,
    /// Confidence of the predicted label (0-1)
    #[serde(default)]
    pub confidence: f64,
}
