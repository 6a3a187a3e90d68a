//! Display shape of one analyzed text.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{CommentAnalysis, Prediction};

/// Fine-grained categories the result panels know about.
///
/// The deployed model only scores `Toxic`; the others stay at zero until a
/// multi-label model is served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToxicityCategory {
    Toxic,
    SevereToxic,
    Obscene,
    Threat,
    Insult,
    IdentityHate,
}

impl ToxicityCategory {
    /// Display order
    pub const ALL: [Self; 6] = [
        Self::Toxic,
        Self::SevereToxic,
        Self::Obscene,
        Self::Threat,
        Self::Insult,
        Self::IdentityHate,
    ];

    /// Wire/field name
    pub const fn key(self) -> &'static str {
        match self {
            Self::Toxic => "toxic",
            Self::SevereToxic => "severe_toxic",
            Self::Obscene => "obscene",
            Self::Threat => "threat",
            Self::Insult => "insult",
            Self::IdentityHate => "identity_hate",
        }
    }

    /// Short label used on chart axes
    pub const fn label(self) -> &'static str {
        match self {
            Self::Toxic => "Toxic",
            Self::SevereToxic => "Sev. toxic",
            Self::Obscene => "Obscene",
            Self::Threat => "Threat",
            Self::Insult => "Insult",
            Self::IdentityHate => "Ident. hate",
        }
    }
}

impl fmt::Display for ToxicityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Per-category scores (0-1)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub toxic: f64,
    pub severe_toxic: f64,
    pub obscene: f64,
    pub threat: f64,
    pub insult: f64,
    pub identity_hate: f64,
}

impl CategoryScores {
    /// Scores as the single-label model provides them.
    pub fn from_toxic_probability(probability_toxic: f64) -> Self {
        Self {
            toxic: probability_toxic,
            ..Self::default()
        }
    }

    pub const fn get(&self, category: ToxicityCategory) -> f64 {
        match category {
            ToxicityCategory::Toxic => self.toxic,
            ToxicityCategory::SevereToxic => self.severe_toxic,
            ToxicityCategory::Obscene => self.obscene,
            ToxicityCategory::Threat => self.threat,
            ToxicityCategory::Insult => self.insult,
            ToxicityCategory::IdentityHate => self.identity_hate,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ToxicityCategory, f64)> + '_ {
        ToxicityCategory::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    /// Highest-scoring category; the earliest in display order wins ties.
    pub fn principal(&self) -> ToxicityCategory {
        let mut best = ToxicityCategory::Toxic;
        let mut best_score = self.get(best);
        for (category, score) in self.iter().skip(1) {
            if score > best_score {
                best = category;
                best_score = score;
            }
        }
        best
    }
}

/// One analyzed text as the result list shows it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub text: String,
    pub is_hateful: bool,
    /// Model confidence, or the toxic probability when the service reported none
    pub confidence: f64,
    pub categories: CategoryScores,
}

impl AnalysisResult {
    fn new(text: &str, is_toxic: bool, confidence: f64, probability_toxic: f64) -> Self {
        let confidence = if confidence != 0.0 {
            confidence
        } else {
            probability_toxic
        };
        Self {
            text: text.to_string(),
            is_hateful: is_toxic,
            confidence,
            categories: CategoryScores::from_toxic_probability(probability_toxic),
        }
    }

    /// "Toxic" / "Not toxic" badge text
    pub const fn badge(&self) -> &'static str {
        if self.is_hateful { "Toxic" } else { "Not toxic" }
    }
}

impl From<&Prediction> for AnalysisResult {
    fn from(p: &Prediction) -> Self {
        Self::new(&p.text, p.is_toxic, p.confidence, p.probability_toxic)
    }
}

impl From<&CommentAnalysis> for AnalysisResult {
    fn from(c: &CommentAnalysis) -> Self {
        Self::new(&c.text, c.is_toxic, c.confidence, c.probability_toxic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ToxicityLabel;

    fn prediction(confidence: f64, probability_toxic: f64) -> Prediction {
        Prediction {
            text: "some text".into(),
            is_toxic: probability_toxic > 0.5,
            toxicity_label: ToxicityLabel::Toxic,
            probability_toxic,
            probability_not_toxic: 1.0 - probability_toxic,
            confidence,
        }
    }

    #[test]
    fn converts_prediction() {
        let result = AnalysisResult::from(&prediction(0.9, 0.9));
        assert!(result.is_hateful);
        assert_eq!(result.confidence, 0.9);
        assert_eq!(result.categories.toxic, 0.9);
        assert_eq!(result.categories.insult, 0.0);
        assert_eq!(result.badge(), "Toxic");
    }

    #[test]
    fn zero_confidence_falls_back_to_toxic_probability() {
        let result = AnalysisResult::from(&prediction(0.0, 0.7));
        assert_eq!(result.confidence, 0.7);
        let result = AnalysisResult::from(&prediction(0.0, 0.0));
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn principal_category_prefers_first_on_ties() {
        assert_eq!(CategoryScores::default().principal(), ToxicityCategory::Toxic);
        let scores = CategoryScores {
            toxic: 0.2,
            threat: 0.6,
            insult: 0.6,
            ..CategoryScores::default()
        };
        assert_eq!(scores.principal(), ToxicityCategory::Threat);
    }
}
