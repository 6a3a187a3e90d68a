//! Model-comparison reports
//!
//! Numbers recorded when the models were trained. Nothing here is fetched from
//! the service.

use serde::Serialize;
use std::fmt;

/// Stage of the development process a model belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelFamily {
    Baseline,
    Optimized,
    Ensemble,
    Transformer,
}

impl ModelFamily {
    pub const ALL: [Self; 4] = [
        Self::Baseline,
        Self::Optimized,
        Self::Ensemble,
        Self::Transformer,
    ];

    /// Section heading
    pub const fn heading(self) -> &'static str {
        match self {
            Self::Baseline => "Baseline models (TF-IDF)",
            Self::Optimized => "Optimized models (Optuna)",
            Self::Ensemble => "Ensemble models",
            Self::Transformer => "DistilBERT (Transformer)",
        }
    }
}

impl fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Baseline => "Baseline",
            Self::Optimized => "Optimized",
            Self::Ensemble => "Ensemble",
            Self::Transformer => "Transformer",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Optimal,
    HighOverfitting,
}

impl ReportStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Optimal => "Selected",
            Self::HighOverfitting => "High overfitting",
        }
    }
}

/// How an overfitting gap (train F1 minus test F1, in percent) is judged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverfittingBand {
    Optimal,
    Acceptable,
    High,
}

impl OverfittingBand {
    pub fn classify(overfitting_pct: f64) -> Self {
        if overfitting_pct < 5.0 {
            Self::Optimal
        } else if overfitting_pct < 10.0 {
            Self::Acceptable
        } else {
            Self::High
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Optimal => "Overfitting < 5% (optimal)",
            Self::Acceptable => "Overfitting 5-10% (acceptable)",
            Self::High => "Overfitting > 10% (high)",
        }
    }
}

/// One trained model and its evaluation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelReport {
    pub name: &'static str,
    pub family: ModelFamily,
    pub vectorizer: &'static str,
    pub f1_test: f64,
    pub f1_train: f64,
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    /// Percent
    pub overfitting: f64,
    pub status: ReportStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
}

impl ModelReport {
    pub fn overfitting_band(&self) -> OverfittingBand {
        OverfittingBand::classify(self.overfitting)
    }
}

const fn baseline(
    name: &'static str,
    f1_test: f64,
    f1_train: f64,
    accuracy: f64,
    precision: f64,
    recall: f64,
    overfitting: f64,
) -> ModelReport {
    ModelReport {
        name,
        family: ModelFamily::Baseline,
        vectorizer: "TF-IDF",
        f1_test,
        f1_train,
        accuracy,
        precision,
        recall,
        overfitting,
        status: ReportStatus::HighOverfitting,
        params: None,
        note: None,
    }
}

pub static MODELS: [ModelReport; 8] = [
    baseline("Naive Bayes", 0.6310, 0.8691, 0.6900, 0.6974, 0.5761, 23.81),
    baseline("Logistic Regression", 0.7200, 0.8880, 0.7550, 0.7590, 0.6848, 16.80),
    baseline("SVM", 0.7263, 0.9113, 0.7550, 0.7471, 0.7065, 18.50),
    baseline("Random Forest", 0.6275, 0.8400, 0.7150, 0.7869, 0.5217, 21.25),
    ModelReport {
        name: "SVM (Optimized)",
        family: ModelFamily::Optimized,
        vectorizer: "TF-IDF",
        f1_test: 0.6866,
        f1_train: 0.7119,
        accuracy: 0.58,
        precision: 0.5227,
        recall: 1.0,
        overfitting: 2.54,
        status: ReportStatus::Optimal,
        params: Some("C=0.056, kernel=linear"),
        note: Some("Selected for production (optimized threshold: 0.466)"),
    },
    ModelReport {
        name: "Voting Classifier",
        family: ModelFamily::Ensemble,
        vectorizer: "TF-IDF",
        f1_test: 0.4651,
        f1_train: 0.7455,
        accuracy: 0.6550,
        precision: 0.8108,
        recall: 0.3261,
        overfitting: 28.04,
        status: ReportStatus::HighOverfitting,
        params: None,
        note: Some("No improvement over the single model"),
    },
    ModelReport {
        name: "Stacking Classifier",
        family: ModelFamily::Ensemble,
        vectorizer: "TF-IDF",
        f1_test: 0.6784,
        f1_train: 0.8399,
        accuracy: 0.7250,
        precision: 0.7342,
        recall: 0.6304,
        overfitting: 16.15,
        status: ReportStatus::HighOverfitting,
        params: None,
        note: Some("Improves but overfitting stays high"),
    },
    ModelReport {
        name: "DistilBERT",
        family: ModelFamily::Transformer,
        vectorizer: "BERT Tokenizer",
        f1_test: 0.7027,
        f1_train: 0.9468,
        accuracy: 0.7350,
        precision: 0.7027,
        recall: 0.7027,
        overfitting: 24.41,
        status: ReportStatus::HighOverfitting,
        params: None,
        note: Some("Misses the overfitting target of < 6%"),
    },
];

pub const TRANSFORMER_SIZE: &str = "255 MB";

pub const TRANSFORMER_REJECTION_REASONS: [&str; 5] = [
    "Very high overfitting (24.41% > 6%)",
    "Dataset too small (1000 examples) for transformers",
    "Much longer training time",
    "Very heavy model (255MB)",
    "The optimized SVM is more efficient and meets the targets",
];

/// Why the optimized SVM went to production
pub const CONCLUSION: [&str; 6] = [
    "Low overfitting (2.54% < 5%), meets the target",
    "Acceptable F1-score (0.6866 > 0.55), meets the target",
    "Light and fast model for production",
    "Optimized threshold (0.466) improves the precision-recall balance",
    "Better than the ensembles (no significant improvement)",
    "Better than DistilBERT (very high overfitting, heavy model)",
];

/// (stage, what was done)
pub const DEVELOPMENT_PROCESS: [(&str, &str); 4] = [
    ("1. Baseline", "4 classic models with TF-IDF"),
    ("2. Optimization", "Optuna to reduce overfitting"),
    ("3. Ensemble", "Voting and Stacking"),
    ("4. Transformers", "DistilBERT evaluated"),
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AugmentationTechnique {
    pub name: &'static str,
    pub description: &'static str,
}

pub const AUGMENTATION_TECHNIQUES: [AugmentationTechnique; 3] = [
    AugmentationTechnique {
        name: "Synonym replacement",
        description: "Words swapped for WordNet synonyms",
    },
    AugmentationTechnique {
        name: "Back-translation",
        description: "Translated to Spanish ('es') and back to English",
    },
    AugmentationTechnique {
        name: "Combined",
        description: "Synonym replacement and back-translation together",
    },
];

/// Summary card of the model in production
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelCard {
    pub name: &'static str,
    pub description: &'static str,
    pub f1_score: f64,
    /// Percent
    pub overfitting: f64,
    pub accuracy: f64,
    pub vectorizer: &'static str,
    pub limitations: &'static str,
}

pub const MODEL_CARD: ModelCard = ModelCard {
    name: "SVM Optimized",
    description: "Support Vector Machine (SVM) tuned with Optuna for hate speech detection.",
    f1_score: 0.6866,
    overfitting: 2.54,
    accuracy: 0.58,
    vectorizer: "TF-IDF with a vocabulary of 1000 words",
    limitations: "The model is trained on English data. Results may be less accurate for other languages.",
};

pub const MLFLOW_COMMAND: &str = "cd backend && mlflow ui";
pub const MLFLOW_UI_URL: &str = "http://localhost:5000";

pub fn models_in(family: ModelFamily) -> impl Iterator<Item = &'static ModelReport> {
    MODELS.iter().filter(move |m| m.family == family)
}

/// The model marked for production.
pub fn production_model() -> &'static ModelReport {
    MODELS
        .iter()
        .find(|m| m.status == ReportStatus::Optimal)
        .unwrap_or(&MODELS[4])
}
