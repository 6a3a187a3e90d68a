//! Aggregates shown by the statistics panel.

use serde::Serialize;

use super::result::{AnalysisResult, ToxicityCategory};
use crate::defaults;

/// Summed score of one category over the hateful results
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: ToxicityCategory,
    pub value: f64,
}

/// One entry of the "most hateful comments" list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopResult {
    pub text: String,
    pub confidence: f64,
    pub principal_category: ToxicityCategory,
}

/// Statistics over the results currently on screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultSummary {
    pub total: usize,
    pub hateful_count: usize,
    pub safe_count: usize,
    /// 0-100
    pub hateful_percentage: f64,
    /// 0-1
    pub average_confidence: f64,
    pub categories: Vec<CategoryTotal>,
    /// Hateful results by confidence, highest first
    pub top_hateful: Vec<TopResult>,
}

impl ResultSummary {
    pub fn from_results(results: &[AnalysisResult]) -> Self {
        let total = results.len();
        let hateful: Vec<&AnalysisResult> = results.iter().filter(|r| r.is_hateful).collect();
        let hateful_count = hateful.len();

        let (hateful_percentage, average_confidence) = if total == 0 {
            (0.0, 0.0)
        } else {
            let confidence_sum: f64 = results.iter().map(|r| r.confidence).sum();
            (
                hateful_count as f64 / total as f64 * 100.0,
                confidence_sum / total as f64,
            )
        };

        let categories = ToxicityCategory::ALL
            .into_iter()
            .map(|category| CategoryTotal {
                category,
                value: hateful.iter().map(|r| r.categories.get(category)).sum(),
            })
            .collect();

        let mut ranked = hateful;
        // Stable: equal confidences keep their input order.
        ranked.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        let top_hateful = ranked
            .into_iter()
            .take(defaults::analysis::TOP_HATEFUL)
            .map(|r| TopResult {
                text: r.text.clone(),
                confidence: r.confidence,
                principal_category: r.categories.principal(),
            })
            .collect();

        Self {
            total,
            hateful_count,
            safe_count: total - hateful_count,
            hateful_percentage,
            average_confidence,
            categories,
            top_hateful,
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.total == 0
    }
}
