//! Terminal rendering
//!
//! Every page is a small `Display` wrapper over the data it shows, so the CLI
//! can `println!("{}", view)` and tests can compare plain strings.

use std::fmt;

use crate::analysis::{AnalysisResult, ResultSummary};
use crate::monitor::MonitorSnapshot;
use crate::reports::{self, ModelFamily, ModelReport, OverfittingBand};
use crate::types::{
    ApiInfo, ExperimentList, HealthStatus, MonitoringReport, PredictionPage, PredictionStats,
    VideoAnalysis,
};

/// Width of the bar area of every chart, in cells.
pub const CHART_WIDTH: usize = 40;
const TEXT_WIDTH: usize = 72;

/// A horizontal bar of `width` cells scaled so that `max` fills it.
pub fn bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let cells = ((value / max).min(1.0) * width as f64).round() as usize;
    "█".repeat(cells)
}

/// Shorten to `max` characters, ending with an ellipsis when cut.
pub fn truncate(text: &str, max: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

/// Labelled bar chart; bars share one scale.
pub struct BarChart<'a> {
    pub title: &'a str,
    pub rows: Vec<(String, f64)>,
    /// Value that fills the whole width; the largest row when `None`
    pub max: Option<f64>,
    pub precision: usize,
}

impl fmt::Display for BarChart<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        let max = self
            .max
            .unwrap_or_else(|| self.rows.iter().map(|(_, v)| *v).fold(0.0, f64::max));
        let label_width = self.rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
        for (label, value) in &self.rows {
            writeln!(
                f,
                "  {label:<label_width$} │{:<CHART_WIDTH$}│ {value:.prec$}",
                bar(*value, max, CHART_WIDTH),
                prec = self.precision
            )?;
        }
        Ok(())
    }
}

/// Result list of the analysis pages
pub struct ResultsView<'a>(pub &'a [AnalysisResult]);

impl fmt::Display for ResultsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No results yet.");
        }
        writeln!(f, "Results ({})", self.0.len())?;
        for (i, result) in self.0.iter().enumerate() {
            writeln!(
                f,
                "{:>4}. [{:<9}] {:>6}  {}",
                i + 1,
                result.badge(),
                percent(result.confidence),
                truncate(&result.text, TEXT_WIDTH)
            )?;
        }
        Ok(())
    }
}

/// Statistics panel: cards, distribution, categories and the most hateful texts
pub struct SummaryView<'a>(pub &'a ResultSummary);

impl fmt::Display for SummaryView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0;
        if s.is_empty() {
            return writeln!(f, "Nothing analyzed yet.");
        }
        writeln!(f, "Total analyzed:     {}", s.total)?;
        writeln!(
            f,
            "Hateful:            {} ({:.1}%)",
            s.hateful_count, s.hateful_percentage
        )?;
        writeln!(f, "Safe:               {}", s.safe_count)?;
        writeln!(f, "Average confidence: {}", percent(s.average_confidence))?;
        writeln!(f)?;

        let distribution = BarChart {
            title: "Distribution",
            rows: vec![
                ("Hateful".to_string(), s.hateful_count as f64),
                ("Safe".to_string(), s.safe_count as f64),
            ],
            max: Some(s.total as f64),
            precision: 0,
        };
        write!(f, "{distribution}")?;

        if s.hateful_count > 0 {
            writeln!(f)?;
            let categories = BarChart {
                title: "Categories (hateful results)",
                rows: s
                    .categories
                    .iter()
                    .map(|c| (c.category.label().to_string(), c.value))
                    .collect(),
                max: None,
                precision: 2,
            };
            write!(f, "{categories}")?;

            writeln!(f)?;
            writeln!(f, "Most hateful")?;
            for (i, top) in s.top_hateful.iter().enumerate() {
                writeln!(
                    f,
                    "{:>4}. {:>6} {:<11} {}",
                    i + 1,
                    percent(top.confidence),
                    top.principal_category.label(),
                    truncate(&top.text, TEXT_WIDTH - 10)
                )?;
            }
        }
        Ok(())
    }
}

/// Totals over everything the service has stored
pub struct StatsView<'a>(pub &'a PredictionStats);

impl fmt::Display for StatsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0;
        writeln!(f, "Total predictions:  {}", s.total_predictions)?;
        writeln!(
            f,
            "Toxic:              {} ({:.1}%)",
            s.toxic_count, s.toxic_percentage
        )?;
        writeln!(
            f,
            "Not toxic:          {} ({:.1}%)",
            s.not_toxic_count, s.not_toxic_percentage
        )?;
        writeln!(f, "Average confidence: {}", percent(s.average_confidence))
    }
}

/// Stored prediction history
pub struct HistoryView<'a>(pub &'a PredictionPage);

impl fmt::Display for HistoryView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.predictions.is_empty() {
            return writeln!(f, "No stored predictions.");
        }
        writeln!(
            f,
            "{:>6}  {:<19}  {:<9}  {:>6}  {:<7}  Text",
            "Id", "Created", "Label", "Conf.", "Source"
        )?;
        for p in &self.0.predictions {
            writeln!(
                f,
                "{:>6}  {:<19}  {:<9}  {:>6}  {:<7}  {}",
                p.id,
                p.created_at.format("%Y-%m-%d %H:%M:%S"),
                if p.is_toxic { "Toxic" } else { "Not toxic" },
                percent(p.confidence),
                p.source.as_deref().unwrap_or("-"),
                truncate(&p.text, 48)
            )?;
        }
        writeln!(f, "{} shown", self.0.count)
    }
}

/// Header of a YouTube analysis
pub struct VideoHeaderView<'a>(pub &'a VideoAnalysis);

impl fmt::Display for VideoHeaderView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        writeln!(f, "Video {} ({})", v.video_id, v.video_url)?;
        writeln!(
            f,
            "{} comments analyzed: {} toxic, {} not toxic ({:.1}% toxic)",
            v.total_comments, v.toxic_count, v.non_toxic_count, v.toxic_percentage
        )
    }
}

pub struct HealthView<'a>(pub &'a HealthStatus);

impl fmt::Display for HealthView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Status:       {}", self.0.status)?;
        writeln!(
            f,
            "Model loaded: {}",
            if self.0.model_loaded { "yes" } else { "no" }
        )
    }
}

pub struct ApiInfoView<'a>(pub &'a ApiInfo);

impl fmt::Display for ApiInfoView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} (v{})", self.0.message, self.0.version)?;
        if let Some(docs) = &self.0.docs {
            writeln!(f, "Docs:   {docs}")?;
        }
        if let Some(health) = &self.0.health {
            writeln!(f, "Health: {health}")?;
        }
        Ok(())
    }
}

/// Monitoring page
pub struct MonitoringView<'a>(pub &'a MonitoringReport);

impl fmt::Display for MonitoringView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.0;
        writeln!(f, "{}", r.status.title())?;
        if let Some(alert) = &r.alert {
            writeln!(f, "  {alert}")?;
        }
        if r.alert_triggered() {
            writeln!(
                f,
                "  ALERT: confidence changed by {:.2}% (threshold {:.0}%)",
                r.comparison.confidence_drop_percentage,
                crate::defaults::monitoring::ALERT_THRESHOLD_PCT
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:<20} {:>12} {:>14}",
            "",
            "Historical",
            format!("Last {}", r.comparison.recent_limit)
        )?;
        writeln!(
            f,
            "{:<20} {:>12} {:>14}",
            "Predictions", r.historical.total_predictions, r.recent.total_predictions
        )?;
        writeln!(
            f,
            "{:<20} {:>12} {:>14}",
            "Toxic",
            format!("{:.1}%", r.historical.toxic_percentage),
            format!("{:.1}%", r.recent.toxic_percentage)
        )?;
        writeln!(
            f,
            "{:<20} {:>12} {:>14}",
            "Average confidence",
            percent(r.historical.average_confidence),
            percent(r.recent.average_confidence)
        )?;
        writeln!(f)?;
        let direction = if r.confidence_dropped() {
            "drop"
        } else {
            "rise"
        };
        writeln!(
            f,
            "Confidence {direction}: {:.4} ({:.2}%)",
            r.comparison.confidence_drop.abs(),
            r.comparison.confidence_drop_percentage.abs()
        )
    }
}

/// One refresh of the monitoring page, including the failure case
pub struct SnapshotView<'a>(pub &'a MonitorSnapshot);

impl fmt::Display for SnapshotView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Last update: {} (window {})",
            self.0.fetched_at.format("%H:%M:%S"),
            self.0.window
        )?;
        match &self.0.outcome {
            Ok(report) => write!(f, "{}", MonitoringView(report)),
            Err(err) => writeln!(f, "Error: {}", err.user_message()),
        }
    }
}

/// MLflow experiments
pub struct ExperimentsView<'a>(pub &'a ExperimentList);

impl fmt::Display for ExperimentsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let list = self.0;
        if list.experiments.is_empty() {
            writeln!(
                f,
                "{}",
                list.message.as_deref().unwrap_or("No experiments found")
            )?;
            writeln!(f, "Run `{}`", reports::MLFLOW_COMMAND)?;
            return writeln!(f, "then open {}", reports::MLFLOW_UI_URL);
        }
        for experiment in &list.experiments {
            writeln!(
                f,
                "{} [{}] {} runs",
                experiment.name, experiment.experiment_id, experiment.runs_count
            )?;
            for run in &experiment.runs {
                let m = &run.metrics;
                writeln!(
                    f,
                    "  {:<28} {:<9} f1={} acc={} overfit={}",
                    truncate(&run.run_name, 28),
                    run.status,
                    metric(m.f1_test),
                    metric(m.accuracy_test),
                    m.overfitting
                        .map_or_else(|| "-".to_string(), |v| format!("{v:.2}%"))
                )?;
            }
        }
        Ok(())
    }
}

fn metric(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.4}"))
}

/// Model comparison page
pub struct ModelComparisonView;

impl ModelComparisonView {
    fn table(f: &mut fmt::Formatter<'_>, family: ModelFamily) -> fmt::Result {
        writeln!(f, "{}", family.heading())?;
        writeln!(
            f,
            "  {:<20} {:>7} {:>8} {:>9} {:>7} {:>9}  Status",
            "Model", "F1 Test", "Accuracy", "Precision", "Recall", "Overfit"
        )?;
        let models: Vec<&ModelReport> = reports::models_in(family).collect();
        for m in &models {
            writeln!(
                f,
                "  {:<20} {:>7.4} {:>8.4} {:>9.4} {:>7.4} {:>8.2}%  {}",
                m.name,
                m.f1_test,
                m.accuracy,
                m.precision,
                m.recall,
                m.overfitting,
                m.status.label()
            )?;
            if let Some(params) = m.params {
                writeln!(f, "    params: {params}")?;
            }
            if let Some(note) = m.note {
                writeln!(f, "    {note}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for ModelComparisonView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Model comparison")?;
        for (stage, detail) in reports::DEVELOPMENT_PROCESS {
            writeln!(f, "  {stage}: {detail}")?;
        }
        writeln!(f)?;

        let f1 = BarChart {
            title: "F1-score: test vs train",
            rows: reports::MODELS
                .iter()
                .flat_map(|m| {
                    [
                        (format!("{} test", m.name), m.f1_test),
                        (format!("{} train", m.name), m.f1_train),
                    ]
                })
                .collect(),
            max: Some(1.0),
            precision: 4,
        };
        writeln!(f, "{f1}")?;

        let overfitting = BarChart {
            title: "Overfitting (%)",
            rows: reports::MODELS
                .iter()
                .map(|m| (m.name.to_string(), m.overfitting))
                .collect(),
            max: None,
            precision: 2,
        };
        write!(f, "{overfitting}")?;
        for band in [
            OverfittingBand::Optimal,
            OverfittingBand::Acceptable,
            OverfittingBand::High,
        ] {
            writeln!(f, "  * {}", band.label())?;
        }
        writeln!(f)?;

        for family in ModelFamily::ALL {
            Self::table(f, family)?;
            writeln!(f)?;
        }

        writeln!(f, "Why DistilBERT is not used ({}):", reports::TRANSFORMER_SIZE)?;
        for reason in reports::TRANSFORMER_REJECTION_REASONS {
            writeln!(f, "  x {reason}")?;
        }
        writeln!(f)?;

        writeln!(
            f,
            "Selected for production: {}",
            reports::production_model().name
        )?;
        for point in reports::CONCLUSION {
            writeln!(f, "  + {point}")?;
        }
        Ok(())
    }
}

/// Production model card
pub struct ModelCardView;

impl fmt::Display for ModelCardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let card = &reports::MODEL_CARD;
        writeln!(f, "Model: {}", card.name)?;
        writeln!(f, "  {}", card.description)?;
        writeln!(f, "Metrics")?;
        writeln!(f, "  F1-score:    {}", card.f1_score)?;
        writeln!(f, "  Overfitting: {}%", card.overfitting)?;
        writeln!(f, "  Accuracy:    {}", card.accuracy)?;
        writeln!(f, "Vectorizer: {}", card.vectorizer)?;
        writeln!(f, "Limitations: {}", card.limitations)
    }
}

pub struct AugmentationView;

impl fmt::Display for AugmentationView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Data augmentation")?;
        for technique in reports::AUGMENTATION_TECHNIQUES {
            writeln!(f, "  {}: {}", technique.name, technique.description)?;
        }
        Ok(())
    }
}
