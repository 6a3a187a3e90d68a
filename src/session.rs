//! Per-page analysis state
//!
//! Mirrors the analysis form: an input mode, what the user typed or uploaded,
//! and the results of the last successful submission.

use crate::analysis::{AnalysisResult, ResultSummary, parse_batch_input};
use crate::defaults;
use crate::error::ClientError;
use crate::traits::DetectionCapability;
use crate::types::SortBy;
use crate::youtube::extract_video_id;

/// What the form is currently accepting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Text,
    Url,
    Batch,
}

/// Outcome of [`AnalysisSession::submit`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing to send (blank input or empty batch); state untouched
    Skipped,
    /// Results replaced; carries the number of results
    Completed(usize),
    /// The error message is set; previous results kept
    Failed,
}

#[derive(Debug, Clone, Default)]
pub struct AnalysisSession {
    mode: InputMode,
    input: String,
    batch: Vec<String>,
    analyzing: bool,
    error: Option<String>,
    results: Vec<AnalysisResult>,
}

impl AnalysisSession {
    pub fn new(mode: InputMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub const fn mode(&self) -> InputMode {
        self.mode
    }

    /// Switch input mode; clears any error message.
    pub fn set_mode(&mut self, mode: InputMode) {
        self.mode = mode;
        self.error = None;
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// Load an uploaded batch (one comment per line); clears any error message.
    pub fn load_batch(&mut self, contents: &str) -> usize {
        self.batch = parse_batch_input(contents);
        self.error = None;
        self.batch.len()
    }

    /// Replace the batch with comments that are already split; clears any
    /// error message.
    pub fn set_batch(&mut self, comments: Vec<String>) -> usize {
        self.batch = comments;
        self.error = None;
        self.batch.len()
    }

    pub fn batch(&self) -> &[String] {
        &self.batch
    }

    pub const fn is_analyzing(&self) -> bool {
        self.analyzing
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn results(&self) -> &[AnalysisResult] {
        &self.results
    }

    pub fn summary(&self) -> ResultSummary {
        ResultSummary::from_results(&self.results)
    }

    /// Whether the submit button is enabled.
    pub fn can_submit(&self) -> bool {
        if self.analyzing {
            return false;
        }
        match self.mode {
            InputMode::Batch => !self.batch.is_empty(),
            InputMode::Text | InputMode::Url => !self.input.trim().is_empty(),
        }
    }

    /// Send the current input to `detector` and store the outcome.
    pub async fn submit<D>(&mut self, detector: &D) -> SubmitOutcome
    where
        D: DetectionCapability + ?Sized,
    {
        if !self.can_submit() {
            return SubmitOutcome::Skipped;
        }
        self.error = None;
        let in_flight = InFlight::start(&mut self.analyzing);
        let outcome = Self::run(self.mode, &self.input, &self.batch, detector).await;
        drop(in_flight);

        match outcome {
            Ok(results) => {
                let count = results.len();
                tracing::debug!(mode = ?self.mode, count, "analysis completed");
                self.results = results;
                SubmitOutcome::Completed(count)
            }
            Err(err) => {
                tracing::warn!(mode = ?self.mode, error = %err, "analysis failed");
                self.error = Some(err.user_message());
                SubmitOutcome::Failed
            }
        }
    }

    async fn run<D>(
        mode: InputMode,
        input: &str,
        batch: &[String],
        detector: &D,
    ) -> Result<Vec<AnalysisResult>, ClientError>
    where
        D: DetectionCapability + ?Sized,
    {
        match mode {
            InputMode::Text => {
                let prediction = detector.analyze_text(input).await?;
                Ok(vec![AnalysisResult::from(&prediction)])
            }
            InputMode::Url => {
                let url = input.trim();
                if extract_video_id(url).is_none() {
                    return Err(ClientError::InvalidInput(
                        "Could not extract a video id from the URL".to_string(),
                    ));
                }
                let analysis = detector
                    .analyze_youtube(
                        url,
                        defaults::analysis::FORM_YOUTUBE_MAX_COMMENTS,
                        SortBy::Top,
                    )
                    .await?;
                Ok(analysis.comments.iter().map(AnalysisResult::from).collect())
            }
            InputMode::Batch => {
                if batch.len() > defaults::analysis::MAX_BATCH_SIZE {
                    return Err(ClientError::InvalidInput(format!(
                        "At most {} comments per batch, got {}",
                        defaults::analysis::MAX_BATCH_SIZE,
                        batch.len()
                    )));
                }
                let predictions = detector.analyze_batch(batch).await?;
                Ok(predictions.iter().map(AnalysisResult::from).collect())
            }
        }
    }
}

/// Holds the in-flight flag while a request runs; cleared on drop so a
/// cancelled submission does not leave the form disabled.
struct InFlight<'a>(&'a mut bool);

impl<'a> InFlight<'a> {
    fn start(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}
