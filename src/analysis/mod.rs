//! Client-side view models
//!
//! Predictions from every endpoint are converted into one display shape,
//! [`AnalysisResult`], which the result list and the statistics panel consume.

pub mod batch_input;
pub mod result;
pub mod summary;

pub use batch_input::{parse_batch_file, parse_batch_input};
pub use result::{AnalysisResult, CategoryScores, ToxicityCategory};
pub use summary::{CategoryTotal, ResultSummary, TopResult};
