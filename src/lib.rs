//! # Hatewatch - client and terminal dashboard for a hate-speech detection service
//!
//! The detection service classifies comments as toxic or not toxic, analyzes
//! the comments of YouTube videos and keeps a history of its predictions.
//! This crate wraps its REST API in a typed async client and provides the
//! pieces of a dashboard on top: per-page session state, result summaries,
//! model monitoring and the model-comparison reports.
//!
#![deny(unsafe_code)]

//! ## Quick Start
//!
//! ```rust,no_run
//! use hatewatch::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ClientError> {
//!     let client = HateSpeechClient::with_base_url("http://localhost:8000")?;
//!
//!     let prediction = client.analyze_text("You are wonderful").await?;
//!     println!("toxic: {} ({:.2})", prediction.is_toxic, prediction.confidence);
//!
//!     let video = client
//!         .analyze_youtube("https://youtu.be/dQw4w9WgXcQ", 50, SortBy::Top)
//!         .await?;
//!     println!("{:.1}% toxic", video.toxic_percentage);
//!     Ok(())
//! }
//! ```
//!
//! ## Pages
//!
//! Pages are written against [`traits::DetectionCapability`] and
//! [`traits::HistoryCapability`], not against the HTTP client:
//!
//! ```rust,no_run
//! use hatewatch::prelude::*;
//!
//! # async fn run(client: &HateSpeechClient) {
//! let mut session = AnalysisSession::new(InputMode::Batch);
//! session.load_batch("first comment\nsecond comment\n");
//! session.submit(client).await;
//! println!("{}", render::SummaryView(&session.summary()));
//! # }
//! ```

pub mod analysis;
pub mod client;
pub mod config;
pub mod defaults;
pub mod error;
pub mod http;
pub mod monitor;
pub mod render;
pub mod reports;
pub mod session;
pub mod telemetry;
pub mod traits;
pub mod types;
pub mod youtube;

pub use client::HateSpeechClient;
pub use config::{ClientConfig, HttpConfig};
pub use error::{ClientError, Result};

pub mod prelude {
    pub use crate::analysis::{AnalysisResult, ResultSummary, parse_batch_file, parse_batch_input};
    pub use crate::client::HateSpeechClient;
    pub use crate::config::{ClientConfig, HttpConfig};
    pub use crate::error::ClientError;
    pub use crate::monitor::{MonitorPoller, MonitorSnapshot, RecentWindow};
    pub use crate::render;
    pub use crate::session::{AnalysisSession, InputMode, SubmitOutcome};
    pub use crate::traits::{DetectionCapability, HistoryCapability};
    pub use crate::types::{
        HealthStatus, MonitorStatus, MonitoringReport, Prediction, PredictionFilters,
        PredictionSource, PredictionStats, SortBy, StoredPrediction, VideoAnalysis,
    };
    pub use crate::youtube::extract_video_id;
}
