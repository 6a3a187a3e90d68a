//! Command-line interface
//!
//! Each subcommand is one page of the dashboard. Connection and logging
//! options are global and can also come from `HATEWATCH_*` environment
//! variables.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use hatewatch::telemetry::{OutputFormat, parse_level};
use hatewatch::types::{PredictionSource, SortBy};

#[derive(Parser, Debug)]
#[command(name = "hatewatch")]
#[command(author, version, about = "Terminal dashboard for the hate-speech detection service")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Base URL of the detection service
    #[arg(
        long,
        global = true,
        env = "HATEWATCH_API_URL",
        default_value = hatewatch::defaults::http::BASE_URL,
        help_heading = "Connection"
    )]
    pub api_url: String,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "HATEWATCH_TIMEOUT_SECS", help_heading = "Connection")]
    pub timeout: Option<u64>,

    /// Print raw JSON instead of tables
    #[arg(long, global = true, help_heading = "Output")]
    pub json: bool,

    /// Log level: trace, debug, info, warn, error
    #[arg(
        long,
        global = true,
        env = "HATEWATCH_LOG_LEVEL",
        default_value = "warn",
        value_parser = parse_level,
        help_heading = "Logging"
    )]
    pub log_level: tracing::Level,

    /// Log format: text, json, json-compact
    #[arg(
        long,
        global = true,
        env = "HATEWATCH_LOG_FORMAT",
        default_value = "text",
        help_heading = "Logging"
    )]
    pub log_format: OutputFormat,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true, env = "HATEWATCH_LOG_FILE", help_heading = "Logging")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Classify one text
    Predict {
        /// Text to classify; words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Classify a file with one comment per line (at most 100)
    Batch {
        /// .txt or .csv file
        file: PathBuf,
    },

    /// Classify the comments of a YouTube video
    Youtube {
        /// Video URL or bare 11-character id
        url: String,

        /// Number of comments to fetch (1-500)
        #[arg(long, default_value_t = hatewatch::defaults::analysis::YOUTUBE_MAX_COMMENTS)]
        max_comments: u32,

        /// Comment order: top, time or relevance
        #[arg(long, default_value = "top")]
        sort_by: SortBy,
    },

    /// Totals over all stored predictions
    Stats,

    /// Stored predictions, newest first
    History {
        #[arg(long, default_value_t = 100)]
        limit: u32,

        #[arg(long, default_value_t = 0)]
        offset: u32,

        /// Only toxic (true) or only non-toxic (false) predictions
        #[arg(long)]
        toxic: Option<bool>,

        /// api, batch or youtube
        #[arg(long)]
        source: Option<PredictionSource>,

        #[arg(long)]
        video_id: Option<String>,
    },

    /// Check whether the service and its model are up
    Health,

    /// Model monitoring: recent vs historical confidence
    Monitor {
        /// Recent predictions to compare (50-500, step 50)
        #[arg(long, default_value_t = hatewatch::defaults::monitoring::RECENT_LIMIT)]
        recent_limit: u32,

        /// Keep refreshing every 30 seconds until Ctrl-C
        #[arg(long)]
        watch: bool,
    },

    /// Model comparison, production model card and data augmentation
    Models,

    /// Service name and version
    Info,

    /// MLflow experiments and runs
    Experiments,
}
