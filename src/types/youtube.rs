//! YouTube video analysis.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::prediction::ToxicityLabel;
use crate::error::ClientError;

/// Order in which the backend fetches comments
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Top,
    Time,
    Relevance,
}

impl SortBy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Time => "time",
            Self::Relevance => "relevance",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "top" => Ok(Self::Top),
            "time" => Ok(Self::Time),
            "relevance" => Ok(Self::Relevance),
            other => Err(ClientError::InvalidInput(format!(
                "Unknown sort order '{other}'. Valid options: top, time, relevance"
            ))),
        }
    }
}

/// Body of `POST /analyze/youtube`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoAnalysisRequest {
    pub video_url: String,
    pub max_comments: u32,
    pub sort_by: SortBy,
}

/// One analyzed comment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentAnalysis {
    #[serde(default)]
    pub comment_id: String,
    pub text: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub likes: u64,
    /// Relative publication time as YouTube shows it ("2 days ago")
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub reply_count: u64,
    pub is_toxic: bool,
    #[serde(default)]
    pub toxicity_label: ToxicityLabel,
    pub probability_toxic: f64,
    #[serde(default)]
    pub confidence: f64,
}

/// Response of `POST /analyze/youtube`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoAnalysis {
    pub video_id: String,
    pub video_url: String,
    pub total_comments: u64,
    pub toxic_count: u64,
    pub non_toxic_count: u64,
    /// Already in percent, rounded to two decimals by the service
    pub toxic_percentage: f64,
    #[serde(default)]
    pub comments: Vec<CommentAnalysis>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sort_by_parses_and_serializes() {
        assert_eq!("Relevance".parse::<SortBy>().unwrap(), SortBy::Relevance);
        assert!("newest".parse::<SortBy>().is_err());
        let request = VideoAnalysisRequest {
            video_url: "https://youtu.be/dQw4w9WgXcQ".into(),
            max_comments: 20,
            sort_by: SortBy::default(),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"video_url": "https://youtu.be/dQw4w9WgXcQ", "max_comments": 20, "sort_by": "top"})
        );
    }

    #[test]
    fn decodes_video_analysis() {
        let analysis: VideoAnalysis = serde_json::from_value(json!({
            "video_id": "dQw4w9WgXcQ",
            "video_url": "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "total_comments": 2,
            "toxic_count": 1,
            "non_toxic_count": 1,
            "toxic_percentage": 50.0,
            "comments": [{
                "comment_id": "Ugx1",
                "text": "you are an idiot",
                "author": "@someone",
                "likes": 3,
                "time": "1 day ago",
                "reply_count": 0,
                "is_toxic": true,
                "toxicity_label": "Toxic",
                "probability_toxic": 0.91,
                "confidence": 0.91
            }]
        }))
        .unwrap();
        assert_eq!(analysis.comments.len(), 1);
        assert_eq!(analysis.comments[0].toxicity_label, ToxicityLabel::Toxic);
        assert_eq!(analysis.toxic_percentage, 50.0);
    }
}
