//! Detection service client
//!
//! A thin typed wrapper over the REST API: one request per call, JSON in and
//! out, no retries and no caching. Non-success responses are normalized by
//! [`classify_http_error`](crate::http::classify_http_error), which prefers the
//! backend `detail` message over the operation's generic one.

use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::http::{HttpHeaderBuilder, classify_http_error};
use crate::traits::{DetectionCapability, HistoryCapability};
use crate::types::{
    ApiInfo, BatchPredictRequest, ExperimentList, HealthStatus, MonitoringReport, PredictRequest,
    Prediction, PredictionFilters, PredictionPage, PredictionStats, SortBy, VideoAnalysis,
    VideoAnalysisRequest,
};

/// Generic messages used when the service gives no `detail`.
pub mod messages {
    pub const ANALYZE_TEXT: &str = "Failed to analyze the text";
    pub const ANALYZE_BATCH: &str = "Failed to analyze the texts";
    pub const ANALYZE_YOUTUBE: &str = "Failed to analyze the YouTube video";
    pub const GET_STATS: &str = "Failed to fetch statistics";
    pub const GET_PREDICTIONS: &str = "Failed to fetch predictions";
    pub const GET_MONITORING: &str = "Failed to fetch monitoring data";
    pub const API_INFO: &str = "Failed to fetch API information";
    pub const LIST_EXPERIMENTS: &str = "Failed to fetch MLflow experiments";
    /// Every health-check failure reports this, whatever the cause.
    pub const API_UNAVAILABLE: &str = "The API is not available";
    pub const EMPTY_TEXT: &str = "Text cannot be empty";
    pub const INVALID_RESPONSE: &str = "Invalid response from server";
}

/// Client for the hate-speech detection service
#[derive(Clone, Debug)]
pub struct HateSpeechClient {
    config: ClientConfig,
    http_client: reqwest::Client,
}

impl HateSpeechClient {
    /// Build a client (and its connection pool) from a configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let headers = HttpHeaderBuilder::new()
            .with_json_content_type()
            .with_custom_headers(&config.http.headers)?;
        let headers = match &config.http.user_agent {
            Some(ua) => headers.with_user_agent(ua)?,
            None => headers,
        }
        .build();

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.http.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.http.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        let http_client = builder.build().map_err(|e| {
            ClientError::ConfigurationError(format!("Failed to build HTTP client: {e}"))
        })?;

        Ok(Self::with_http_client(config, http_client))
    }

    /// Use a caller-provided `reqwest::Client`. Its own default headers and timeouts apply.
    pub fn with_http_client(config: ClientConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    /// Default configuration pointed at `base_url`.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        Self::new(ClientConfig::new(base_url)?)
    }

    /// Configuration from `HATEWATCH_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// `POST /predict`
    ///
    /// The text is trimmed first; an empty text is rejected without a request.
    pub async fn analyze_text(&self, text: &str) -> Result<Prediction> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ClientError::InvalidInput(messages::EMPTY_TEXT.to_string()));
        }
        tracing::debug!(chars = text.chars().count(), "sending text for analysis");
        let prediction: Prediction = self
            .post_json(
                "/predict",
                &PredictRequest {
                    text: text.to_string(),
                },
                messages::ANALYZE_TEXT,
            )
            .await?;
        tracing::debug!(
            is_toxic = prediction.is_toxic,
            confidence = prediction.confidence,
            "text analyzed"
        );
        Ok(prediction)
    }

    /// `POST /predict/batch`
    ///
    /// Sends `texts` as-is; the 100-text cap belongs to the caller.
    pub async fn analyze_batch(&self, texts: &[String]) -> Result<Vec<Prediction>> {
        tracing::debug!(count = texts.len(), "sending batch for analysis");
        self.post_json(
            "/predict/batch",
            &BatchPredictRequest {
                texts: texts.to_vec(),
            },
            messages::ANALYZE_BATCH,
        )
        .await
    }

    /// `POST /analyze/youtube`
    pub async fn analyze_youtube(
        &self,
        video_url: &str,
        max_comments: u32,
        sort_by: SortBy,
    ) -> Result<VideoAnalysis> {
        self.analyze_video(&VideoAnalysisRequest {
            video_url: video_url.to_string(),
            max_comments,
            sort_by,
        })
        .await
    }

    /// `POST /analyze/youtube` with a prepared request.
    pub async fn analyze_video(&self, request: &VideoAnalysisRequest) -> Result<VideoAnalysis> {
        tracing::debug!(
            video_url = %request.video_url,
            max_comments = request.max_comments,
            sort_by = %request.sort_by,
            "requesting video analysis"
        );
        self.post_json("/analyze/youtube", request, messages::ANALYZE_YOUTUBE)
            .await
    }

    /// `GET /predictions/stats`
    pub async fn get_stats(&self) -> Result<PredictionStats> {
        self.get_json("/predictions/stats", &[], messages::GET_STATS)
            .await
    }

    /// `GET /predictions`
    pub async fn get_predictions(&self, filters: &PredictionFilters) -> Result<PredictionPage> {
        self.get_json("/predictions", &filters.to_query(), messages::GET_PREDICTIONS)
            .await
    }

    /// `GET /predictions/monitor`
    pub async fn get_monitoring(&self, recent_limit: u32) -> Result<MonitoringReport> {
        self.get_json(
            "/predictions/monitor",
            &[("recent_limit", recent_limit.to_string())],
            messages::GET_MONITORING,
        )
        .await
    }

    /// `GET /health`
    ///
    /// Every failure, including a backend `detail`, is reported as
    /// "The API is not available".
    pub async fn check_health(&self) -> Result<HealthStatus> {
        self.get_json("/health", &[], messages::API_UNAVAILABLE)
            .await
            .map_err(|e| e.with_message(messages::API_UNAVAILABLE))
    }

    /// `GET /`
    pub async fn api_info(&self) -> Result<ApiInfo> {
        self.get_json("/", &[], messages::API_INFO).await
    }

    /// `GET /api/mlflow/experiments`
    pub async fn list_experiments(&self) -> Result<ExperimentList> {
        self.get_json("/api/mlflow/experiments", &[], messages::LIST_EXPERIMENTS)
            .await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B, fallback: &str) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.config.endpoint(path);
        let request = self.http_client.post(&url).json(body);
        self.execute(request, path, fallback).await
    }

    async fn get_json<T>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
        fallback: &str,
    ) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = self.config.endpoint(path);
        let mut request = self.http_client.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }
        self.execute(request, path, fallback).await
    }

    async fn execute<T>(&self, request: RequestBuilder, path: &str, fallback: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        // Transport failures carry the operation's message; the cause is logged.
        let response = request.send().await.map_err(|e| {
            tracing::warn!(path, error = %e, "request failed before a response arrived");
            ClientError::HttpError(fallback.to_string())
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            tracing::warn!(path, error = %e, "response body could not be read");
            ClientError::HttpError(fallback.to_string())
        })?;

        if !status.is_success() {
            let error = classify_http_error(status.as_u16(), &body, fallback);
            tracing::warn!(path, status = status.as_u16(), error = %error, "service returned an error");
            return Err(error);
        }

        tracing::debug!(path, status = status.as_u16(), bytes = body.len(), "response received");
        serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(path, error = %e, "unexpected response body");
            ClientError::ParseError(format!("{}: {e}", messages::INVALID_RESPONSE))
        })
    }
}

#[async_trait]
impl DetectionCapability for HateSpeechClient {
    async fn analyze_text(&self, text: &str) -> Result<Prediction> {
        HateSpeechClient::analyze_text(self, text).await
    }

    async fn analyze_batch(&self, texts: &[String]) -> Result<Vec<Prediction>> {
        HateSpeechClient::analyze_batch(self, texts).await
    }

    async fn analyze_youtube(
        &self,
        video_url: &str,
        max_comments: u32,
        sort_by: SortBy,
    ) -> Result<VideoAnalysis> {
        HateSpeechClient::analyze_youtube(self, video_url, max_comments, sort_by).await
    }
}

#[async_trait]
impl HistoryCapability for HateSpeechClient {
    async fn get_stats(&self) -> Result<PredictionStats> {
        HateSpeechClient::get_stats(self).await
    }

    async fn get_predictions(&self, filters: &PredictionFilters) -> Result<PredictionPage> {
        HateSpeechClient::get_predictions(self, filters).await
    }

    async fn get_monitoring(&self, recent_limit: u32) -> Result<MonitoringReport> {
        HateSpeechClient::get_monitoring(self, recent_limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_text_is_rejected_locally() {
        // Nothing listens on this port; a request would surface as HttpError.
        let client = HateSpeechClient::with_base_url("http://127.0.0.1:9").unwrap();
        let err = client.analyze_text("   \n\t").await.unwrap_err();
        assert_eq!(err, ClientError::InvalidInput(messages::EMPTY_TEXT.into()));
    }

    #[test]
    fn invalid_custom_header_fails_construction() {
        let config = ClientConfig::builder()
            .header("bad header", "x")
            .build()
            .unwrap();
        assert!(matches!(
            HateSpeechClient::new(config),
            Err(ClientError::ConfigurationError(_))
        ));
    }

    #[tokio::test]
    async fn health_failure_uses_unavailable_message() {
        let client = HateSpeechClient::with_base_url("http://127.0.0.1:9").unwrap();
        let err = client.check_health().await.unwrap_err();
        assert!(matches!(err, ClientError::HttpError(_)));
        assert_eq!(err.user_message(), messages::API_UNAVAILABLE);
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn transport_failure_uses_operation_message() {
        let client = HateSpeechClient::with_base_url("http://127.0.0.1:9").unwrap();

        let err = client.get_stats().await.unwrap_err();
        assert_eq!(err, ClientError::HttpError(messages::GET_STATS.into()));

        let err = client
            .analyze_batch(&["hello".to_string()])
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), messages::ANALYZE_BATCH);
        assert!(logs_contain("request failed before a response arrived"));
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn service_errors_are_logged() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/predictions/stats"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = HateSpeechClient::with_base_url(server.uri()).unwrap();
        let err = client.get_stats().await.unwrap_err();
        assert_eq!(err.user_message(), messages::GET_STATS);
        assert!(logs_contain("service returned an error"));
        assert!(logs_contain("/predictions/stats"));
    }
}
