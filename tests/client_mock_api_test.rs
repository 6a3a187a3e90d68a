//! Mock API tests for the detection service client
//!
//! Response bodies follow the service's FastAPI models.

use hatewatch::prelude::*;
use hatewatch::types::{ExperimentList, ToxicityLabel};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HateSpeechClient {
    HateSpeechClient::with_base_url(server.uri()).unwrap()
}

fn prediction_body(text: &str, toxic: bool, probability_toxic: f64) -> serde_json::Value {
    json!({
        "text": text,
        "is_toxic": toxic,
        "toxicity_label": if toxic { "Toxic" } else { "Not Toxic" },
        "probability_toxic": probability_toxic,
        "probability_not_toxic": 1.0 - probability_toxic,
        "confidence": if toxic { probability_toxic } else { 1.0 - probability_toxic }
    })
}

fn stats_body(total: u64, toxic: u64, average_confidence: f64) -> serde_json::Value {
    let toxic_pct = if total == 0 { 0.0 } else { toxic as f64 / total as f64 * 100.0 };
    json!({
        "total_predictions": total,
        "toxic_count": toxic,
        "not_toxic_count": total - toxic,
        "toxic_percentage": toxic_pct,
        "not_toxic_percentage": if total == 0 { 0.0 } else { 100.0 - toxic_pct },
        "average_confidence": average_confidence
    })
}

#[tokio::test]
async fn test_analyze_text_trims_and_decodes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/predict"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({"text": "you are an idiot"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(prediction_body("you are an idiot", true, 0.91)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let prediction = client.analyze_text("  you are an idiot \n").await.unwrap();

    assert!(prediction.is_toxic);
    assert_eq!(prediction.toxicity_label, ToxicityLabel::Toxic);
    assert_eq!(prediction.probability_toxic, 0.91);
    assert_eq!(prediction.confidence, 0.91);
}

#[tokio::test]
async fn test_empty_text_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.analyze_text("   \t").await.unwrap_err();
    assert_eq!(err, ClientError::InvalidInput("Text cannot be empty".into()));
}

#[tokio::test]
async fn test_backend_detail_wins_over_fallback() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"detail": "Model not loaded"})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.analyze_text("hello").await.unwrap_err();
    assert_eq!(err.status_code(), Some(503));
    assert_eq!(err.user_message(), "Model not loaded");
    assert!(err.is_server_error());
}

#[tokio::test]
async fn test_fallback_message_without_detail() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/predictions/stats"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "boom"})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.analyze_text("hello").await.unwrap_err();
    assert_eq!(err.user_message(), "Failed to analyze the text");

    let err = client.get_stats().await.unwrap_err();
    assert_eq!(err.user_message(), "Failed to fetch statistics");
    match err {
        ClientError::ApiError { details, .. } => {
            assert_eq!(details, Some(json!({"error": "boom"})));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_batch_validation_errors_are_joined() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/predict/batch"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [
                {"loc": ["body", "texts"], "msg": "ensure this value has at most 100 items", "type": "value_error"}
            ]
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let texts: Vec<String> = (0..101).map(|i| format!("comment {i}")).collect();
    let err = client.analyze_batch(&texts).await.unwrap_err();
    assert_eq!(err.status_code(), Some(422));
    assert!(err.is_client_error());
    assert_eq!(err.user_message(), "ensure this value has at most 100 items");
}

#[tokio::test]
async fn test_analyze_batch_keeps_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/predict/batch"))
        .and(body_json(json!({"texts": ["great video", "you are trash"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            prediction_body("great video", false, 0.12),
            prediction_body("you are trash", true, 0.77)
        ])))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let texts = vec!["great video".to_string(), "you are trash".to_string()];
    let predictions = client.analyze_batch(&texts).await.unwrap();
    assert_eq!(predictions.len(), 2);
    assert!(!predictions[0].is_toxic);
    assert_eq!(predictions[0].toxicity_label, ToxicityLabel::NotToxic);
    assert!(predictions[1].is_toxic);
}

#[tokio::test]
async fn test_analyze_youtube_request_and_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze/youtube"))
        .and(body_json(json!({
            "video_url": "https://youtu.be/dQw4w9WgXcQ",
            "max_comments": 50,
            "sort_by": "time"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "video_id": "dQw4w9WgXcQ",
            "video_url": "https://youtu.be/dQw4w9WgXcQ",
            "total_comments": 2,
            "toxic_count": 1,
            "non_toxic_count": 1,
            "toxic_percentage": 50.0,
            "comments": [
                {
                    "comment_id": "Ugx1",
                    "text": "Never gonna give you up",
                    "author": "@fan",
                    "likes": 120,
                    "time": "2 years ago",
                    "reply_count": 3,
                    "is_toxic": false,
                    "toxicity_label": "Not Toxic",
                    "probability_toxic": 0.05,
                    "confidence": 0.95
                },
                {
                    "comment_id": "Ugx2",
                    "text": "worst song ever, idiots",
                    "author": "@troll",
                    "likes": 0,
                    "time": "1 day ago",
                    "reply_count": 0,
                    "is_toxic": true,
                    "toxicity_label": "Toxic",
                    "probability_toxic": 0.81,
                    "confidence": 0.81
                }
            ]
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let video = client
        .analyze_youtube("https://youtu.be/dQw4w9WgXcQ", 50, SortBy::Time)
        .await
        .unwrap();
    assert_eq!(video.video_id, "dQw4w9WgXcQ");
    assert_eq!(video.comments.len(), 2);
    assert_eq!(video.comments[0].likes, 120);
    assert!(video.comments[1].is_toxic);
    assert_eq!(video.toxic_percentage, 50.0);
}

#[tokio::test]
async fn test_youtube_error_detail() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze/youtube"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "detail": "No comments found or comments are disabled for this video"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .analyze_youtube("https://youtu.be/dQw4w9WgXcQ", 100, SortBy::Top)
        .await
        .unwrap_err();
    assert_eq!(
        err.user_message(),
        "No comments found or comments are disabled for this video"
    );
}

#[tokio::test]
async fn test_get_predictions_sends_filters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/predictions"))
        .and(query_param("limit", "20"))
        .and(query_param("offset", "40"))
        .and(query_param("is_toxic", "true"))
        .and(query_param("source", "youtube"))
        .and(query_param("video_id", "dQw4w9WgXcQ"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "predictions": [{
                "id": 41,
                "text": "worst song ever, idiots",
                "is_toxic": true,
                "toxicity_label": "Toxic",
                "probability_toxic": 0.81,
                "probability_not_toxic": 0.19,
                "confidence": 0.81,
                "source": "youtube",
                "video_id": "dQw4w9WgXcQ",
                "created_at": "2024-05-01T10:30:00.123456"
            }],
            "count": 1
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let filters = PredictionFilters::new()
        .limit(20)
        .offset(40)
        .toxic(true)
        .source(PredictionSource::Youtube)
        .video_id("dQw4w9WgXcQ");
    let page = client.get_predictions(&filters).await.unwrap();
    assert_eq!(page.count, 1);
    assert_eq!(page.predictions[0].id, 41);
    assert_eq!(page.predictions[0].video_id.as_deref(), Some("dQw4w9WgXcQ"));
}

#[tokio::test]
async fn test_get_stats() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/predictions/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stats_body(200, 50, 0.82)))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let stats = client.get_stats().await.unwrap();
    assert_eq!(stats.total_predictions, 200);
    assert_eq!(stats.toxic_count, 50);
    assert_eq!(stats.toxic_percentage, 25.0);
}

#[tokio::test]
async fn test_get_monitoring_passes_recent_limit() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/predictions/monitor"))
        .and(query_param("recent_limit", "250"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "warning",
            "alert": "Average confidence dropped 7.50%",
            "historical": stats_body(1000, 200, 0.80),
            "recent": stats_body(250, 75, 0.74),
            "comparison": {
                "confidence_drop": 0.06,
                "confidence_drop_percentage": 7.5,
                "recent_limit": 250
            }
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let report = client.get_monitoring(250).await.unwrap();
    assert_eq!(report.status, MonitorStatus::Warning);
    assert_eq!(report.status.title(), "Attention required");
    assert!(!report.alert_triggered());
    assert!(report.confidence_dropped());
    assert_eq!(report.recent.total_predictions, 250);
}

#[tokio::test]
async fn test_health_ok_and_every_failure_is_unavailable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": "healthy", "model_loaded": true})),
        )
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"detail": "Model not loaded"})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let health = client.check_health().await.unwrap();
    assert!(health.is_healthy());

    let err = client.check_health().await.unwrap_err();
    assert_eq!(err.user_message(), "The API is not available");
    assert_eq!(err.status_code(), Some(503));
}

#[tokio::test]
async fn test_unexpected_body_is_a_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/predictions/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy page</html>"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    match client.get_stats().await.unwrap_err() {
        ClientError::ParseError(msg) => assert!(msg.starts_with("Invalid response from server")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_api_info_and_experiments() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Hate Speech Detection API",
            "version": "1.0.0",
            "docs": "/docs",
            "health": "/health"
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/mlflow/experiments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "experiments": [{
                "experiment_id": "1",
                "name": "hate_speech_detection",
                "artifact_location": "file:///mlruns/1",
                "lifecycle_stage": "active",
                "runs_count": 1,
                "runs": [{
                    "run_id": "abc123",
                    "run_name": "svm_optimized",
                    "status": "FINISHED",
                    "start_time": 1714557000000i64,
                    "end_time": 1714557060000i64,
                    "metrics": {"f1_test": 0.6866, "overfitting": 2.54},
                    "params": {"C": "0.056", "kernel": "linear"},
                    "tags": {}
                }]
            }],
            "total_experiments": 1
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let info = client.api_info().await.unwrap();
    assert_eq!(info.version, "1.0.0");

    let experiments: ExperimentList = client.list_experiments().await.unwrap();
    let run = &experiments.experiments[0].runs[0];
    assert_eq!(run.metrics.f1_test, Some(0.6866));
    assert_eq!(run.metrics.accuracy_test, None);
    assert_eq!(run.params.get("kernel").map(String::as_str), Some("linear"));
}

#[tokio::test]
async fn test_connection_refused_is_http_error() {
    // Nothing listens on the discard port.
    let client = HateSpeechClient::with_base_url("http://127.0.0.1:9").unwrap();
    let err = client.get_stats().await.unwrap_err();
    assert!(matches!(err, ClientError::HttpError(_)));
    assert_eq!(err.user_message(), "Failed to fetch statistics");
}
