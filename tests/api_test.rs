/// HTTP API tests driven through the router with `oneshot`
mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use movement_analysis::{api::routes::create_routes, config::AppConfig, models::History};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{hip_only_history, squat_history};

fn app() -> Router {
    create_routes(&AppConfig::default())
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn analyze_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/analysis/analyze")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn analyze_body(history: &History) -> Value {
    json!({
        "age": 34,
        "exercise": "squat",
        "fps": 30.0,
        "history": history,
    })
}

#[tokio::test]
async fn test_root_endpoint() {
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Movement analysis API is running");
}

#[tokio::test]
async fn test_health_endpoint() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "movement-analysis");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_analyze_squat_history() {
    let (status, body) = send(app(), analyze_request(analyze_body(&squat_history(60)))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "analysis_completed");
    assert_eq!(body["frames_analyzed"], 60);
    assert_eq!(body["metadata"]["age"], 34);
    assert_eq!(body["metadata"]["exercise"], "squat");
    assert_eq!(body["metadata"]["video_duration"], "2.0s");
    assert_eq!(body["events"]["balance_loss"], 0);

    let metrics = body["metrics"].as_object().unwrap();
    let mut names: Vec<&str> = metrics.keys().map(String::as_str).collect();
    names.sort();
    assert_eq!(
        names,
        vec!["lower_limb_symmetry", "range_of_motion", "rhythm_consistency", "trunk_stability"]
    );
    assert_eq!(metrics["trunk_stability"]["classification"], "good");

    let key_frames = body["key_frames"].as_array().unwrap();
    assert!(!key_frames.is_empty());
    assert!(body.get("screenshots").is_none());
}

#[tokio::test]
async fn test_reported_frame_count_sets_duration() {
    let mut body = analyze_body(&squat_history(60));
    body["total_frames"] = json!(90);

    let (status, body) = send(app(), analyze_request(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["metadata"]["video_duration"], "3.0s");
    assert_eq!(body["frames_analyzed"], 60);
}

#[tokio::test]
async fn test_static_history_is_insufficient_evidence() {
    let history = hip_only_history(&[Some(0.5); 30]);
    let (status, body) = send(app(), analyze_request(analyze_body(&history))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "insufficient_evidence");
    assert_eq!(body["metrics"], json!({}));
    assert_eq!(body["events"], json!({}));
    assert_eq!(body["key_frames"], json!([]));
}

#[tokio::test]
async fn test_empty_history_is_unprocessable() {
    let (status, body) = send(app(), analyze_request(analyze_body(&History::default()))).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Could not extract frames from video");
}

#[tokio::test]
async fn test_invalid_age_is_rejected() {
    let mut body = analyze_body(&squat_history(10));
    body["age"] = json!(200);

    let (status, body) = send(app(), analyze_request(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Validation error"));
}

#[tokio::test]
async fn test_blank_exercise_is_rejected() {
    let mut body = analyze_body(&squat_history(10));
    body["exercise"] = json!("");

    let (status, _) = send(app(), analyze_request(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_payload_is_rejected() {
    let (status, body) = send(app(), analyze_request(json!({ "age": 30, "fps": 30.0 }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_non_contiguous_history_is_rejected() {
    let mut body = analyze_body(&squat_history(5));
    body["history"][2]["frame_index"] = json!(7);

    let (status, body) = send(app(), analyze_request(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Frame indices"));
}

#[tokio::test]
async fn test_history_over_limit_is_rejected() {
    let config = AppConfig {
        max_history_frames: 10,
        ..AppConfig::default()
    };

    let (status, body) = send(
        create_routes(&config),
        analyze_request(analyze_body(&squat_history(11))),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("limit is 10"));
}

#[tokio::test]
async fn test_frame_alias_is_accepted() {
    let history = json!([
        { "frame": 0, "landmarks": null },
        { "frame": 1, "landmarks": null }
    ]);
    let body = json!({ "age": 20, "exercise": "lunge", "fps": 25.0, "history": history });

    let (status, body) = send(app(), analyze_request(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "insufficient_evidence");
    assert_eq!(body["metadata"]["video_duration"], "0.1s");
}

#[tokio::test]
async fn test_empty_object_landmark_slots_read_missing() {
    let frames: Vec<Value> = (0..30)
        .map(|i| {
            let mut landmarks = vec![json!({}); 33];
            landmarks[23] = json!({ "x": 0.5, "y": 0.5 + 0.1 * i as f64 / 30.0 });
            json!({ "frame": i, "timestamp": i as f64 / 30.0, "landmarks": landmarks })
        })
        .collect();
    let body = json!({ "age": 41, "exercise": "squat", "fps": 30.0, "history": frames });

    let (status, body) = send(app(), analyze_request(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "analysis_completed");
    // shoulders and knees are absent everywhere
    assert_eq!(body["metrics"]["trunk_stability"]["value"], 0.0);
    assert_eq!(body["metrics"]["lower_limb_symmetry"]["value"], 0.0);
}
