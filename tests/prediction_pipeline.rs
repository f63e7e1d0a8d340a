/// Integration tests for the end-to-end prediction pipeline
///
/// These tests define and verify the complete externally observable
/// behavior of the service:
/// 1. Fetch → validate → predict → map against canned reading sources
/// 2. The fixed three-field response shape for success and failure
/// 3. Specific, diagnosable failure messages
/// 4. The live HTTP endpoint (routing, status codes, CORS)
///
/// The classifier under test is built from a literal artifact document,
/// exactly as the training pipeline would export it, so the tests also
/// pin the artifact wire format.
///
/// Run with: cargo test --test prediction_pipeline

use floodrisk_service::classifier::{FloodClassifier, ModelArtifact};
use floodrisk_service::model::{PredictionResponse, PredictionResult, RawRow, Verdict};
use floodrisk_service::service::{PredictionService, ReadingSource};
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

/// Reading source backed by a fixed row list — stands in for the
/// spreadsheet store so tests control exactly what the pipeline sees.
struct StaticSource {
    rows: Vec<RawRow>,
}

impl ReadingSource for StaticSource {
    fn fetch_latest(&self) -> Vec<RawRow> {
        self.rows.clone()
    }
}

fn rows(data: &[&[&str]]) -> Vec<RawRow> {
    data.iter()
        .map(|r| r.iter().map(|c| c.to_string()).collect())
        .collect()
}

/// Artifact JSON as the training pipeline exports it. Flow-rate-dominant
/// weights: sigmoid(flow_rate - 3.0) crosses 0.5 at flow_rate = 3.0, so
/// the reading {Distance: 11.0, FlowRate: 4.1} classifies as flood.
fn test_artifact_json() -> &'static str {
    r#"{
      "model_type": "logistic_regression",
      "feature_names": ["Distance", "FlowRate"],
      "coefficients": [0.0, 1.0],
      "intercept": -3.0,
      "decision_threshold": 0.5
    }"#
}

fn test_classifier() -> Arc<FloodClassifier> {
    let artifact: ModelArtifact =
        serde_json::from_str(test_artifact_json()).expect("test artifact JSON is valid");
    Arc::new(FloodClassifier::from_artifact(artifact).expect("test artifact passes validation"))
}

fn service_over(data: &[&[&str]]) -> PredictionService<StaticSource> {
    PredictionService::new(StaticSource { rows: rows(data) }, test_classifier())
}

fn response_json(result: PredictionResult) -> serde_json::Value {
    serde_json::to_value(PredictionResponse::from(result)).expect("response serializes")
}

// ---------------------------------------------------------------------------
// 1. End-to-End Success
// ---------------------------------------------------------------------------

#[test]
fn test_pipeline_predicts_flood_from_the_latest_reading() {
    let service = service_over(&[&["12.5", "3.2"], &["11.0", "4.1"]]);

    let result = service.handle_prediction();

    assert_eq!(
        result,
        PredictionResult::Success {
            distance: 11.0,
            flow_rate: 4.1,
            verdict: Verdict::FloodRisk,
        },
        "the verdict must be computed from the most recent reading only"
    );
}

#[test]
fn test_success_response_has_the_documented_wire_shape() {
    let service = service_over(&[&["12.5", "3.2"], &["11.0", "4.1"]]);

    let json = response_json(service.handle_prediction());

    assert_eq!(
        json,
        serde_json::json!({
            "Distance": 11.0,
            "FlowRate": 4.1,
            "Prediction": "Flood Risk"
        })
    );
}

#[test]
fn test_single_reading_is_enough_for_a_verdict() {
    // A store that has only ever seen one reading still gets a verdict;
    // the two-row fetch window is a ceiling, not a floor.
    let service = service_over(&[&["14.0", "1.5"]]);

    let result = service.handle_prediction();

    assert_eq!(
        result,
        PredictionResult::Success {
            distance: 14.0,
            flow_rate: 1.5,
            verdict: Verdict::NoFloodRisk,
        }
    );
}

#[test]
fn test_consecutive_requests_against_unchanged_store_are_identical() {
    let service = service_over(&[&["12.5", "3.2"], &["11.0", "4.1"]]);

    let first = service.handle_prediction();
    let second = service.handle_prediction();

    assert_eq!(first, second, "pipeline is deterministic for fixed inputs");
}

// ---------------------------------------------------------------------------
// 2. End-to-End Domain Failures
// ---------------------------------------------------------------------------

#[test]
fn test_empty_store_yields_the_not_enough_data_response() {
    let service = service_over(&[]);

    let json = response_json(service.handle_prediction());

    assert_eq!(
        json,
        serde_json::json!({
            "Distance": 0.0,
            "FlowRate": 0.0,
            "Prediction": "Not enough data for prediction"
        })
    );
}

#[test]
fn test_incomplete_latest_row_yields_a_specific_message() {
    let service = service_over(&[&["12.5", "3.2"], &["11.0"]]);

    let json = response_json(service.handle_prediction());

    assert_eq!(json["Distance"], 0.0);
    assert_eq!(json["FlowRate"], 0.0);
    let message = json["Prediction"].as_str().expect("message is a string");
    assert!(
        message.contains("1 cell"),
        "operators need to see the observed cell count, got: {}",
        message
    );
}

#[test]
fn test_non_numeric_cell_yields_a_message_naming_the_column() {
    let service = service_over(&[&["n/a", "4.1"]]);

    let json = response_json(service.handle_prediction());

    let message = json["Prediction"].as_str().expect("message is a string");
    assert!(
        message.contains("Distance") && message.contains("n/a"),
        "message should name the failing column and echo the cell, got: {}",
        message
    );
}

#[test]
fn test_failure_responses_share_the_success_shape() {
    // The response object always has exactly the three documented fields,
    // whichever case produced it — callers never branch on shape.
    let failure = response_json(service_over(&[]).handle_prediction());
    let success =
        response_json(service_over(&[&["11.0", "4.1"]]).handle_prediction());

    fn keys(v: &serde_json::Value) -> Vec<&String> {
        let mut k: Vec<&String> = v.as_object().unwrap().keys().collect();
        k.sort();
        k
    }
    assert_eq!(keys(&failure), keys(&success));
}

// ---------------------------------------------------------------------------
// 3. Artifact Round Trip
// ---------------------------------------------------------------------------

#[test]
fn test_artifact_document_round_trips_into_a_working_classifier() {
    let artifact: ModelArtifact =
        serde_json::from_str(test_artifact_json()).expect("artifact parses");
    let classifier = FloodClassifier::from_artifact(artifact).expect("artifact validates");

    let features = floodrisk_service::model::FeatureVector {
        distance: 11.0,
        flow_rate: 4.1,
    };
    assert_eq!(classifier.predict(&features).expect("inference succeeds"), 1);
}

#[test]
fn test_artifact_with_reordered_features_is_refused_at_load() {
    // Feature order is load-bearing: serving a model trained on
    // [FlowRate, Distance] would silently invert the meaning of both
    // inputs, so validation must refuse it outright.
    let reordered = r#"{
      "model_type": "logistic_regression",
      "feature_names": ["FlowRate", "Distance"],
      "coefficients": [0.0, 1.0],
      "intercept": -3.0,
      "decision_threshold": 0.5
    }"#;

    let artifact: ModelArtifact = serde_json::from_str(reordered).expect("parses");
    assert!(FloodClassifier::from_artifact(artifact).is_err());
}

// ---------------------------------------------------------------------------
// 4. Live HTTP Endpoint
// ---------------------------------------------------------------------------

mod live_endpoint {
    use super::*;
    use floodrisk_service::endpoint;
    use std::sync::Once;
    use std::time::Duration;

    const PORT: u16 = 38917;

    static SERVER: Once = Once::new();

    /// Starts one shared endpoint server for this module's tests, backed
    /// by a store holding the canonical two readings.
    fn ensure_server() {
        SERVER.call_once(|| {
            let service = Arc::new(PredictionService::new(
                StaticSource {
                    rows: rows(&[&["12.5", "3.2"], &["11.0", "4.1"]]),
                },
                test_classifier(),
            ));

            std::thread::spawn(move || {
                if let Err(e) = endpoint::start_endpoint_server(PORT, 2, service) {
                    eprintln!("test endpoint server failed to start: {}", e);
                }
            });

            // Wait for the listener to come up before any test fires.
            let client = reqwest::blocking::Client::new();
            for _ in 0..50 {
                if client
                    .get(format!("http://127.0.0.1:{}/health", PORT))
                    .send()
                    .is_ok()
                {
                    return;
                }
                std::thread::sleep(Duration::from_millis(100));
            }
            panic!("endpoint server did not become ready");
        });
    }

    fn get(path: &str) -> reqwest::blocking::Response {
        ensure_server();
        reqwest::blocking::Client::new()
            .get(format!("http://127.0.0.1:{}{}", PORT, path))
            .send()
            .expect("request to local test server succeeds")
    }

    #[test]
    fn test_predict_over_http_returns_the_flood_verdict() {
        let response = get("/predict");
        assert_eq!(response.status().as_u16(), 200);

        let body: PredictionResponse = response.json().expect("body parses as the wire shape");
        assert_eq!(body.distance, 11.0);
        assert_eq!(body.flow_rate, 4.1);
        assert_eq!(body.prediction, "Flood Risk");
    }

    #[test]
    fn test_predict_responses_allow_any_origin() {
        let response = get("/predict");
        let cors = response
            .headers()
            .get("access-control-allow-origin")
            .expect("CORS header present");
        assert_eq!(cors.to_str().expect("header is ascii"), "*");
    }

    #[test]
    fn test_health_over_http() {
        let response = get("/health");
        assert_eq!(response.status().as_u16(), 200);

        let body: serde_json::Value = response.json().expect("health body is JSON");
        assert_eq!(body["status"], "ok");
    }

    #[test]
    fn test_unknown_route_is_404_with_endpoint_listing() {
        let response = get("/nope");
        assert_eq!(response.status().as_u16(), 404);

        let body: serde_json::Value = response.json().expect("404 body is JSON");
        assert!(body["available_endpoints"].is_array());
    }

    #[test]
    fn test_two_wire_requests_yield_identical_payloads() {
        let first = get("/predict").text().expect("body reads");
        let second = get("/predict").text().expect("body reads");
        assert_eq!(first, second, "unchanged store state means identical responses");
    }
}
