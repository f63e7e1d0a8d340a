/// HTTP endpoint for flood-risk prediction queries
///
/// Endpoints:
/// - GET /predict - Run the prediction pipeline against the latest reading
/// - GET /health - Service health check
///
/// The prediction endpoint always answers HTTP 200 with the fixed
/// three-field response shape: a domain failure (no data, bad row,
/// classifier error) is carried inside the payload, never as an HTTP
/// error status. An HTTP-level failure therefore always means "service
/// is down", and an HTTP 200 always means "the pipeline ran".
///
/// Cross-origin policy: every response allows any origin, method, and
/// header, and OPTIONS preflights are answered unconditionally. This is
/// a development-time policy for the dashboard; tighten before exposing
/// the service beyond it.

use crate::model::PredictionResponse;
use crate::service::{PredictionService, ReadingSource};
use std::io::Cursor;
use std::sync::Arc;
use threadpool::ThreadPool;

type JsonResponse = tiny_http::Response<Cursor<Vec<u8>>>;

// ---------------------------------------------------------------------------
// HTTP Server
// ---------------------------------------------------------------------------

/// Start the HTTP endpoint server on the specified port.
///
/// Each incoming request is dispatched to a worker thread, so concurrent
/// prediction requests each run their own independent store fetch; the
/// only shared resource is the classifier inside the service, which is
/// read-only and needs no locking. Runs until the process exits.
pub fn start_endpoint_server<S>(
    port: u16,
    workers: usize,
    service: Arc<PredictionService<S>>,
) -> Result<(), String>
where
    S: ReadingSource + Send + Sync + 'static,
{
    let server = tiny_http::Server::http(format!("0.0.0.0:{}", port))
        .map_err(|e| format!("Failed to start HTTP server: {}", e))?;

    println!("📡 HTTP endpoint listening on http://0.0.0.0:{}", port);
    println!("   GET /predict - Flood-risk verdict from the latest reading");
    println!("   GET /health - Service health check\n");

    let pool = ThreadPool::new(workers);

    for request in server.incoming_requests() {
        let service = Arc::clone(&service);
        pool.execute(move || {
            let response = route_request(&request, service.as_ref());
            if let Err(e) = request.respond(response) {
                eprintln!("Failed to send response: {}", e);
            }
        });
    }

    Ok(())
}

/// Route one request to its handler.
fn route_request<S: ReadingSource>(
    request: &tiny_http::Request,
    service: &PredictionService<S>,
) -> JsonResponse {
    // CORS preflight is answered before routing: any origin, method, and
    // header is acceptable to this endpoint.
    if *request.method() == tiny_http::Method::Options {
        return preflight_response();
    }

    match request.url() {
        "/predict" => handle_predict(service),
        "/health" => handle_health(),
        _ => create_response(
            404,
            serde_json::json!({
                "error": "Not found",
                "available_endpoints": ["/predict", "/health"]
            }),
        ),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Handle /predict: run the pipeline and serialize whichever case came
/// out. Both cases are HTTP 200 — callers inspect the payload.
fn handle_predict<S: ReadingSource>(service: &PredictionService<S>) -> JsonResponse {
    let response = PredictionResponse::from(service.handle_prediction());
    create_response(200, serde_json::to_value(&response).unwrap())
}

/// Handle /health.
fn handle_health() -> JsonResponse {
    create_response(
        200,
        serde_json::json!({
            "status": "ok",
            "service": "floodrisk_service",
            "version": "0.1.0"
        }),
    )
}

// ---------------------------------------------------------------------------
// Response construction
// ---------------------------------------------------------------------------

/// Create an HTTP response with a JSON body and the common headers.
fn create_response(status_code: u16, json: serde_json::Value) -> JsonResponse {
    let body = serde_json::to_string_pretty(&json).unwrap();

    with_common_headers(
        tiny_http::Response::from_data(body.into_bytes())
            .with_status_code(tiny_http::StatusCode::from(status_code)),
    )
}

/// Empty 204 for OPTIONS preflights.
fn preflight_response() -> JsonResponse {
    with_common_headers(
        tiny_http::Response::from_data(Vec::new())
            .with_status_code(tiny_http::StatusCode::from(204)),
    )
}

fn with_common_headers(response: JsonResponse) -> JsonResponse {
    response
        .with_header(header("Content-Type", "application/json"))
        .with_header(header("Access-Control-Allow-Origin", "*"))
        .with_header(header("Access-Control-Allow-Methods", "*"))
        .with_header(header("Access-Control-Allow-Headers", "*"))
}

fn header(name: &str, value: &str) -> tiny_http::Header {
    tiny_http::Header::from_bytes(name.as_bytes(), value.as_bytes()).unwrap()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
