//! Flood Risk Prediction Service - Main Entry Point
//!
//! A backend service that, per request:
//! 1. Fetches the most recent sensor readings from the spreadsheet store
//! 2. Validates them into the fixed two-feature vector
//! 3. Runs the pre-trained flood classifier
//! 4. Serves the verdict from a single HTTP endpoint
//!
//! The classifier is loaded once at startup and shared read-only across
//! request threads; everything else is request-scoped.
//!
//! Usage:
//!   cargo run --release                 # Serve on the configured port
//!   cargo run --release -- --port 9090  # Override the configured port
//!
//! Environment:
//!   SHEETS_API_KEY - values API key (variable name set in service.toml)

use floodrisk_service::classifier::FloodClassifier;
use floodrisk_service::config;
use floodrisk_service::endpoint;
use floodrisk_service::ingest::sheets::SheetsSource;
use floodrisk_service::model::FeatureVector;
use floodrisk_service::service::PredictionService;
use std::env;
use std::sync::Arc;

fn main() {
    println!("🌊 Flood Risk Prediction Service");
    println!("=================================\n");

    // Parse command-line arguments
    let args: Vec<String> = env::args().collect();
    let mut port_override: Option<u16> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--port" => {
                if i + 1 < args.len() {
                    port_override = args[i + 1].parse().ok();
                    i += 2;
                } else {
                    eprintln!("Error: --port requires a port number");
                    std::process::exit(1);
                }
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                eprintln!("Usage: {} [--port PORT]", args[0]);
                std::process::exit(1);
            }
        }
    }

    // Load configuration and resolve the API key
    println!("📋 Loading configuration...");
    let config = config::load_config();
    let api_key = match config::resolve_api_key(&config.sheets) {
        Ok(key) => key,
        Err(e) => {
            eprintln!("\n❌ Configuration error: {}\n", e);
            std::process::exit(1);
        }
    };
    println!(
        "✓ Configuration loaded (spreadsheet {}, range {})\n",
        config.sheets.spreadsheet_id, config.sheets.range
    );

    // Load the model artifact - fatal if unavailable, the service cannot
    // produce a verdict without it
    println!("🧠 Loading model artifact from {}...", config.model.path);
    let classifier = match FloodClassifier::load(&config.model.path) {
        Ok(classifier) => classifier,
        Err(e) => {
            eprintln!("\n❌ Model loading failed: {}\n", e);
            std::process::exit(1);
        }
    };

    // Warmup inference: catches an unusable artifact before the first
    // real request instead of during it
    let warmup = FeatureVector {
        distance: 0.0,
        flow_rate: 0.0,
    };
    if let Err(e) = classifier.predict(&warmup) {
        eprintln!("\n❌ Warmup inference failed: {}\n", e);
        std::process::exit(1);
    }
    println!("✓ Model loaded, warmup inference ok\n");

    // Wire the pipeline and serve until the process is stopped
    let source = SheetsSource::new(&config.sheets, api_key);
    let service = Arc::new(PredictionService::new(source, Arc::new(classifier)));

    let port = port_override.unwrap_or(config.server.port);
    println!("🚀 Starting HTTP endpoint server...");
    println!("   Press Ctrl+C to stop\n");

    if let Err(e) = endpoint::start_endpoint_server(port, config.server.workers, service) {
        eprintln!("\n❌ Endpoint server error: {}\n", e);
        std::process::exit(1);
    }
}
