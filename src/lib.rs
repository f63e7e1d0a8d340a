/// floodrisk_service: sensor-driven flood risk prediction service.
///
/// # Module structure
///
/// ```text
/// floodrisk_service
/// ├── model       — shared data types (FeatureVector, Verdict, PredictionResult, …)
/// ├── config      — service configuration loader (service.toml + .env)
/// ├── classifier  — pre-trained flood classifier (artifact loading + inference)
/// ├── features    — feature vector construction from raw store rows
/// ├── service     — prediction pipeline orchestration (fetch → validate → predict → map)
/// ├── endpoint    — HTTP API for prediction queries
/// └── ingest
///     ├── sheets  — spreadsheet values API: URL construction + JSON parsing
///     └── fixtures (test only) — representative API response payloads
/// ```

/// Public modules
pub mod classifier;
pub mod config;
pub mod endpoint;
pub mod features;
pub mod ingest;
pub mod model;
pub mod service;
