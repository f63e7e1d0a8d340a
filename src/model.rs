/// Shared data types for the flood-risk prediction service.
///
/// Everything here is request-scoped except the canonical feature schema,
/// which is a compile-time constant: the classifier was trained on features
/// in this exact order and naming, and a reordering silently changes
/// prediction meaning without raising an error. Any code that builds or
/// consumes feature vectors must go through these types.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Canonical feature schema
// ---------------------------------------------------------------------------

/// Feature names in training order. Index 0 is distance-to-water-surface,
/// index 1 is flow-rate. The model artifact must declare the identical
/// order or loading fails (see `classifier::FloodClassifier::load`).
pub const FEATURE_NAMES: [&str; 2] = ["Distance", "FlowRate"];

// ---------------------------------------------------------------------------
// Readings and features
// ---------------------------------------------------------------------------

/// One row of textual cells exactly as returned by the tabular store.
/// May hold 0, 1, or more cells; validation happens in `features`.
pub type RawRow = Vec<String>;

/// Validated numeric reading pair, in training order.
///
/// Invariant: both fields are finite. A `FeatureVector` is only constructed
/// by `features::build_features` after successful parsing of a row with
/// exactly two cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    pub distance: f64,
    pub flow_rate: f64,
}

impl FeatureVector {
    /// Features as a slice in the canonical order, for dotting against
    /// model coefficients.
    pub fn as_array(&self) -> [f64; 2] {
        [self.distance, self.flow_rate]
    }
}

// ---------------------------------------------------------------------------
// Verdict
// ---------------------------------------------------------------------------

/// Human-facing binary classification result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    FloodRisk,
    NoFloodRisk,
}

impl Verdict {
    /// Maps the classifier's binary label to a verdict. Total function:
    /// label 1 means flood risk; any other label is treated as no flood
    /// risk (fail-open toward the less alarming verdict).
    pub fn from_label(label: u8) -> Verdict {
        if label == 1 {
            Verdict::FloodRisk
        } else {
            Verdict::NoFloodRisk
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::FloodRisk => "Flood Risk",
            Verdict::NoFloodRisk => "No Flood Risk",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Prediction result and wire shape
// ---------------------------------------------------------------------------

/// Failure text for the no-data condition, shared by the fetch stage and
/// feature validation so callers see one stable message for either path.
pub const NOT_ENOUGH_DATA: &str = "Not enough data for prediction";

/// Outcome of one prediction request. Either all success fields are
/// present or none are — there is no partially populated state.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionResult {
    Success {
        distance: f64,
        flow_rate: f64,
        verdict: Verdict,
    },
    Failure {
        message: String,
    },
}

impl PredictionResult {
    pub fn failure(message: impl Into<String>) -> PredictionResult {
        PredictionResult::Failure {
            message: message.into(),
        }
    }
}

/// Fixed-shape response object for the prediction endpoint. Both result
/// cases serialize to this one shape; on failure the numeric fields are
/// zero-valued placeholders and `Prediction` carries the failure text.
/// Callers must inspect the payload, not the HTTP status, to detect a
/// domain failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    #[serde(rename = "Distance")]
    pub distance: f64,
    #[serde(rename = "FlowRate")]
    pub flow_rate: f64,
    #[serde(rename = "Prediction")]
    pub prediction: String,
}

impl From<PredictionResult> for PredictionResponse {
    fn from(result: PredictionResult) -> Self {
        match result {
            PredictionResult::Success {
                distance,
                flow_rate,
                verdict,
            } => PredictionResponse {
                distance,
                flow_rate,
                prediction: verdict.as_str().to_string(),
            },
            PredictionResult::Failure { message } => PredictionResponse {
                distance: 0.0,
                flow_rate: 0.0,
                prediction: message,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// A fetched row could not be turned into a feature vector.
///
/// Messages name the specific field or condition that failed — they are
/// surfaced verbatim in the endpoint response to aid operational
/// diagnosis, so a generic "invalid data" is never acceptable here.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// No rows were available to build features from.
    EmptyInput,
    /// The most recent row did not have exactly two cells.
    IncompleteRow { cells: usize },
    /// A cell could not be parsed as a finite decimal number.
    NotNumeric { column: &'static str, raw: String },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyInput => write!(f, "{}", NOT_ENOUGH_DATA),
            ValidationError::IncompleteRow { cells } => write!(
                f,
                "Latest reading has {} cell(s); expected exactly 2 (Distance, FlowRate)",
                cells
            ),
            ValidationError::NotNumeric { column, raw } => {
                write!(f, "{} value '{}' is not a valid number", column, raw)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// The classifier failed on a well-formed feature vector.
#[derive(Debug, Clone, PartialEq)]
pub enum InferenceError {
    /// The decision function produced a value that is not a finite number.
    NonFiniteScore { distance: f64, flow_rate: f64 },
}

impl std::fmt::Display for InferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InferenceError::NonFiniteScore {
                distance,
                flow_rate,
            } => write!(
                f,
                "Classifier produced a non-finite decision score for Distance={}, FlowRate={}",
                distance, flow_rate
            ),
        }
    }
}

impl std::error::Error for InferenceError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
