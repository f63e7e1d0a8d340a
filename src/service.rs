/// Prediction pipeline orchestration.
///
/// Runs the strictly linear fetch → validate → predict → map sequence for
/// one request and shapes the outcome into a `PredictionResult`. Every
/// failure along the way lands in the `Failure` case with a description
/// of what went wrong; the caller always gets a result, never an error —
/// "no verdict available right now" is a domain condition, not a
/// transport fault.

use crate::classifier::FloodClassifier;
use crate::features::build_features;
use crate::model::{PredictionResult, RawRow, Verdict, NOT_ENOUGH_DATA};
use std::sync::Arc;

/// Source of the most recent raw readings. The production implementation
/// is `ingest::sheets::SheetsSource`; tests substitute a canned one.
pub trait ReadingSource {
    /// Returns up to the two most recent rows, oldest-first. An empty
    /// result means no fresh data is available — a normal condition.
    fn fetch_latest(&self) -> Vec<RawRow>;
}

/// Orchestrates one prediction request end to end.
///
/// Holds the process-lifetime classifier behind an `Arc` so request
/// threads share a single immutable model; the reading source performs a
/// fresh network round trip per call, so concurrent requests never share
/// fetch state.
pub struct PredictionService<S: ReadingSource> {
    source: S,
    classifier: Arc<FloodClassifier>,
}

impl<S: ReadingSource> PredictionService<S> {
    pub fn new(source: S, classifier: Arc<FloodClassifier>) -> PredictionService<S> {
        PredictionService { source, classifier }
    }

    /// Runs the full pipeline for one request.
    ///
    /// Stage by stage: fetch the latest rows; build the feature vector
    /// from the most recent one; classify; map the label to a verdict.
    /// The success case reports the validated distance and flow-rate —
    /// the exact numbers the classifier saw, not a re-fetch.
    pub fn handle_prediction(&self) -> PredictionResult {
        let rows = self.source.fetch_latest();
        if rows.is_empty() {
            return PredictionResult::failure(NOT_ENOUGH_DATA);
        }

        let features = match build_features(&rows) {
            Ok(features) => features,
            Err(e) => return PredictionResult::failure(e.to_string()),
        };

        let label = match self.classifier.predict(&features) {
            Ok(label) => label,
            Err(e) => return PredictionResult::failure(e.to_string()),
        };

        PredictionResult::Success {
            distance: features.distance,
            flow_rate: features.flow_rate,
            verdict: Verdict::from_label(label),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
