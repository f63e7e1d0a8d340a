/// Pre-trained flood classifier: artifact loading and inference.
///
/// The model artifact is a JSON-serialized logistic regression exported by
/// the training pipeline: feature names (in training order), one
/// coefficient per feature, an intercept, and the decision threshold.
/// It is loaded exactly once at process startup and held immutably for
/// the life of the process — a loading failure is fatal, since the
/// service cannot produce a verdict without a model.
///
/// Inference is a pure function of the feature vector, so a single
/// classifier instance is shared across request threads without locking.

use crate::model::{FeatureVector, InferenceError, FEATURE_NAMES};
use serde::Deserialize;
use std::fs;
use std::path::Path;

// ---------------------------------------------------------------------------
// Artifact format
// ---------------------------------------------------------------------------

/// On-disk shape of the model artifact.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelArtifact {
    pub model_type: String,
    /// Feature names in the order the model was trained with. Must match
    /// `model::FEATURE_NAMES` exactly — order and spelling.
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    pub decision_threshold: f64,
}

// ---------------------------------------------------------------------------
// Loading errors
// ---------------------------------------------------------------------------

/// Model artifact could not be loaded or does not match the serving schema.
/// All of these are fatal at startup.
#[derive(Debug)]
pub enum ModelError {
    /// The artifact file could not be read.
    Unreadable { path: String, reason: String },
    /// The file exists but is not a valid artifact JSON document.
    Malformed { path: String, reason: String },
    /// The artifact parsed but disagrees with the serving schema.
    SchemaMismatch(String),
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::Unreadable { path, reason } => {
                write!(f, "Failed to read model artifact '{}': {}\n\n", path, reason)?;
                write!(f, "  The service cannot start without a model.\n")?;
                write!(f, "  Check the [model] path in service.toml, or re-export the\n")?;
                write!(f, "  artifact from the training pipeline.")
            }
            ModelError::Malformed { path, reason } => {
                write!(f, "Model artifact '{}' is not valid JSON: {}\n\n", path, reason)?;
                write!(f, "  Expected shape:\n")?;
                write!(f, "  {{ \"model_type\": \"logistic_regression\",\n")?;
                write!(f, "    \"feature_names\": [\"Distance\", \"FlowRate\"],\n")?;
                write!(f, "    \"coefficients\": [..], \"intercept\": .., \"decision_threshold\": .. }}")
            }
            ModelError::SchemaMismatch(reason) => {
                write!(f, "Model artifact does not match the serving schema: {}\n\n", reason)?;
                write!(f, "  The classifier was trained on features in a fixed order\n")?;
                write!(f, "  ({:?}); serving with a different order would silently\n", FEATURE_NAMES)?;
                write!(f, "  change prediction meaning, so the mismatch is refused outright.")
            }
        }
    }
}

impl std::error::Error for ModelError {}

// ---------------------------------------------------------------------------
// Classifier
// ---------------------------------------------------------------------------

/// Loaded binary flood classifier. `predict` is pure; the struct is
/// immutable after construction.
pub struct FloodClassifier {
    coefficients: [f64; 2],
    intercept: f64,
    threshold: f64,
}

impl FloodClassifier {
    /// Loads and validates the model artifact from disk.
    pub fn load(path: &str) -> Result<FloodClassifier, ModelError> {
        let contents = fs::read_to_string(Path::new(path)).map_err(|e| ModelError::Unreadable {
            path: path.to_string(),
            reason: e.to_string(),
        })?;

        let artifact: ModelArtifact =
            serde_json::from_str(&contents).map_err(|e| ModelError::Malformed {
                path: path.to_string(),
                reason: e.to_string(),
            })?;

        FloodClassifier::from_artifact(artifact)
    }

    /// Validates an already-deserialized artifact against the serving
    /// schema. Split out from `load` so tests can build classifiers
    /// without touching the filesystem.
    pub fn from_artifact(artifact: ModelArtifact) -> Result<FloodClassifier, ModelError> {
        if artifact.model_type != "logistic_regression" {
            return Err(ModelError::SchemaMismatch(format!(
                "unsupported model_type '{}'",
                artifact.model_type
            )));
        }

        if artifact.feature_names != FEATURE_NAMES {
            return Err(ModelError::SchemaMismatch(format!(
                "feature_names {:?} != expected {:?}",
                artifact.feature_names, FEATURE_NAMES
            )));
        }

        if artifact.coefficients.len() != FEATURE_NAMES.len() {
            return Err(ModelError::SchemaMismatch(format!(
                "expected {} coefficients, artifact has {}",
                FEATURE_NAMES.len(),
                artifact.coefficients.len()
            )));
        }

        if !artifact.intercept.is_finite() {
            return Err(ModelError::SchemaMismatch(
                "intercept is not a finite number".to_string(),
            ));
        }

        if !(artifact.decision_threshold > 0.0 && artifact.decision_threshold < 1.0) {
            return Err(ModelError::SchemaMismatch(format!(
                "decision_threshold {} must lie strictly between 0 and 1",
                artifact.decision_threshold
            )));
        }

        Ok(FloodClassifier {
            coefficients: [artifact.coefficients[0], artifact.coefficients[1]],
            intercept: artifact.intercept,
            threshold: artifact.decision_threshold,
        })
    }

    /// Predicts the binary flood label for a feature vector: 1 when the
    /// flood probability reaches the decision threshold, else 0.
    pub fn predict(&self, features: &FeatureVector) -> Result<u8, InferenceError> {
        let x = features.as_array();
        let score =
            self.coefficients[0] * x[0] + self.coefficients[1] * x[1] + self.intercept;

        // Finite inputs with extreme coefficients can still overflow.
        if !score.is_finite() {
            return Err(InferenceError::NonFiniteScore {
                distance: features.distance,
                flow_rate: features.flow_rate,
            });
        }

        let probability = sigmoid(score);
        Ok(u8::from(probability >= self.threshold))
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
