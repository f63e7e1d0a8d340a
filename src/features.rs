/// Feature vector construction from raw store rows.
///
/// Selects the single most recent row and validates it into the fixed
/// two-element feature vector the classifier was trained on. Earlier rows
/// in the input are accepted but never used — inference is single point
/// in time, not a sliding window.

use crate::model::{FeatureVector, RawRow, ValidationError, FEATURE_NAMES};

/// Builds a `FeatureVector` from the most recent row of a fetched window.
///
/// The last row in `rows` is the most recent reading (the store appends).
/// Cell 0 is Distance, cell 1 is FlowRate; both must parse as finite
/// decimal numbers. Leading/trailing whitespace around a cell is
/// tolerated, matching how the station firmware pads its writes.
///
/// # Errors
/// - `ValidationError::EmptyInput` — no rows to select from.
/// - `ValidationError::IncompleteRow` — the selected row does not have
///   exactly two cells.
/// - `ValidationError::NotNumeric` — a cell is not a finite decimal.
pub fn build_features(rows: &[RawRow]) -> Result<FeatureVector, ValidationError> {
    let latest = rows.last().ok_or(ValidationError::EmptyInput)?;

    if latest.len() != 2 {
        return Err(ValidationError::IncompleteRow {
            cells: latest.len(),
        });
    }

    let distance = parse_cell(&latest[0], FEATURE_NAMES[0])?;
    let flow_rate = parse_cell(&latest[1], FEATURE_NAMES[1])?;

    Ok(FeatureVector {
        distance,
        flow_rate,
    })
}

/// Parses one cell as a finite f64. Rejects "NaN"/"inf" spellings that
/// `f64::from_str` would otherwise accept — a non-finite reading can
/// never come from a real sensor and must not reach the classifier.
fn parse_cell(cell: &str, column: &'static str) -> Result<f64, ValidationError> {
    let not_numeric = || ValidationError::NotNumeric {
        column,
        raw: cell.to_string(),
    };

    let value: f64 = cell.trim().parse().map_err(|_| not_numeric())?;
    if !value.is_finite() {
        return Err(not_numeric());
    }

    Ok(value)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
