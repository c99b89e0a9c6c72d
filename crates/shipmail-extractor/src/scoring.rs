//! Field-by-field accuracy against a ground-truth file

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

/// Correct/total counts for one field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FieldScore {
    /// Comparisons that matched
    pub correct: usize,
    /// Comparisons made
    pub total: usize,
}

impl FieldScore {
    /// Percentage of matches, two decimals; 0.0 when nothing was compared
    pub fn accuracy(&self) -> f64 {
        percentage(self.correct, self.total)
    }
}

/// Result of comparing an output array with ground truth
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoreReport {
    /// Pairs compared (the shorter of the two arrays)
    pub records_compared: usize,
    /// Matching field comparisons
    pub correct: usize,
    /// Field comparisons made
    pub total: usize,
    /// Breakdown by field name
    pub fields: BTreeMap<String, FieldScore>,
}

impl ScoreReport {
    /// Overall percentage of matches, two decimals
    pub fn accuracy(&self) -> f64 {
        percentage(self.correct, self.total)
    }
}

/// Compare output records with ground truth, position by position
///
/// Only keys present in a ground-truth object are checked. A key missing
/// from the output counts as null.
pub fn score(output: &[Value], truth: &[Value]) -> ScoreReport {
    if output.len() != truth.len() {
        warn!(
            "Output has {} records but ground truth has {}; comparing the first {}",
            output.len(),
            truth.len(),
            output.len().min(truth.len())
        );
    }

    let mut report = ScoreReport::default();
    for (out, expected) in output.iter().zip(truth) {
        report.records_compared += 1;
        let Some(expected) = expected.as_object() else {
            warn!("Skipping non-object ground-truth entry: {}", expected);
            continue;
        };

        for (key, expected_value) in expected {
            let actual = out.get(key).unwrap_or(&Value::Null);
            let matched = values_match(actual, expected_value);

            let field = report.fields.entry(key.clone()).or_default();
            field.total += 1;
            report.total += 1;
            if matched {
                field.correct += 1;
                report.correct += 1;
            }
        }
    }
    report
}

/// Structural equality where numbers compare by value (`500 == 500.0`)
fn values_match(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_match(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, x)| ys.get(k).is_some_and(|y| values_match(x, y)))
        }
        _ => a == b,
    }
}

fn percentage(correct: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = correct as f64 / total as f64 * 100.0;
    (raw * 100.0).round() / 100.0
}
