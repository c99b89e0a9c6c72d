//! Parse LLM output into a raw extraction

use crate::error::ExtractorError;
use serde_json::{Map, Value};
use shipmail_domain::RawExtraction;
use tracing::warn;

/// Parse the oracle's reply into a [`RawExtraction`]
///
/// The reply may wrap the object in commentary or markdown fences; the text
/// between the first `{` and the last `}` is what gets parsed.
pub fn parse_llm_response(response: &str) -> Result<RawExtraction, ExtractorError> {
    let json_str = extract_json(response)?;

    let json: Value = serde_json::from_str(json_str)?;

    let obj = json
        .as_object()
        .ok_or_else(|| ExtractorError::InvalidFormat("Expected JSON object".to_string()))?;

    Ok(RawExtraction {
        origin_port_name: string_field(obj, "origin_port_name"),
        destination_port_name: string_field(obj, "destination_port_name"),
        incoterm: string_field(obj, "incoterm"),
        cargo_weight_kg: number_field(obj, "cargo_weight_kg"),
        cargo_cbm: number_field(obj, "cargo_cbm"),
        is_dangerous: bool_field(obj, "is_dangerous"),
    })
}

/// Slice from the first `{` to the last `}` inclusive
fn extract_json(response: &str) -> Result<&str, ExtractorError> {
    let start = response.find('{').ok_or(ExtractorError::NoJsonObject)?;
    let end = response.rfind('}').ok_or(ExtractorError::NoJsonObject)?;
    if end < start {
        return Err(ExtractorError::NoJsonObject);
    }
    Ok(&response[start..=end])
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            warn!("Dropping non-string '{}': {}", key, other);
            None
        }
    }
}

fn bool_field(obj: &Map<String, Value>, key: &str) -> bool {
    match obj.get(key) {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(other) => {
            warn!("Treating non-boolean '{}' as false: {}", key, other);
            false
        }
    }
}

fn number_field(obj: &Map<String, Value>, key: &str) -> Option<f64> {
    match obj.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => match s.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Some(n),
            _ => {
                warn!("Dropping non-numeric '{}': {:?}", key, s);
                None
            }
        },
        Some(other) => {
            warn!("Dropping non-numeric '{}': {}", key, other);
            None
        }
    }
}
