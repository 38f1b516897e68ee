//! Fail-soft numeric input
//!
//! Anything that is not a finite, non-negative number becomes `0.0`.
//! Nothing here ever returns an error.

use serde::{Deserialize, Serialize};

/// Coerce a raw number to a finite non-negative value.
#[inline]
pub fn coerce_non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Parse user text as a non-negative number, falling back to `0.0`.
pub fn parse_non_negative(text: &str) -> f64 {
    text.trim()
        .parse::<f64>()
        .map(coerce_non_negative)
        .unwrap_or(0.0)
}

/// Clamp a requested wall count to the four walls of the room.
#[inline]
pub fn clamp_wall_count(count: i64) -> u8 {
    count.clamp(0, 4) as u8
}

/// Wall count from raw input; fractional counts are truncated.
pub fn coerce_wall_count(input: &NumberInput) -> u8 {
    clamp_wall_count(input.coerce().trunc() as i64)
}

/// A number as it arrives from a form field or a JSON document.
///
/// Numbers, numeric strings and anything else (null, booleans, objects)
/// are all accepted; [`NumberInput::coerce`] resolves them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberInput {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl NumberInput {
    pub fn coerce(&self) -> f64 {
        match self {
            NumberInput::Number(value) => coerce_non_negative(*value),
            NumberInput::Text(text) => parse_non_negative(text),
            NumberInput::Other(_) => 0.0,
        }
    }
}

impl Default for NumberInput {
    fn default() -> Self {
        NumberInput::Number(0.0)
    }
}

impl From<f64> for NumberInput {
    fn from(value: f64) -> Self {
        NumberInput::Number(value)
    }
}

impl From<&str> for NumberInput {
    fn from(text: &str) -> Self {
        NumberInput::Text(text.to_string())
    }
}
