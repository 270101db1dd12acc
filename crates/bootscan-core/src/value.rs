//! Scalar values for boot parameters.

use std::fmt;

use serde::Serialize;

/// A parameter value with its inferred scalar type.
///
/// Inference is the single source of typing for the whole analyzer: the same
/// rule is applied to `param set` values and to condition operands, so a
/// parameter written as `4001` and a comparison against `4001` always land on
/// the same variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(f64),
    Text(String),
}

impl ParamValue {
    /// Infer the type of a raw script token.
    ///
    /// Numeric when the token parses fully as a decimal number, otherwise the
    /// original text unchanged. Never fails: malformed numeric-looking input
    /// falls back to text.
    pub fn infer(token: &str) -> Self {
        match token.parse::<f64>() {
            Ok(n) => ParamValue::Number(n),
            Err(_) => ParamValue::Text(token.to_string()),
        }
    }

    /// The numeric value, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParamValue::Number(n) => Some(*n),
            ParamValue::Text(_) => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Number(n) => write!(f, "{}", n),
            ParamValue::Text(s) => write!(f, "{}", s),
        }
    }
}
