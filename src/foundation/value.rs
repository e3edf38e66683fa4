use std::collections::BTreeMap;
use std::fmt;

/// Flat mapping from parameter name to scalar value for the selected effect.
///
/// A `BTreeMap` keeps serialized sessions and CLI output in a stable order.
pub type ParamValues = BTreeMap<String, ParamValue>;

/// A scalar parameter value: a number or a string (colors are strings like `#ff00ff`).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Numeric value, rendered as plain decimal text.
    Number(f64),
    /// String value, rendered single-quoted.
    String(String),
}

impl ParamValue {
    /// Return the numeric payload, if any.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::String(_) => None,
        }
    }

    /// Return the string payload, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::String(s) => Some(s),
        }
    }

    /// Textual encoding used when substituting into a code template.
    ///
    /// Numbers use `f64` display (`1`, `2.5`, `0.1`, no unit, no exponent).
    /// Strings are wrapped in single quotes without escaping.
    pub fn render_literal(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::String(s) => format!("'{s}'"),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/value.rs"]
mod tests;
