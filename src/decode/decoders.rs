//! JSON record extraction

use crate::error::{Error, Result};
use serde_json::Value;

/// JSON decoder with optional record path extraction
#[derive(Debug, Clone, Default)]
pub struct JsonDecoder {
    /// JSONPath to extract records
    record_path: Option<String>,
}

impl JsonDecoder {
    /// Create a decoder that treats the whole body as the record list
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a JSON decoder with a record path
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            record_path: Some(path.into()),
        }
    }

    /// The configured record path
    pub fn record_path(&self) -> Option<&str> {
        self.record_path.as_deref()
    }

    /// Parse a body and extract its records
    pub fn decode(&self, body: &str) -> Result<Vec<Value>> {
        let value: Value = serde_json::from_str(body)?;
        self.records(&value)
    }

    /// Extract records from an already parsed body
    ///
    /// A missing location yields no records; a single object at the
    /// location yields one record.
    pub fn records(&self, value: &Value) -> Result<Vec<Value>> {
        let Some(path) = &self.record_path else {
            return Ok(match value {
                Value::Array(arr) => arr.clone(),
                Value::Null => vec![],
                _ => vec![value.clone()],
            });
        };

        if is_simple_path(path) {
            return Ok(match extract_simple_path(value, path) {
                Some(Value::Array(arr)) => arr.clone(),
                Some(Value::Null) | None => vec![],
                Some(v) => vec![v.clone()],
            });
        }

        extract_with_jsonpath(value, path).map_err(|e| Error::RecordExtraction {
            path: path.clone(),
            message: e.to_string(),
        })
    }
}

/// Look up a dotted path (`$.meta.page`) in a JSON value
pub fn extract_value<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    extract_simple_path(value, path)
}

/// Look up a dotted path and read it as a non-negative integer
///
/// Accepts JSON integers, integral floats and numeric strings.
pub fn extract_u64(value: &Value, path: &str) -> Option<u64> {
    match extract_value(value, path)? {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Dotted names with an optional trailing `[*]`
fn is_simple_path(path: &str) -> bool {
    let path = path.strip_prefix("$.").unwrap_or(path);
    let path = path.strip_suffix("[*]").unwrap_or(path);
    !path.is_empty()
        && path
            .split('.')
            .all(|part| !part.is_empty() && !part.contains(['[', ']', '*', '?', '@', '(']))
}

fn extract_simple_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let path = path.strip_prefix("$.").unwrap_or(path);
    let path = path.strip_suffix("[*]").unwrap_or(path);
    if path.is_empty() || path == "$" {
        return Some(value);
    }

    let mut current = value;
    for part in path.split('.') {
        match current {
            Value::Object(map) => {
                current = map.get(part)?;
            }
            _ => return None,
        }
    }

    Some(current)
}

/// Extract records using jsonpath-rust
fn extract_with_jsonpath(value: &Value, path: &str) -> Result<Vec<Value>> {
    use jsonpath_rust::JsonPath;

    let jp = JsonPath::try_from(path).map_err(|e| Error::JsonPath {
        message: format!("Invalid JSONPath: {e}"),
    })?;

    match jp.find(value) {
        Value::Array(arr) => Ok(arr),
        Value::Null => Ok(vec![]),
        other => Ok(vec![other]),
    }
}
