//! Canonical map type and multi-value normalization.

use serde_json::{Map, Value};

use crate::error::{EchoError, ParseErrors};

/// Canonical key-value representation of a request or response.
///
/// Values are strings, string lists, nested maps, or whatever a body parser
/// produced.
pub type Dict = Map<String, Value>;

/// Normalize a multi-valued mapping (headers, query, form).
///
/// A key with one value collapses to that string; a key with several keeps
/// them as a list in their original order. Keys without values are dropped.
pub fn map_values<I, K>(input: I) -> Dict
where
    I: IntoIterator<Item = (K, Vec<String>)>,
    K: Into<String>,
{
    let mut out = Dict::new();

    for (key, mut values) in input {
        let value = match values.len() {
            0 => continue,
            1 => Value::String(values.remove(0)),
            _ => Value::Array(values.into_iter().map(Value::String).collect()),
        };
        out.insert(key.into(), value);
    }

    out
}

/// `None` for a missing or empty map.
pub fn omit_empty(dict: impl Into<Option<Dict>>) -> Option<Dict> {
    dict.into().filter(|d| !d.is_empty())
}

/// Insert `value` under `key` only when it is a non-empty map.
pub(crate) fn insert_non_empty(out: &mut Dict, key: &str, value: impl Into<Option<Dict>>) {
    if let Some(dict) = omit_empty(value) {
        out.insert(key.to_string(), Value::Object(dict));
    }
}

/// Result of mapping one request or response.
///
/// The map is always present; `error` carries every non-fatal problem that
/// was collected on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Mapping {
    pub dict: Dict,
    pub error: Option<ParseErrors>,
}

impl Mapping {
    pub(crate) fn new(dict: Dict, errors: Vec<EchoError>) -> Self {
        let error = if errors.is_empty() {
            None
        } else {
            Some(ParseErrors::new(errors))
        };
        Self { dict, error }
    }

    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    /// `Ok` with the map when nothing failed, otherwise the partial map and
    /// the composite error.
    pub fn into_result(self) -> Result<Dict, (Dict, ParseErrors)> {
        match self.error {
            None => Ok(self.dict),
            Some(err) => Err((self.dict, err)),
        }
    }
}
