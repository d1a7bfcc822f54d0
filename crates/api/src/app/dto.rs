//! Request parameter parsing for facade actions.
//!
//! Bodies are plain JSON objects (the action's keyword parameters). An empty
//! body means "no parameters".

use serde::Deserialize;
use serde::de::DeserializeOwned;

use materials_catalog::{MaterialError, MaterialId, MaterialResult, MaterialType};

/// Parameters of "filter materials".
///
/// Extra keys are ignored and `type` may be any JSON value; only a known
/// type code selects anything.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FilterParams {
    #[serde(rename = "type", default)]
    pub kind: Option<serde_json::Value>,
}

impl FilterParams {
    /// The requested type; absent, non-string or unrecognised values match nothing.
    pub fn material_type(&self) -> Option<MaterialType> {
        self.kind
            .as_ref()
            .and_then(serde_json::Value::as_str)
            .and_then(|s| s.parse().ok())
    }
}

pub fn parse_params<T: DeserializeOwned>(body: &[u8]) -> MaterialResult<T> {
    let value = if body.iter().all(u8::is_ascii_whitespace) {
        serde_json::Value::Object(serde_json::Map::new())
    } else {
        serde_json::from_slice(body)
            .map_err(|e| MaterialError::validation(format!("invalid request body: {e}")))?
    };
    serde_json::from_value(value).map_err(|e| MaterialError::validation(format!("invalid params: {e}")))
}

pub fn parse_material_id(raw: &str) -> MaterialResult<MaterialId> {
    raw.parse()
}
