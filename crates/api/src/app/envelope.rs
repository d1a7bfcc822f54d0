//! Uniform response envelope of every facade action.

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use materials_catalog::{Material, MaterialError};
use materials_parties::SupplierSummary;

/// Single-key JSON object: `{"materials": [...]}`, `{"error": "..."}`, ...
///
/// Failures are carried in the body; the HTTP status is always 200.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Envelope {
    Materials(Vec<Material>),
    Material(Material),
    Message(String),
    /// `[[code, label], ...]`
    Types(Vec<(&'static str, &'static str)>),
    Suppliers(Vec<SupplierSummary>),
    Error(String),
}

impl Envelope {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

impl From<MaterialError> for Envelope {
    fn from(err: MaterialError) -> Self {
        Self::Error(err.to_string())
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use materials_catalog::MaterialType;
    use serde_json::json;

    fn keys(env: &Envelope) -> Vec<String> {
        let value = serde_json::to_value(env).unwrap();
        value.as_object().unwrap().keys().cloned().collect()
    }

    #[test]
    fn every_variant_has_exactly_one_key() {
        let cases = [
            (Envelope::Materials(vec![]), "materials"),
            (Envelope::Message("Material deleted successfully".into()), "message"),
            (Envelope::Types(MaterialType::selection()), "types"),
            (Envelope::Suppliers(vec![]), "suppliers"),
            (Envelope::from(MaterialError::NotFound), "error"),
        ];
        for (env, key) in cases {
            assert_eq!(keys(&env), vec![key.to_string()]);
        }
    }

    #[test]
    fn types_serialize_as_pairs() {
        let value = serde_json::to_value(Envelope::Types(MaterialType::selection())).unwrap();
        assert_eq!(
            value,
            json!({ "types": [["fabric", "Fabric"], ["jeans", "Jeans"], ["cotton", "Cotton"]] })
        );
    }

    #[test]
    fn errors_carry_the_display_message() {
        let value = serde_json::to_value(Envelope::from(MaterialError::NotFound)).unwrap();
        assert_eq!(value, json!({ "error": "Material not found" }));
    }
}
