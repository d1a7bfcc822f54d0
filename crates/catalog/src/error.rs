use thiserror::Error;

use materials_core::DomainError;

/// Result type for catalog and store operations.
pub type MaterialResult<T> = Result<T, MaterialError>;

/// Failure of a catalog operation.
///
/// `Display` is the user-facing message; the facade puts it verbatim under
/// the `error` key of the response envelope.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MaterialError {
    /// The referenced material id does not exist.
    #[error("Material not found")]
    NotFound,

    /// A business rule (e.g. the buy-price floor) was violated.
    #[error("{0}")]
    ValidationFailed(String),

    /// Anything else: storage failures, broken references, malformed input.
    #[error("{0}")]
    Unexpected(String),
}

impl MaterialError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationFailed(msg.into())
    }

    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::Unexpected(msg.into())
    }

    /// Stable machine-readable name of the error kind (used in logs).
    pub fn kind(&self) -> &'static str {
        match self {
            MaterialError::NotFound => "not_found",
            MaterialError::ValidationFailed(_) => "validation_failed",
            MaterialError::Unexpected(_) => "unexpected",
        }
    }
}

impl From<DomainError> for MaterialError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => Self::ValidationFailed(msg),
            other @ DomainError::InvalidId(_) => Self::Unexpected(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_is_fixed() {
        assert_eq!(MaterialError::NotFound.to_string(), "Material not found");
    }

    #[test]
    fn domain_validation_maps_to_validation_failed() {
        let err: MaterialError = DomainError::validation("code cannot be empty").into();
        assert_eq!(err, MaterialError::ValidationFailed("code cannot be empty".to_string()));
        assert_eq!(err.kind(), "validation_failed");
    }

    #[test]
    fn invalid_id_maps_to_unexpected() {
        let err: MaterialError = DomainError::invalid_id("x").into();
        assert_eq!(err.kind(), "unexpected");
    }
}
