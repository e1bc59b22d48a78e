//! Error types for the ClassA pipeline.

use thiserror::Error;

/// Main error type for ClassA entropy operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClassAError {
    /// An input failed its pre-condition (range, type or unknown name)
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Too few points survive coarse-graining and reconstruction
    #[error("Insufficient length: need at least {required} points, got {got}")]
    InsufficientLength { required: usize, got: usize },

    /// A pluggable clusterer failed
    #[error("Clustering error: {0}")]
    Clustering(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for ClassA operations.
pub type Result<T> = std::result::Result<T, ClassAError>;

impl ClassAError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        ClassAError::InvalidParameter(msg.into())
    }

    /// True when the caller's own inputs caused the failure
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ClassAError::InvalidParameter(_) | ClassAError::InsufficientLength { .. }
        )
    }
}

#[cfg(feature = "wasm")]
impl From<ClassAError> for wasm_bindgen::JsValue {
    fn from(err: ClassAError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
