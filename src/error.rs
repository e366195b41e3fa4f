//! Structured error types for heatgrid.
//!
//! Validation failures surface to the caller; rendering-stage issues are
//! absorbed and logged, so only data formatting and the JS boundary produce
//! values of these types.

/// All errors that can occur while formatting or rendering matrix data.
#[derive(Debug, thiserror::Error)]
pub enum HeatgridError {
    /// Malformed input data (empty matrix, ragged rows, bad label lengths).
    #[error("Invalid matrix data: {0}")]
    Format(String),

    /// Rendering error (missing canvas context, detached DOM node).
    #[error("Render error: {0}")]
    Render(String),

    /// JSON serialization error at the host boundary.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HeatgridError>;

impl From<String> for HeatgridError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for HeatgridError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<HeatgridError> for wasm_bindgen::JsValue {
    fn from(e: HeatgridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
