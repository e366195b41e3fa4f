//! heatgrid - interactive matrix heatmap for the web
//!
//! Renders a 2-D numeric matrix as a color-encoded grid in the browser via
//! WebAssembly and Canvas 2D:
//! - Square cells sized to fill the viewport, with optional value labels
//! - Row/column labels on an SVG layer; click to spotlight, hover to preview
//! - Arrow keys cycle the colormap and adjust contrast
//! - Full synchronous repaint per interaction, no retained draw state
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { HeatmapView, formatData } from 'heatgrid';
//! await init();
//! const data = formatData({ matrix, rows, columns });
//! const view = new HeatmapView(container, 600, 600, data, { labels: true });
//! ```

// Core (target-independent)
pub mod colormap;
pub mod controller;
pub mod data;
pub mod error;
pub mod layout;
pub mod scale;
pub mod selection;

// Rendering and the browser shell
pub mod render;
pub mod viewer;

use wasm_bindgen::prelude::*;

pub use data::{format_data, FormattedMatrix, MatrixEntry, RawMatrix};
pub use viewer::{HeatmapView, ViewOptions, ViewState};

/// Format a raw matrix (`{ matrix, rows?, columns?, colormap? }`) into the
/// entry list a `HeatmapView` consumes.
///
/// # Errors
/// Returns an error for an empty or ragged matrix, or label arrays whose
/// length does not match the matrix shape.
#[wasm_bindgen(js_name = formatData)]
pub fn format_data_js(raw: JsValue) -> Result<JsValue, JsValue> {
    let raw: RawMatrix = serde_wasm_bindgen::from_value(raw)
        .map_err(|e| JsValue::from_str(&format!("Invalid matrix data: {e}")))?;
    let formatted = format_data(&raw).map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_wasm_bindgen::to_value(&formatted)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

/// Format a raw matrix provided as a JSON string and return the formatted
/// matrix as JSON. Convenience for hosts without `JsValue` interop.
///
/// # Errors
/// Returns an error for invalid JSON or malformed matrix data.
pub fn format_data_json(raw: &str) -> error::Result<String> {
    let raw: RawMatrix = serde_json::from_str(raw)?;
    let formatted = format_data(&raw)?;
    Ok(serde_json::to_string(&formatted)?)
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
