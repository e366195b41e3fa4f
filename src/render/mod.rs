//! Rendering pipeline.
//!
//! The paint logic is a pure function over a [`PaintSurface`] trait so it
//! runs (and is tested) without a live canvas; the Canvas 2D implementation
//! is wasm-only.

pub mod paint;
pub mod surface;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use paint::{paint, sticky_labels, LabelHighlights};
pub use surface::{PaintOp, PaintSurface, RecordingSurface};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
