//! Main `HeatmapView` struct - the browser entry point.
//!
//! The DOM-free component state lives in [`ViewState`]; the wasm-exported
//! `HeatmapView` wraps it in shared state, assembles the container DOM
//! (SVG label layer + canvas grid), and wires pointer/keyboard events.
//! Everything touching web-sys is gated to wasm32, mirroring the split
//! between the testable core and the browser shell.

mod events;

use serde::Deserialize;

use crate::controller::{Controller, Key};
use crate::data::FormattedMatrix;
use crate::error::Result;
use crate::layout::GridLayout;
use crate::render::{paint, sticky_labels, LabelHighlights, PaintSurface};
use crate::selection::Axis;

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::closure::Closure;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use web_sys::{
    Document, Element, HtmlCanvasElement, HtmlDivElement, HtmlElement, KeyboardEvent, MouseEvent,
};

#[cfg(target_arch = "wasm32")]
use crate::render::CanvasSurface;

/// Host-supplied view options.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ViewOptions {
    /// Draw the numeric value inside each cell.
    #[serde(default = "default_labels")]
    pub labels: bool,
}

fn default_labels() -> bool {
    true
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self { labels: true }
    }
}

/// The complete DOM-free state of one heatmap instance.
///
/// Owns the formatted data, derived geometry, and the interaction
/// controller. The wasm shell (and the test suite) drive this and hand a
/// [`PaintSurface`] to [`repaint_into`](Self::repaint_into).
#[derive(Debug, Clone)]
pub struct ViewState {
    data: FormattedMatrix,
    layout: Option<GridLayout>,
    controller: Controller,
    show_values: bool,
    width: f64,
    height: f64,
}

impl ViewState {
    /// New view over formatted data in a `width` x `height` viewport.
    pub fn new(data: FormattedMatrix, width: f64, height: f64, options: ViewOptions) -> Self {
        let controller = Controller::new(&data);
        let layout = Self::layout_for(&data, width, height);
        Self {
            data,
            layout,
            controller,
            show_values: options.labels,
            width,
            height,
        }
    }

    fn layout_for(data: &FormattedMatrix, width: f64, height: f64) -> Option<GridLayout> {
        GridLayout::compute(
            width,
            height,
            data.nrow,
            data.ncol,
            data.rows.is_some(),
            data.columns.is_some(),
        )
    }

    /// Replace the matrix wholesale: fresh controller, recomputed geometry.
    pub fn set_data(&mut self, data: FormattedMatrix) {
        self.controller = Controller::new(&data);
        self.layout = Self::layout_for(&data, self.width, self.height);
        self.data = data;
    }

    /// Append rows below the current matrix, keeping zoom and palette.
    ///
    /// # Errors
    /// Returns [`crate::error::HeatgridError::Format`] when the appended
    /// shape or labels disagree with the existing matrix.
    pub fn append_data(&mut self, more: FormattedMatrix) -> Result<()> {
        self.data.append(more)?;
        self.controller.rebind(&self.data);
        self.layout = Self::layout_for(&self.data, self.width, self.height);
        Ok(())
    }

    /// Apply a key press; true when consumed (repaint + preventDefault).
    pub fn key(&mut self, key: Key) -> bool {
        self.controller.key(key)
    }

    /// Toggle the selection slot for a clicked label.
    pub fn label_click(&mut self, axis: Axis, index: usize) -> bool {
        self.controller.label_click(axis, index)
    }

    /// Clear the selection (background double-click).
    pub fn reset(&mut self) -> bool {
        self.controller.reset()
    }

    /// Full repaint onto `surface`. Returns false (and paints nothing)
    /// when the geometry is degenerate.
    pub fn repaint_into<S: PaintSurface>(&self, surface: &mut S) -> bool {
        let Some(layout) = &self.layout else {
            return false;
        };
        paint(
            surface,
            &self.data,
            layout,
            self.controller.colors(),
            &self.controller.selection,
            self.show_values,
        );
        true
    }

    /// Sticky highlight flags for the axis labels.
    pub fn sticky(&self) -> LabelHighlights {
        sticky_labels(&self.data, &self.controller.selection)
    }

    pub fn data(&self) -> &FormattedMatrix {
        &self.data
    }

    pub fn layout(&self) -> Option<&GridLayout> {
        self.layout.as_ref()
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }
}

/// Shared state accessed by the DOM event handlers (wasm32 only).
#[cfg(target_arch = "wasm32")]
pub(crate) struct SharedState {
    pub(crate) view: ViewState,
    pub(crate) surface: Option<CanvasSurface>,
    pub(crate) canvas: HtmlCanvasElement,
    pub(crate) svg: Element,
    pub(crate) row_labels: Vec<Element>,
    pub(crate) col_labels: Vec<Element>,
}

/// The interactive heatmap component exported to JavaScript.
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub struct HeatmapView {
    #[cfg(target_arch = "wasm32")]
    state: Rc<RefCell<SharedState>>,
    #[cfg(target_arch = "wasm32")]
    #[allow(dead_code)] // Kept alive so the DOM callbacks stay valid
    key_closure: Option<Closure<dyn FnMut(KeyboardEvent)>>,
    #[cfg(target_arch = "wasm32")]
    #[allow(dead_code)]
    reset_closure: Option<Closure<dyn FnMut(MouseEvent)>>,
    #[cfg(target_arch = "wasm32")]
    #[allow(dead_code)]
    label_closures: Vec<Closure<dyn FnMut(MouseEvent)>>,
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl HeatmapView {
    /// Create a heatmap inside `container`.
    ///
    /// `data` is a formatted matrix (see `formatData`), `options` is
    /// `{ labels?: boolean }` or undefined. The container receives
    /// `tabindex="-1"` and focus so arrow keys work without a focusable
    /// ancestor.
    #[wasm_bindgen(constructor)]
    pub fn new(
        container: HtmlElement,
        width: f64,
        height: f64,
        data: JsValue,
        options: JsValue,
    ) -> std::result::Result<HeatmapView, JsValue> {
        console_error_panic_hook::set_once();

        let formatted: FormattedMatrix = serde_wasm_bindgen::from_value(data)
            .map_err(|e| JsValue::from_str(&format!("Invalid matrix data: {e}")))?;
        let options: ViewOptions = if options.is_undefined() || options.is_null() {
            ViewOptions::default()
        } else {
            serde_wasm_bindgen::from_value(options)
                .map_err(|e| JsValue::from_str(&format!("Invalid options: {e}")))?
        };

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let view = ViewState::new(formatted, width, height, options);
        let (inner, svg, canvas) = Self::build_dom(&document, &view, width, height)?;
        container.append_child(&inner)?;

        let surface = CanvasSurface::new(&canvas).ok();
        let state = Rc::new(RefCell::new(SharedState {
            view,
            surface,
            canvas,
            svg: svg.clone(),
            row_labels: Vec::new(),
            col_labels: Vec::new(),
        }));

        let label_closures = events::build_labels(&document, &state)?;

        // Reset on background double-click (the svg layer covers the grid).
        let reset_closure = {
            let state = Rc::clone(&state);
            let closure = Closure::wrap(Box::new(move |_event: MouseEvent| {
                events::internal_reset(&state);
            }) as Box<dyn FnMut(MouseEvent)>);
            svg.add_event_listener_with_callback("dblclick", closure.as_ref().unchecked_ref())
                .ok();
            Some(closure)
        };

        // Keyboard focus goes to the container itself.
        container.set_attribute("tabindex", "-1")?;
        let _ = container.focus();
        let key_closure = {
            let state = Rc::clone(&state);
            let closure = Closure::wrap(Box::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_dom(&event.key()) {
                    event.prevent_default();
                    events::internal_key_down(&state, key);
                }
            }) as Box<dyn FnMut(KeyboardEvent)>);
            container
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
                .ok();
            Some(closure)
        };

        events::repaint(&state);

        Ok(HeatmapView {
            state,
            key_closure,
            reset_closure,
            label_closures,
        })
    }

    /// Explicit full repaint.
    pub fn render(&self) {
        events::repaint(&self.state);
    }

    /// Replace the matrix wholesale and re-render.
    #[wasm_bindgen(js_name = updateData)]
    pub fn update_data(&mut self, data: JsValue) -> std::result::Result<(), JsValue> {
        let formatted: FormattedMatrix = serde_wasm_bindgen::from_value(data)
            .map_err(|e| JsValue::from_str(&format!("Invalid matrix data: {e}")))?;
        {
            let mut s = self.state.borrow_mut();
            s.view.set_data(formatted);
            Self::sync_canvas(&s);
        }
        self.rebuild_labels()?;
        events::repaint(&self.state);
        Ok(())
    }

    /// Append formatted rows below the current matrix and re-render.
    #[wasm_bindgen(js_name = appendData)]
    pub fn append_data(&mut self, data: JsValue) -> std::result::Result<(), JsValue> {
        let formatted: FormattedMatrix = serde_wasm_bindgen::from_value(data)
            .map_err(|e| JsValue::from_str(&format!("Invalid matrix data: {e}")))?;
        {
            let mut s = self.state.borrow_mut();
            s.view.append_data(formatted)?;
            Self::sync_canvas(&s);
        }
        self.rebuild_labels()?;
        events::repaint(&self.state);
        Ok(())
    }

    /// Name of the palette currently in use.
    #[wasm_bindgen(getter, js_name = paletteName)]
    pub fn palette_name(&self) -> String {
        self.state.borrow().view.controller().palette_name().to_string()
    }

    /// Current contrast zoom scalar.
    #[wasm_bindgen(getter)]
    pub fn zoom(&self) -> f64 {
        self.state.borrow().view.controller().zoom()
    }
}

#[cfg(target_arch = "wasm32")]
impl HeatmapView {
    /// Container div, absolutely-positioned svg label layer, and the canvas
    /// offset by the computed margins.
    fn build_dom(
        document: &Document,
        view: &ViewState,
        width: f64,
        height: f64,
    ) -> std::result::Result<(HtmlDivElement, Element, HtmlCanvasElement), JsValue> {
        let inner = document
            .create_element("div")?
            .dyn_into::<HtmlDivElement>()?;
        let style = inner.style();
        style.set_property("position", "relative")?;
        style.set_property("width", &format!("{width}px"))?;
        style.set_property("height", &format!("{height}px"))?;

        let svg = document.create_element_ns(Some("http://www.w3.org/2000/svg"), "svg")?;
        svg.set_attribute("width", &format!("{width}"))?;
        svg.set_attribute("height", &format!("{height}"))?;
        svg.set_attribute("style", "position: absolute")?;
        inner.append_child(&svg)?;

        let canvas = document
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()?;
        inner.append_child(&canvas)?;

        apply_canvas_geometry(&canvas, view);

        Ok((inner, svg, canvas))
    }

    /// Resize the canvas and its margins to the current layout.
    fn sync_canvas(s: &SharedState) {
        apply_canvas_geometry(&s.canvas, &s.view);
    }

    /// Tear down and rebuild the svg label nodes for the current data.
    fn rebuild_labels(&mut self) -> std::result::Result<(), JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        {
            let mut s = self.state.borrow_mut();
            while let Some(child) = s.svg.first_child() {
                let _ = s.svg.remove_child(&child);
            }
            s.row_labels.clear();
            s.col_labels.clear();
        }
        self.label_closures = events::build_labels(&document, &self.state)?;
        Ok(())
    }
}

/// Size the canvas and its margins to the current layout; a degenerate
/// layout collapses the canvas instead of leaving stale pixels.
#[cfg(target_arch = "wasm32")]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn apply_canvas_geometry(canvas: &HtmlCanvasElement, view: &ViewState) {
    let Some(layout) = view.layout() else {
        canvas.set_width(0);
        canvas.set_height(0);
        return;
    };
    canvas.set_width(layout.canvas_width.round().max(0.0) as u32);
    canvas.set_height(layout.canvas_height.round().max(0.0) as u32);
    let style = canvas.style();
    let _ = style.set_property("margin-left", &format!("{}px", layout.margin_left));
    let _ = style.set_property("margin-top", &format!("{}px", layout.margin_top));
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::data::{format_data, RawMatrix};
    use crate::render::RecordingSurface;

    fn view(matrix: Vec<Vec<f64>>) -> ViewState {
        let data = format_data(&RawMatrix {
            matrix,
            ..RawMatrix::default()
        })
        .unwrap();
        ViewState::new(data, 200.0, 200.0, ViewOptions::default())
    }

    #[test]
    fn test_repaint_draws_for_valid_geometry() {
        let v = view(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let mut surface = RecordingSurface::new();
        assert!(v.repaint_into(&mut surface));
        assert_eq!(surface.cells().count(), 4);
    }

    #[test]
    fn test_repaint_skips_degenerate_viewport() {
        let data = format_data(&RawMatrix {
            matrix: vec![vec![1.0]],
            ..RawMatrix::default()
        })
        .unwrap();
        let v = ViewState::new(data, 0.0, 0.0, ViewOptions::default());
        let mut surface = RecordingSurface::new();
        assert!(!v.repaint_into(&mut surface));
        assert!(surface.ops.is_empty());
    }

    #[test]
    fn test_set_data_resets_interaction_state() {
        let mut v = view(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        v.key(Key::ArrowRight);
        v.label_click(Axis::Row, 1);
        let replacement = format_data(&RawMatrix {
            matrix: vec![vec![5.0]],
            ..RawMatrix::default()
        })
        .unwrap();
        v.set_data(replacement);
        assert_eq!(v.controller().palette_name(), "Purples");
        assert!(v.controller().selection.is_empty());
        assert_eq!(v.data().nrow, 1);
    }

    #[test]
    fn test_append_data_keeps_palette_and_zoom() {
        let mut v = view(vec![vec![1.0, 2.0]]);
        v.key(Key::ArrowRight);
        v.key(Key::ArrowUp);
        let more = format_data(&RawMatrix {
            matrix: vec![vec![3.0, 4.0]],
            ..RawMatrix::default()
        })
        .unwrap();
        v.append_data(more).unwrap();
        assert_eq!(v.data().nrow, 2);
        assert_eq!(v.controller().palette_name(), "Blues");
        assert!(v.controller().zoom() > 0.0);
    }

    #[test]
    fn test_append_data_shape_mismatch_errors() {
        let mut v = view(vec![vec![1.0, 2.0]]);
        let more = format_data(&RawMatrix {
            matrix: vec![vec![1.0]],
            ..RawMatrix::default()
        })
        .unwrap();
        assert!(v.append_data(more).is_err());
    }

    #[test]
    fn test_options_default_shows_values() {
        let v = view(vec![vec![1.0]]);
        let mut surface = RecordingSurface::new();
        v.repaint_into(&mut surface);
        assert_eq!(surface.texts().count(), 1);

        let data = format_data(&RawMatrix {
            matrix: vec![vec![1.0]],
            ..RawMatrix::default()
        })
        .unwrap();
        let quiet = ViewState::new(data, 200.0, 200.0, ViewOptions { labels: false });
        let mut surface = RecordingSurface::new();
        quiet.repaint_into(&mut surface);
        assert_eq!(surface.texts().count(), 0);
    }
}
