//! DOM event handlers and svg label construction for `HeatmapView`.
//!
//! All functions here are `pub(crate)` helpers called from the wasm-exported
//! public API in `mod.rs`. Handlers translate raw events into controller
//! calls on the shared state, then repaint.

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::closure::Closure;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{JsCast, JsValue};
#[cfg(target_arch = "wasm32")]
use web_sys::{Document, Element, MouseEvent};

#[cfg(target_arch = "wasm32")]
use super::SharedState;
#[cfg(target_arch = "wasm32")]
use crate::controller::Key;
#[cfg(target_arch = "wasm32")]
use crate::selection::Axis;

#[cfg(target_arch = "wasm32")]
const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Transient hover class; `selected-sticky` is managed by the repaint.
#[cfg(target_arch = "wasm32")]
const HOVER_CLASS: &str = "selected";

#[cfg(target_arch = "wasm32")]
pub(crate) fn repaint(state: &Rc<RefCell<SharedState>>) {
    let mut s = state.borrow_mut();
    repaint_state(&mut s);
}

#[cfg(target_arch = "wasm32")]
fn repaint_state(s: &mut SharedState) {
    let flags = s.view.sticky();
    for (el, on) in s.row_labels.iter().zip(flags.rows.iter()) {
        let _ = el.class_list().toggle_with_force("selected-sticky", *on);
    }
    for (el, on) in s.col_labels.iter().zip(flags.cols.iter()) {
        let _ = el.class_list().toggle_with_force("selected-sticky", *on);
    }

    let SharedState {
        ref view,
        ref mut surface,
        ..
    } = *s;
    match surface {
        Some(surface) => {
            if !view.repaint_into(surface) {
                web_sys::console::warn_1(&JsValue::from_str(
                    "heatgrid: degenerate geometry, skipping render",
                ));
            }
        }
        None => web_sys::console::warn_1(&JsValue::from_str("heatgrid: no canvas context")),
    }
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn internal_key_down(state: &Rc<RefCell<SharedState>>, key: Key) {
    let mut s = state.borrow_mut();
    if s.view.key(key) {
        repaint_state(&mut s);
    }
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn internal_label_click(state: &Rc<RefCell<SharedState>>, axis: Axis, index: usize) {
    let mut s = state.borrow_mut();
    if s.view.label_click(axis, index) {
        repaint_state(&mut s);
    }
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn internal_reset(state: &Rc<RefCell<SharedState>>) {
    let mut s = state.borrow_mut();
    if s.view.reset() {
        repaint_state(&mut s);
    }
}

/// Create the svg `<text>` nodes for the row/column labels, wire their
/// hover and click handlers, and register the elements on the shared state.
/// Returns the closures, which the caller must keep alive.
#[cfg(target_arch = "wasm32")]
pub(crate) fn build_labels(
    document: &Document,
    state: &Rc<RefCell<SharedState>>,
) -> Result<Vec<Closure<dyn FnMut(MouseEvent)>>, JsValue> {
    let mut closures = Vec::new();
    let mut s = state.borrow_mut();

    let Some(layout) = s.view.layout().cloned() else {
        return Ok(closures);
    };
    let rows = s.view.data().rows.clone();
    let columns = s.view.data().columns.clone();
    let half = layout.cell_size / 2.0;
    let font = format!("font-size: {}px", layout.axis_font_size);

    if let Some(columns) = columns {
        for (i, name) in columns.iter().enumerate() {
            let el = document.create_element_ns(Some(SVG_NS), "text")?;
            el.set_attribute("text-anchor", "start")?;
            el.set_attribute(
                "transform",
                &format!(
                    "translate({},{})rotate(-60)",
                    layout.margin_left + layout.x_scale.position(i) + half,
                    layout.margin_top * 0.8
                ),
            )?;
            el.set_attribute("class", "axis-label column-label")?;
            el.set_attribute("style", &font)?;
            el.set_text_content(Some(name));
            wire_label(&el, state, Axis::Column, i, &mut closures);
            s.svg.append_child(&el)?;
            s.col_labels.push(el);
        }
    }

    if let Some(rows) = rows {
        for (i, name) in rows.iter().enumerate() {
            let el = document.create_element_ns(Some(SVG_NS), "text")?;
            el.set_attribute("text-anchor", "end")?;
            el.set_attribute("x", &format!("{}", layout.margin_left * 0.8))?;
            el.set_attribute(
                "y",
                &format!("{}", layout.margin_top + layout.y_scale.position(i) + half),
            )?;
            el.set_attribute("dy", "0.35em")?;
            el.set_attribute("class", "axis-label row-label")?;
            el.set_attribute("style", &font)?;
            el.set_text_content(Some(name));
            wire_label(&el, state, Axis::Row, i, &mut closures);
            s.svg.append_child(&el)?;
            s.row_labels.push(el);
        }
    }

    Ok(closures)
}

/// Hover (transient class) and click (selection toggle) handlers for one
/// label element.
#[cfg(target_arch = "wasm32")]
fn wire_label(
    el: &Element,
    state: &Rc<RefCell<SharedState>>,
    axis: Axis,
    index: usize,
    closures: &mut Vec<Closure<dyn FnMut(MouseEvent)>>,
) {
    {
        let target = el.clone();
        let closure = Closure::wrap(Box::new(move |_event: MouseEvent| {
            let _ = target.class_list().add_1(HOVER_CLASS);
        }) as Box<dyn FnMut(MouseEvent)>);
        el.add_event_listener_with_callback("mouseover", closure.as_ref().unchecked_ref())
            .ok();
        closures.push(closure);
    }
    {
        let target = el.clone();
        let closure = Closure::wrap(Box::new(move |_event: MouseEvent| {
            let _ = target.class_list().remove_1(HOVER_CLASS);
        }) as Box<dyn FnMut(MouseEvent)>);
        el.add_event_listener_with_callback("mouseout", closure.as_ref().unchecked_ref())
            .ok();
        closures.push(closure);
    }
    {
        let state = Rc::clone(state);
        let closure = Closure::wrap(Box::new(move |_event: MouseEvent| {
            internal_label_click(&state, axis, index);
        }) as Box<dyn FnMut(MouseEvent)>);
        el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
            .ok();
        closures.push(closure);
    }
}
