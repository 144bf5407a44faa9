//! Drawing-surface bridge
//!
//! The overlay canvas is an external fabric-style surface driven from
//! `canvas-bridge.js`: an addressable collection of rectangle and label
//! primitives with `moving`/`scaling` gesture hooks. Event payloads are
//! plain JS objects; the crate reads them only through the typed accessors
//! below, keeping the surface's loose event shapes out of the core.

use js_sys::Reflect;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(module = "/www/js/canvas-bridge.js")]
extern "C" {
    #[wasm_bindgen(js_name = surfaceClear)]
    pub fn surface_clear();

    #[wasm_bindgen(js_name = surfaceSetSize)]
    pub fn surface_set_size(width: f64, height: f64);

    #[wasm_bindgen(js_name = surfaceAddRect)]
    pub fn surface_add_rect(id: &str, x: f64, y: f64, width: f64, height: f64);

    #[wasm_bindgen(js_name = surfaceAddLabel)]
    pub fn surface_add_label(id: &str, text: &str, x: f64, y: f64);

    #[wasm_bindgen(js_name = surfaceMoveLabel)]
    pub fn surface_move_label(id: &str, x: f64, y: f64);

    /// Register the `moving` hook; the callback receives (field id, payload).
    #[wasm_bindgen(js_name = surfaceOnRectMoving)]
    pub fn surface_on_rect_moving(callback: &js_sys::Function);

    /// Register the `scaling` hook; the callback receives (field id, payload).
    #[wasm_bindgen(js_name = surfaceOnRectScaling)]
    pub fn surface_on_rect_scaling(callback: &js_sys::Function);
}

/// Current top-left of the rectangle being dragged. Missing or non-numeric
/// payload entries fall back to 0, matching the surface's own defaulting.
pub fn rect_position(payload: &JsValue) -> (f64, f64) {
    (number_entry(payload, "left"), number_entry(payload, "top"))
}

/// Current scaled dimensions of the rectangle being resized.
pub fn scaled_size(payload: &JsValue) -> (f64, f64) {
    (
        number_entry(payload, "scaledWidth"),
        number_entry(payload, "scaledHeight"),
    )
}

fn number_entry(payload: &JsValue, key: &str) -> f64 {
    Reflect::get(payload, &JsValue::from_str(key))
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}
