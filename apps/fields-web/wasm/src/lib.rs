//! Browser glue for the PDF field placement app
//!
//! Wires the core field store to localStorage, the overlay canvas, and the
//! editor panel. The page constructs a [`FieldsApp`], connects the drawing
//! surface, and renders the editor rows and JSON preview from the JSON
//! getters; a separate [`PdfViewer`] reports page count and viewport
//! dimensions for sizing the overlay.

use std::cell::RefCell;
use std::rc::Rc;

use fields_core::{
    CommitToken, FieldStore, GeometryChange, GeometryCommit, GestureDebouncer, DEBOUNCE_WINDOW_MS,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

pub mod canvas_bridge;
pub mod editor;
pub mod overlay;
pub mod pdf_viewer;
pub mod storage;

pub use editor::{EditorPanel, FieldRow};
pub use overlay::Overlay;
pub use pdf_viewer::{PdfViewer, Viewport, DOCUMENT_URL};
pub use storage::{LocalStoragePersistence, STORAGE_KEY};

struct AppState {
    store: FieldStore<LocalStoragePersistence>,
    panel: EditorPanel,
    overlay: Overlay,
    debouncer: GestureDebouncer,
}

impl AppState {
    fn refresh_views(&mut self) {
        self.panel.sync(self.store.fields());
        self.overlay.sync(self.store.fields());
    }

    /// Apply a due geometry commit as a whole-record replacement.
    fn apply_commit(&mut self, commit: GeometryCommit) {
        let mut updated = match self.store.get(&commit.field_id) {
            Some(field) => field.clone(),
            None => return,
        };
        match commit.change {
            GeometryChange::Position { x, y } => {
                updated.x = x;
                updated.y = y;
            }
            GeometryChange::Size { width, height } => {
                updated.width = width;
                updated.height = height;
            }
        }
        if self.store.update_field(updated) {
            self.refresh_views();
        }
    }
}

/// Movement tick: the label tracks immediately, the geometry commit waits
/// out the debounce window.
fn handle_moving(state: &Rc<RefCell<AppState>>, id: &str, payload: &JsValue) {
    let (x, y) = canvas_bridge::rect_position(payload);
    let token = {
        let mut guard = state.borrow_mut();
        let st = &mut *guard;
        if let Some(field) = st.store.get(id) {
            st.overlay.track_label(field, x, y);
        }
        st.debouncer.record(id, GeometryChange::Position { x, y })
    };
    schedule_fire(state, token);
}

/// Scaling tick: no label movement; the commit carries dimensions rounded
/// to whole units.
fn handle_scaling(state: &Rc<RefCell<AppState>>, id: &str, payload: &JsValue) {
    let (width, height) = canvas_bridge::scaled_size(payload);
    let token = state
        .borrow_mut()
        .debouncer
        .record(id, GeometryChange::from_scaled_size(width, height));
    schedule_fire(state, token);
}

/// Schedule the debounce-window timer for a recorded tick. A callback
/// whose token was superseded by a later tick finds nothing to fire, so
/// stale timers are harmless without clearTimeout bookkeeping.
fn schedule_fire(state: &Rc<RefCell<AppState>>, token: CommitToken) {
    let state = Rc::clone(state);
    let callback = Closure::once_into_js(move || {
        let mut st = state.borrow_mut();
        if let Some(commit) = st.debouncer.fire(&token) {
            st.apply_commit(commit);
        }
    });

    let window = match web_sys::window() {
        Some(window) => window,
        None => {
            web_sys::console::warn_1(&"no window; geometry commit dropped".into());
            return;
        }
    };
    if window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            DEBOUNCE_WINDOW_MS,
        )
        .is_err()
    {
        web_sys::console::warn_1(&"failed to schedule geometry commit".into());
    }
}

/// Application entry point exported to the page.
#[wasm_bindgen]
pub struct FieldsApp {
    state: Rc<RefCell<AppState>>,
}

#[wasm_bindgen]
impl FieldsApp {
    /// Create the app and load any persisted layout.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        console_error_panic_hook::set_once();
        let store = FieldStore::load(LocalStoragePersistence::new());
        let mut panel = EditorPanel::new();
        panel.sync(store.fields());
        let state = AppState {
            store,
            panel,
            overlay: Overlay::new(),
            debouncer: GestureDebouncer::new(),
        };
        Self {
            state: Rc::new(RefCell::new(state)),
        }
    }

    /// Hook the drawing surface's gesture events into the app. Call once
    /// after the surface exists.
    #[wasm_bindgen(js_name = connectSurface)]
    pub fn connect_surface(&self) {
        let state = Rc::clone(&self.state);
        let moving =
            Closure::<dyn FnMut(String, JsValue)>::new(move |id: String, payload: JsValue| {
                handle_moving(&state, &id, &payload);
            });
        canvas_bridge::surface_on_rect_moving(moving.as_ref().unchecked_ref());
        moving.forget();

        let state = Rc::clone(&self.state);
        let scaling =
            Closure::<dyn FnMut(String, JsValue)>::new(move |id: String, payload: JsValue| {
                handle_scaling(&state, &id, &payload);
            });
        canvas_bridge::surface_on_rect_scaling(scaling.as_ref().unchecked_ref());
        scaling.forget();
    }

    /// Append a new unnamed field. Returns false while an unnamed field
    /// blocks additions.
    #[wasm_bindgen(js_name = addField)]
    pub fn add_field(&self) -> bool {
        let mut state = self.state.borrow_mut();
        match state.store.add_field() {
            Ok(_) => {
                state.refresh_views();
                true
            }
            Err(_) => false,
        }
    }

    /// Whether the add control should be shown: true once every field is
    /// named.
    #[wasm_bindgen(js_name = canAddField)]
    pub fn can_add_field(&self) -> bool {
        self.state.borrow().store.can_add_field()
    }

    /// Remove a field immediately, no confirmation. Unknown ids are
    /// ignored.
    #[wasm_bindgen(js_name = removeField)]
    pub fn remove_field(&self, id: &str) -> bool {
        let mut state = self.state.borrow_mut();
        let removed = state.store.remove_field(id);
        if removed {
            state.debouncer.cancel_field(id);
            state.refresh_views();
        }
        removed
    }

    /// Keystroke in a row's name input. Commits only when the buffer
    /// differs from the record's last committed name.
    #[wasm_bindgen(js_name = setNameBuffer)]
    pub fn set_name_buffer(&self, id: &str, text: &str) {
        let mut state = self.state.borrow_mut();
        let name = match state.panel.set_buffer(id, text) {
            Some(name) => name,
            None => return,
        };
        let updated = match state.store.get(id) {
            Some(field) => {
                let mut updated = field.clone();
                updated.name = name;
                updated
            }
            None => return,
        };
        if state.store.update_field(updated) {
            state.refresh_views();
        }
    }

    #[wasm_bindgen(js_name = fieldCount)]
    pub fn field_count(&self) -> usize {
        self.state.borrow().store.len()
    }

    /// The full record list, ids included.
    #[wasm_bindgen(js_name = getFieldsJson)]
    pub fn get_fields_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.state.borrow().store.fields())
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize fields: {}", e)))
    }

    /// Editor rows for rendering the panel.
    #[wasm_bindgen(js_name = getRowsJson)]
    pub fn get_rows_json(&self) -> String {
        self.state.borrow().panel.to_json()
    }

    /// Pretty JSON for the read-only preview textarea, ids stripped.
    #[wasm_bindgen(js_name = getPreviewJson)]
    pub fn get_preview_json(&self) -> String {
        self.state.borrow().store.preview().to_string()
    }

    /// Size the overlay surface from the page viewport (always page 1).
    #[wasm_bindgen(js_name = resizeOverlay)]
    pub fn resize_overlay(&self, width: f64, height: f64) {
        let mut guard = self.state.borrow_mut();
        let st = &mut *guard;
        st.overlay.resize(width, height);
        st.overlay.sync(st.store.fields());
    }

    /// Redraw the overlay from the current list.
    #[wasm_bindgen(js_name = syncOverlay)]
    pub fn sync_overlay(&self) {
        let guard = self.state.borrow();
        guard.overlay.sync(guard.store.fields());
    }

    /// Movement tick relayed by a page that wires surface events itself.
    #[wasm_bindgen(js_name = rectMoving)]
    pub fn rect_moving(&self, id: &str, payload: &JsValue) {
        handle_moving(&self.state, id, payload);
    }

    /// Scaling tick relayed by a page that wires surface events itself.
    #[wasm_bindgen(js_name = rectScaling)]
    pub fn rect_scaling(&self, id: &str, payload: &JsValue) {
        handle_scaling(&self.state, id, payload);
    }
}

impl Default for FieldsApp {
    fn default() -> Self {
        Self::new()
    }
}

// Full-app tests need a browser environment for localStorage and the
// timer plumbing; the store, panel, and debounce logic are covered by
// native tests in fields-core and the modules above.
#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn clear_layout() {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.remove_item(STORAGE_KEY);
        }
    }

    fn first_field_id(app: &FieldsApp) -> String {
        let json = app.get_fields_json().unwrap();
        let fields: Vec<fields_core::FieldDef> = serde_json::from_str(&json).unwrap();
        fields[0].id.clone()
    }

    #[wasm_bindgen_test]
    fn test_add_rename_add_scenario() {
        clear_layout();
        let app = FieldsApp::new();
        assert_eq!(app.field_count(), 0);

        assert!(app.add_field());
        assert_eq!(app.field_count(), 1);

        // Blocked until the unnamed field gets a name.
        assert!(!app.add_field());
        assert!(!app.can_add_field());

        let id = first_field_id(&app);
        app.set_name_buffer(&id, "Signature1");
        assert!(app.can_add_field());
        assert!(app.add_field());
        assert_eq!(app.field_count(), 2);

        clear_layout();
    }

    #[wasm_bindgen_test]
    fn test_preview_strips_ids() {
        clear_layout();
        let app = FieldsApp::new();
        app.add_field();

        let preview = app.get_preview_json();
        assert!(!preview.contains("\"id\""), "got: {}", preview);

        clear_layout();
    }

    #[wasm_bindgen_test]
    fn test_layout_survives_reload() {
        clear_layout();
        let app = FieldsApp::new();
        app.add_field();
        let id = first_field_id(&app);
        app.set_name_buffer(&id, "Tenant");

        let reloaded = FieldsApp::new();
        assert_eq!(reloaded.field_count(), 1);
        let json = reloaded.get_fields_json().unwrap();
        assert!(json.contains("Tenant"));

        clear_layout();
    }

    #[wasm_bindgen_test]
    fn test_remove_field() {
        clear_layout();
        let app = FieldsApp::new();
        app.add_field();
        let id = first_field_id(&app);

        assert!(app.remove_field(&id));
        assert_eq!(app.field_count(), 0);
        assert!(!app.remove_field(&id));

        clear_layout();
    }
}
