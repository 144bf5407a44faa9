//! PDF.js bridge
//!
//! The PDF engine is an opaque provider of `{numPages, viewport(page,
//! scale)}` reached through `pdf-bridge.js`. Page content rendering stays
//! on the JS side; this crate only consumes page counts and viewport
//! dimensions, read through typed accessors.

use js_sys::Reflect;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

/// The document the viewer loads. The page's file picker accepts an
/// upload, but the viewer still always loads this fixed reference; the
/// picked file is currently ignored.
pub const DOCUMENT_URL: &str = "form.pdf";

#[wasm_bindgen(module = "/www/js/pdf-bridge.js")]
extern "C" {
    #[wasm_bindgen(js_name = loadDocumentUrl)]
    async fn load_document_url(url: &str) -> JsValue;

    #[wasm_bindgen(js_name = getPageViewport)]
    async fn get_page_viewport(page_num: u32, scale: f64) -> JsValue;

    #[wasm_bindgen(js_name = renderPage)]
    async fn render_page_internal(page_num: u32, canvas: &HtmlCanvasElement, scale: f64)
        -> JsValue;
}

/// Page viewport dimensions at a given scale.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// Read a viewport out of the bridge's loosely-typed payload.
    fn from_js(value: &JsValue) -> Option<Self> {
        Some(Self {
            width: number_entry(value, "width")?,
            height: number_entry(value, "height")?,
        })
    }
}

fn number_entry(value: &JsValue, key: &str) -> Option<f64> {
    Reflect::get(value, &JsValue::from_str(key))
        .ok()
        .and_then(|v| v.as_f64())
}

/// Wraps the PDF engine: loads the document and reports page count and
/// per-page viewport dimensions.
#[wasm_bindgen]
pub struct PdfViewer {
    page_count: u32,
    loaded: bool,
}

#[wasm_bindgen]
impl PdfViewer {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        console_error_panic_hook::set_once();
        Self {
            page_count: 0,
            loaded: false,
        }
    }

    /// Load the fixed document reference.
    pub async fn load(&mut self) -> Result<(), JsValue> {
        let doc = load_document_url(DOCUMENT_URL).await;
        if doc.is_undefined() || doc.is_null() {
            return Err(JsValue::from_str("Failed to load PDF document"));
        }

        match number_entry(&doc, "numPages") {
            Some(count) => self.page_count = count as u32,
            None => return Err(JsValue::from_str("Document reported no page count")),
        }

        self.loaded = true;
        Ok(())
    }

    /// Number of pages in the loaded document, for the "Page 1 of N"
    /// caption.
    #[wasm_bindgen(js_name = pageCount)]
    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    #[wasm_bindgen(js_name = isLoaded)]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Viewport dimensions for a page at the given scale. The overlay
    /// always sizes itself from page 1 at scale 1.
    pub async fn viewport(&self, page_num: u32, scale: f64) -> Result<Viewport, JsValue> {
        self.check_page(page_num)?;
        let value = get_page_viewport(page_num, scale).await;
        Viewport::from_js(&value)
            .ok_or_else(|| JsValue::from_str("Malformed viewport payload from PDF engine"))
    }

    /// Render a page into a canvas element at the given scale.
    #[wasm_bindgen(js_name = renderPage)]
    pub async fn render_page(
        &self,
        page_num: u32,
        canvas: HtmlCanvasElement,
        scale: f64,
    ) -> Result<(), JsValue> {
        self.check_page(page_num)?;
        let _ = render_page_internal(page_num, &canvas, scale).await;
        Ok(())
    }

    fn check_page(&self, page_num: u32) -> Result<(), JsValue> {
        if !self.loaded {
            return Err(JsValue::from_str("No document loaded"));
        }
        if page_num < 1 || page_num > self.page_count {
            return Err(JsValue::from_str(&format!(
                "Invalid page number: {} (document has {} pages)",
                page_num, self.page_count
            )));
        }
        Ok(())
    }
}

impl Default for PdfViewer {
    fn default() -> Self {
        Self::new()
    }
}
