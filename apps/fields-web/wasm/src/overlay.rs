//! Canvas overlay synchronization
//!
//! Mirrors the field list onto the drawing surface: one draggable,
//! resizable rectangle per rendered field, plus a text label for named
//! fields. Every list change clears and redraws the whole surface with no
//! incremental diffing, so a redraw drops an in-progress gesture on
//! another field's rectangle. That interruption is a known tradeoff of the
//! full-redraw approach, kept for its simplicity.

use crate::canvas_bridge;
use fields_core::FieldDef;

/// Render policy for the overlay: a rectangle is drawn while the field's
/// width is unset, or once its height is set. Fields with a width but no
/// height are skipped. Carried over verbatim from the established product
/// behavior; see DESIGN.md before changing it.
pub fn renders_rect(field: &FieldDef) -> bool {
    field.width == 0.0 || field.height != 0.0
}

/// Named fields also get a text label at the rectangle origin.
pub fn renders_label(field: &FieldDef) -> bool {
    field.is_named()
}

/// Overlay surface state: mirrors the page viewport size and redraws the
/// rectangles from the field list.
#[derive(Debug, Default)]
pub struct Overlay {
    width: f64,
    height: f64,
}

impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the surface's pixel size equal to the page viewport. The app
    /// always sizes against page 1; see DESIGN.md on page scoping.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        canvas_bridge::surface_set_size(width, height);
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Full clear-and-redraw from the current list. Rectangles are not
    /// filtered by page index: every field renders regardless of the page
    /// on display.
    pub fn sync(&self, fields: &[FieldDef]) {
        canvas_bridge::surface_clear();
        for field in fields.iter().filter(|f| renders_rect(f)) {
            canvas_bridge::surface_add_rect(&field.id, field.x, field.y, field.width, field.height);
            if renders_label(field) {
                canvas_bridge::surface_add_label(&field.id, &field.name, field.x, field.y);
            }
        }
    }

    /// Visual label tracking during a drag: runs on every movement tick
    /// with no debounce. Scaling never repositions the label.
    pub fn track_label(&self, field: &FieldDef, x: f64, y: f64) {
        if renders_label(field) {
            canvas_bridge::surface_move_label(&field.id, x, y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(width: f64, height: f64) -> FieldDef {
        let mut field = FieldDef::new();
        field.width = width;
        field.height = height;
        field
    }

    #[test]
    fn test_render_filter() {
        // width unset: drawn, whatever the height
        assert!(renders_rect(&field(0.0, 0.0)));
        assert!(renders_rect(&field(0.0, 30.0)));
        // height set: drawn
        assert!(renders_rect(&field(100.0, 30.0)));
        // width set but height unset: skipped
        assert!(!renders_rect(&field(100.0, 0.0)));
    }

    #[test]
    fn test_default_geometry_is_rendered() {
        assert!(renders_rect(&FieldDef::new()));
    }

    #[test]
    fn test_label_only_for_named_fields() {
        let mut f = FieldDef::new();
        assert!(!renders_label(&f));
        f.name = "Signature1".to_string();
        assert!(renders_label(&f));
    }
}
