//! Field editor panel state
//!
//! One row per field record with an editable name buffer and a remove
//! control. Rust owns the row state; the page renders it from the JSON
//! getter and pushes keystrokes back in.

use fields_core::FieldDef;
use serde::{Deserialize, Serialize};

/// Editable row for one field record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldRow {
    pub id: String,
    /// Name as last committed to the store.
    pub committed_name: String,
    /// Local edit buffer, updated on every keystroke.
    pub buffer: String,
}

#[derive(Debug, Default)]
pub struct EditorPanel {
    rows: Vec<FieldRow>,
}

impl EditorPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the rows from the record list. A surviving row keeps its
    /// edit buffer; a row for a new record initializes the buffer from the
    /// record's current name.
    pub fn sync(&mut self, fields: &[FieldDef]) {
        let rows = fields
            .iter()
            .map(|field| {
                let buffer = match self.rows.iter().find(|r| r.id == field.id) {
                    Some(existing) => existing.buffer.clone(),
                    None => field.name.clone(),
                };
                FieldRow {
                    id: field.id.clone(),
                    committed_name: field.name.clone(),
                    buffer,
                }
            })
            .collect();
        self.rows = rows;
    }

    /// Record a keystroke in a row's name input. Returns the name to
    /// commit when the buffer differs from the last committed name; equal
    /// buffers yield nothing, which keeps redundant commits (and render
    /// loops) out of the store. Name content is never validated.
    pub fn set_buffer(&mut self, id: &str, text: &str) -> Option<String> {
        let row = self.rows.iter_mut().find(|r| r.id == id)?;
        row.buffer = text.to_string();
        if row.buffer != row.committed_name {
            Some(row.buffer.clone())
        } else {
            None
        }
    }

    pub fn rows(&self) -> &[FieldRow] {
        &self.rows
    }

    /// True when every row's record is named, i.e. the add control should
    /// be shown.
    pub fn can_add(&self) -> bool {
        self.rows.iter().all(|r| !r.committed_name.is_empty())
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.rows).unwrap_or_default()
    }
}
