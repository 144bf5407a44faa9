//! Field record store
//!
//! Owns the canonical ordered list of field definitions. Both views (the
//! editor panel and the canvas overlay) receive read copies and push
//! mutations back through the store; every successful mutation persists
//! the layout and recomputes the JSON preview.

use crate::error::AddFieldError;
use crate::field::FieldDef;
use crate::persist::FieldPersistence;
use crate::preview::derive_preview;

pub struct FieldStore<P: FieldPersistence> {
    fields: Vec<FieldDef>,
    persistence: P,
    preview: String,
}

impl<P: FieldPersistence> FieldStore<P> {
    /// Load the persisted layout. Missing or invalid data starts the store
    /// empty; loading never fails.
    pub fn load(persistence: P) -> Self {
        let fields = persistence.load();
        let preview = derive_preview(&fields);
        Self {
            fields,
            persistence,
            preview,
        }
    }

    /// The records in insertion order.
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Pretty JSON of the layout with ids stripped, kept current across
    /// mutations.
    pub fn preview(&self) -> &str {
        &self.preview
    }

    /// True when every current field is named, i.e. another blank field
    /// may be appended.
    pub fn can_add_field(&self) -> bool {
        self.fields.iter().all(FieldDef::is_named)
    }

    /// Append a new unnamed field with default geometry and a fresh id.
    /// Rejected while any existing field is still unnamed.
    pub fn add_field(&mut self) -> Result<FieldDef, AddFieldError> {
        if !self.can_add_field() {
            return Err(AddFieldError::UnnamedFieldExists);
        }
        let field = FieldDef::new();
        self.fields.push(field.clone());
        self.after_change();
        Ok(field)
    }

    /// Replace the record whose id matches `updated`. Unknown ids change
    /// nothing and return false.
    pub fn update_field(&mut self, updated: FieldDef) -> bool {
        match self.fields.iter_mut().find(|f| f.id == updated.id) {
            Some(slot) => {
                *slot = updated;
                self.after_change();
                true
            }
            None => false,
        }
    }

    /// Remove the record with that id, leaving the relative order of the
    /// others untouched. Unknown ids change nothing and return false.
    pub fn remove_field(&mut self, id: &str) -> bool {
        let before = self.fields.len();
        self.fields.retain(|f| f.id != id);
        if self.fields.len() == before {
            return false;
        }
        self.after_change();
        true
    }

    /// The backing persistence, for inspection in tests.
    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Persist and refresh the preview after a successful mutation. The
    /// save is skipped while the list is empty, so removing every field
    /// leaves the previously persisted layout in place.
    fn after_change(&mut self) {
        if !self.fields.is_empty() {
            self.persistence.save(&self.fields);
        }
        self.preview = derive_preview(&self.fields);
    }
}
