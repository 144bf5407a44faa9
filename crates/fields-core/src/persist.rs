//! Persistence contract for field layouts
//!
//! Storage access goes through this interface so the browser localStorage
//! backend can be swapped for an in-memory fake in tests.

use crate::field::FieldDef;

pub trait FieldPersistence {
    /// Read the persisted layout. Absent or unparseable data yields an
    /// empty list; loading never fails.
    fn load(&self) -> Vec<FieldDef>;

    /// Persist the layout. Implementations swallow failures; the worst
    /// case is a stale layout on the next load.
    fn save(&mut self, fields: &[FieldDef]);
}

/// In-memory backend. Holds the serialized JSON text rather than the
/// records themselves so tests exercise the same serde path the browser
/// backend uses.
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    stored: Option<String>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the backend with raw JSON, as if a previous session had
    /// written it.
    pub fn with_raw(json: &str) -> Self {
        Self {
            stored: Some(json.to_string()),
        }
    }

    /// The raw stored JSON, if anything has been saved.
    pub fn raw(&self) -> Option<&str> {
        self.stored.as_deref()
    }
}

impl FieldPersistence for MemoryPersistence {
    fn load(&self) -> Vec<FieldDef> {
        self.stored
            .as_deref()
            .and_then(|json| serde_json::from_str(json).ok())
            .unwrap_or_default()
    }

    fn save(&mut self, fields: &[FieldDef]) {
        if let Ok(json) = serde_json::to_string(fields) {
            self.stored = Some(json);
        }
    }
}
