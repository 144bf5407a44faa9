//! Core model for the PDF field placement app
//!
//! Platform-neutral: owns the field records, the record store and its
//! persistence contract, the JSON preview derivation, and the gesture
//! debounce machinery. The browser crate (`fields-wasm`) wires these to
//! localStorage and the overlay canvas.

pub mod debounce;
pub mod error;
pub mod field;
pub mod persist;
pub mod preview;
pub mod store;

pub use debounce::{
    CommitToken, GeometryChange, GeometryCommit, GestureDebouncer, GestureKind,
    DEBOUNCE_WINDOW_MS,
};
pub use error::AddFieldError;
pub use field::{FieldDef, FieldKind};
pub use persist::{FieldPersistence, MemoryPersistence};
pub use preview::derive_preview;
pub use store::FieldStore;
