//! Per-gesture debounce timers for overlay geometry commits
//!
//! Each (field, gesture kind) pair owns an independent cancellable timer.
//! Recording a tick re-arms the slot and supersedes the previously armed
//! token, so however many ticks land inside the quiet window, at most one
//! commit fires per gesture and it carries the final geometry.

use std::collections::HashMap;

/// Quiet period after the last movement or scaling tick before the
/// geometry commit fires, in milliseconds.
pub const DEBOUNCE_WINDOW_MS: i32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureKind {
    Move,
    Scale,
}

/// Geometry payload carried by a pending commit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeometryChange {
    Position { x: f64, y: f64 },
    Size { width: f64, height: f64 },
}

impl GeometryChange {
    /// Size change from the surface's scaled dimensions, rounded to the
    /// nearest whole unit.
    pub fn from_scaled_size(width: f64, height: f64) -> Self {
        GeometryChange::Size {
            width: width.round(),
            height: height.round(),
        }
    }

    pub fn kind(&self) -> GestureKind {
        match self {
            GeometryChange::Position { .. } => GestureKind::Move,
            GeometryChange::Size { .. } => GestureKind::Scale,
        }
    }
}

/// Identifies one armed generation of a (field, kind) slot. A later tick
/// of the same gesture supersedes earlier tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitToken {
    field_id: String,
    kind: GestureKind,
    generation: u64,
}

impl CommitToken {
    pub fn field_id(&self) -> &str {
        &self.field_id
    }
}

/// A commit that became due; applied to the store via `update_field`.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryCommit {
    pub field_id: String,
    pub change: GeometryChange,
}

#[derive(Debug)]
struct ArmedSlot {
    generation: u64,
    change: GeometryChange,
}

#[derive(Debug, Default)]
pub struct GestureDebouncer {
    slots: HashMap<(String, GestureKind), ArmedSlot>,
    next_generation: u64,
}

impl GestureDebouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm (or re-arm) the slot for this field and gesture kind. The
    /// returned token belongs to this tick only.
    pub fn record(&mut self, field_id: &str, change: GeometryChange) -> CommitToken {
        self.next_generation += 1;
        let kind = change.kind();
        self.slots.insert(
            (field_id.to_string(), kind),
            ArmedSlot {
                generation: self.next_generation,
                change,
            },
        );
        CommitToken {
            field_id: field_id.to_string(),
            kind,
            generation: self.next_generation,
        }
    }

    /// Fire a token. Yields the commit only when the token is still the
    /// armed generation for its slot; superseded, cancelled, and
    /// already-fired tokens yield nothing. Stale timer callbacks therefore
    /// need no clearTimeout bookkeeping to stay harmless.
    pub fn fire(&mut self, token: &CommitToken) -> Option<GeometryCommit> {
        let key = (token.field_id.clone(), token.kind);
        let current = self.slots.get(&key)?.generation;
        if current != token.generation {
            return None;
        }
        let slot = self.slots.remove(&key)?;
        Some(GeometryCommit {
            field_id: token.field_id.clone(),
            change: slot.change,
        })
    }

    /// Drop any armed gestures for a field whose rectangle no longer
    /// exists.
    pub fn cancel_field(&mut self, field_id: &str) {
        self.slots.retain(|(id, _), _| id != field_id);
    }

    pub fn cancel_all(&mut self) {
        self.slots.clear();
    }

    pub fn armed_count(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_tick_commits_final_position() {
        let mut debouncer = GestureDebouncer::new();
        let token = debouncer.record("f1", GeometryChange::Position { x: 10.0, y: 20.0 });

        let commit = debouncer.fire(&token).unwrap();
        assert_eq!(commit.field_id, "f1");
        assert_eq!(commit.change, GeometryChange::Position { x: 10.0, y: 20.0 });
    }

    #[test]
    fn test_rapid_ticks_commit_at_most_once() {
        let mut debouncer = GestureDebouncer::new();
        let first = debouncer.record("f1", GeometryChange::Position { x: 1.0, y: 1.0 });
        let second = debouncer.record("f1", GeometryChange::Position { x: 2.0, y: 2.0 });
        let last = debouncer.record("f1", GeometryChange::Position { x: 3.0, y: 3.0 });

        // Earlier timer callbacks find their tokens superseded.
        assert_eq!(debouncer.fire(&first), None);
        assert_eq!(debouncer.fire(&second), None);

        let commit = debouncer.fire(&last).unwrap();
        assert_eq!(commit.change, GeometryChange::Position { x: 3.0, y: 3.0 });

        // The slot was consumed; nothing further fires for this gesture.
        assert_eq!(debouncer.fire(&last), None);
        assert_eq!(debouncer.armed_count(), 0);
    }

    #[test]
    fn test_move_and_scale_are_independent() {
        let mut debouncer = GestureDebouncer::new();
        let moved = debouncer.record("f1", GeometryChange::Position { x: 5.0, y: 5.0 });
        let scaled = debouncer.record("f1", GeometryChange::from_scaled_size(99.6, 30.2));

        // Arming a scale does not supersede the pending move.
        let commit = debouncer.fire(&moved).unwrap();
        assert_eq!(commit.change, GeometryChange::Position { x: 5.0, y: 5.0 });

        let commit = debouncer.fire(&scaled).unwrap();
        assert_eq!(
            commit.change,
            GeometryChange::Size {
                width: 100.0,
                height: 30.0
            }
        );
    }

    #[test]
    fn test_fields_do_not_interfere() {
        let mut debouncer = GestureDebouncer::new();
        let a = debouncer.record("a", GeometryChange::Position { x: 1.0, y: 0.0 });
        let b = debouncer.record("b", GeometryChange::Position { x: 2.0, y: 0.0 });

        assert!(debouncer.fire(&a).is_some());
        assert!(debouncer.fire(&b).is_some());
    }

    #[test]
    fn test_cancel_field_drops_armed_gestures() {
        let mut debouncer = GestureDebouncer::new();
        let moved = debouncer.record("gone", GeometryChange::Position { x: 1.0, y: 1.0 });
        let scaled = debouncer.record("gone", GeometryChange::from_scaled_size(10.0, 10.0));
        let other = debouncer.record("kept", GeometryChange::Position { x: 2.0, y: 2.0 });

        debouncer.cancel_field("gone");

        assert_eq!(debouncer.fire(&moved), None);
        assert_eq!(debouncer.fire(&scaled), None);
        assert!(debouncer.fire(&other).is_some());
    }

    #[test]
    fn test_scaled_size_rounds_to_whole_units() {
        assert_eq!(
            GeometryChange::from_scaled_size(120.49, 29.5),
            GeometryChange::Size {
                width: 120.0,
                height: 30.0
            }
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// However many ticks a gesture produces, firing every token in
        /// order yields exactly one commit, carrying the final geometry.
        #[test]
        fn gesture_commits_exactly_once(
            ticks in proptest::collection::vec((0.0f64..1000.0, 0.0f64..1000.0), 1..30)
        ) {
            let mut debouncer = GestureDebouncer::new();
            let tokens: Vec<CommitToken> = ticks
                .iter()
                .map(|&(x, y)| debouncer.record("f", GeometryChange::Position { x, y }))
                .collect();

            let commits: Vec<GeometryCommit> = tokens
                .iter()
                .filter_map(|t| debouncer.fire(t))
                .collect();

            prop_assert_eq!(commits.len(), 1);
            let (x, y) = *ticks.last().unwrap();
            prop_assert_eq!(commits[0].change, GeometryChange::Position { x, y });
        }
    }
}
