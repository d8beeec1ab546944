//! Keyboard and pointer interpreter.
//!
//! Maps input events onto [`SelectionState`] transitions:
//!
//! | Input               | Closed        | Open                              |
//! |---------------------|---------------|-----------------------------------|
//! | Enter / Space       | open          | commit active (if any)            |
//! | Escape              | —             | close                             |
//! | Down / Up           | open          | move active ±1                    |
//! | Home / End          | —             | jump to first / last enabled      |
//! | printable character | —             | type-ahead                        |
//! | click trigger       | open          | close                             |
//! | click option row    | —             | commit that row                   |
//! | hover option row    | —             | highlight row if enabled          |
//!
//! Pointer-downs outside the component are not handled here; the dismissal
//! hub delivers those.

use tracing::trace;

use crate::key::KeyMsg;
use crate::keymap::KeyMap;
use crate::option::SelectOption;
use crate::pointer::{PointerAction, PointerMsg};
use crate::state::{Edge, SelectionState};

/// What part of the component a pointer event landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// The always-visible trigger line.
    Trigger,
    /// An option row in the open list.
    Row(usize),
    /// Inside the open list but not on a row (borders, padding).
    List,
    /// Anywhere else.
    Outside,
}

/// Result of interpreting one event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Set when the event committed a new value.
    pub committed: Option<String>,
    /// Whether the phase or active index changed.
    pub changed: bool,
    /// Whether the component claimed the event. Unclaimed events may be
    /// handled by the host (e.g. Escape on a closed dropdown).
    pub consumed: bool,
}

impl Outcome {
    fn ignored() -> Self {
        Self::default()
    }
}

/// Stateless event-to-transition mapper.
#[derive(Debug, Clone, Default)]
pub struct Interpreter {
    keymap: KeyMap,
}

impl Interpreter {
    /// Creates an interpreter with the default key map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an interpreter with a custom key map.
    #[must_use]
    pub fn with_keymap(keymap: KeyMap) -> Self {
        Self { keymap }
    }

    /// The key map in use.
    #[must_use]
    pub const fn keymap(&self) -> &KeyMap {
        &self.keymap
    }

    /// Mutable access to the key map, for rebinding.
    pub fn keymap_mut(&mut self) -> &mut KeyMap {
        &mut self.keymap
    }

    /// Applies a key event.
    pub fn handle_key(
        &self,
        state: &mut SelectionState,
        options: &[SelectOption],
        key: &KeyMsg,
    ) -> Outcome {
        let before = (state.phase(), state.active_index());
        let km = &self.keymap;
        let open = state.is_open();

        let mut committed = None;
        let consumed = if !km.claims(key) {
            match key.printable() {
                Some(c) => {
                    state.type_ahead(options, c);
                    open
                }
                None => false,
            }
        } else if km.select.matches(key) {
            if open {
                if let Some(index) = state.active_index() {
                    committed = state.commit(options, index).map(|c| c.value);
                }
            } else {
                state.open(options);
            }
            true
        } else if km.close.matches(key) {
            if open {
                state.close();
            }
            open
        } else if km.next.matches(key) {
            state.move_active(options, 1);
            true
        } else if km.prev.matches(key) {
            state.move_active(options, -1);
            true
        } else if km.first.matches(key) {
            state.move_to_edge(options, Edge::First);
            open
        } else {
            // Claimed, so `last` is the binding left.
            state.move_to_edge(options, Edge::Last);
            open
        };

        let outcome = Outcome {
            changed: before != (state.phase(), state.active_index()),
            committed,
            consumed,
        };
        trace!(key = %key, ?outcome, "key interpreted");
        outcome
    }

    /// Applies a pointer event that has already been hit-tested.
    pub fn handle_pointer(
        &self,
        state: &mut SelectionState,
        options: &[SelectOption],
        pointer: &PointerMsg,
        target: Target,
    ) -> Outcome {
        let before = (state.phase(), state.active_index());
        let mut committed = None;

        let consumed = match (pointer.action, target) {
            (PointerAction::Press, Target::Trigger) if pointer.is_primary_down() => {
                state.toggle(options);
                true
            }
            (PointerAction::Press, Target::Row(index)) if pointer.is_primary_down() => {
                if state.is_open() {
                    committed = state.commit(options, index).map(|c| c.value);
                }
                true
            }
            (PointerAction::Motion, Target::Row(index)) => {
                state.set_active(options, index);
                true
            }
            (_, Target::List | Target::Row(_) | Target::Trigger) => true,
            (_, Target::Outside) => return Outcome::ignored(),
        };

        Outcome {
            changed: before != (state.phase(), state.active_index()),
            committed,
            consumed,
        }
    }
}
