//! Selection state machine.
//!
//! Two phases, [`Phase::Closed`] (initial) and [`Phase::Open`]. While open,
//! the active index is either `None` or names an enabled option; every
//! transition below preserves that.
//!
//! The machine holds no options of its own. Each transition borrows the
//! current option slice, so the caller stays the owner of both the list and
//! the committed value.
//!
//! # Example
//!
//! ```rust
//! use droplist::option::SelectOption;
//! use droplist::state::SelectionState;
//!
//! let options = vec![
//!     SelectOption::new("a", "Apple"),
//!     SelectOption::new("b", "Banana").disabled(true),
//!     SelectOption::new("c", "Cherry"),
//! ];
//! let mut state = SelectionState::new("a");
//!
//! state.open(&options);
//! assert_eq!(state.active_index(), Some(0));
//!
//! state.move_active(&options, 1);
//! assert_eq!(state.active_index(), Some(2));
//!
//! let commit = state.commit(&options, 2).expect("Cherry is enabled");
//! assert_eq!(commit.value, "c");
//! assert!(!state.is_open());
//! ```

use tracing::trace;

use crate::option::{
    SelectOption, find_by_initial, first_enabled, is_enabled_at, last_enabled, neighbour_enabled,
    position_of,
};

/// Whether the option list is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// List hidden.
    #[default]
    Closed,
    /// List showing; navigation is live.
    Open,
}

/// Which end of the list to jump to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    /// First enabled option.
    First,
    /// Last enabled option.
    Last,
}

/// A successful commit, proposed to the owner of the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Index of the committed option.
    pub index: usize,
    /// Its value.
    pub value: String,
}

/// Open/closed phase, active index and committed value of one dropdown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    phase: Phase,
    active: Option<usize>,
    committed: String,
}

impl SelectionState {
    /// Creates a closed state with the given committed value.
    pub fn new(committed: impl Into<String>) -> Self {
        Self {
            phase: Phase::Closed,
            active: None,
            committed: committed.into(),
        }
    }

    /// The current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the list is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.phase == Phase::Open
    }

    /// The highlighted option. Only meaningful while open.
    #[must_use]
    pub const fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// The committed value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.committed
    }

    /// Replaces the committed value, as when the owner re-renders with a new
    /// value prop. Never reported back as a commit.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.committed = value.into();
    }

    /// Opens the list and highlights the committed option when it is enabled,
    /// otherwise the first enabled option.
    pub fn open(&mut self, options: &[SelectOption]) {
        self.phase = Phase::Open;
        self.active = position_of(options, &self.committed)
            .filter(|&i| options[i].is_enabled())
            .or_else(|| first_enabled(options));
        trace!(active = ?self.active, "select opened");
    }

    /// Closes the list. The active index is left as is and recomputed on the
    /// next [`open`](Self::open).
    pub fn close(&mut self) {
        if self.phase == Phase::Open {
            trace!("select closed");
        }
        self.phase = Phase::Closed;
    }

    /// Opens a closed list, closes an open one.
    pub fn toggle(&mut self, options: &[SelectOption]) {
        match self.phase {
            Phase::Closed => self.open(options),
            Phase::Open => self.close(),
        }
    }

    /// Commits the option at `index` and closes the list.
    ///
    /// Returns `None`, leaving everything unchanged, when `index` is out of
    /// range or names a disabled option.
    pub fn commit(&mut self, options: &[SelectOption], index: usize) -> Option<Commit> {
        if !is_enabled_at(options, index) {
            trace!(index, "commit ignored");
            return None;
        }
        let value = options[index].value.clone();
        self.committed.clone_from(&value);
        self.active = Some(index);
        self.close();
        trace!(index, value = %value, "select committed");
        Some(Commit { index, value })
    }

    /// Moves the highlight `delta` enabled options down (positive) or up,
    /// clamping at the enabled edges. A closed list is opened instead.
    pub fn move_active(&mut self, options: &[SelectOption], delta: isize) {
        if !self.is_open() {
            self.open(options);
            return;
        }
        let Some(mut current) = self.active else {
            // Nothing highlighted (all disabled, or the list changed under
            // us): any step lands on the first enabled option.
            self.active = first_enabled(options);
            return;
        };
        let forward = delta > 0;
        for _ in 0..delta.unsigned_abs() {
            match neighbour_enabled(options, current, forward) {
                Some(next) => current = next,
                None => break,
            }
        }
        self.active = Some(current);
    }

    /// Jumps to the first or last enabled option. No-op while closed.
    pub fn move_to_edge(&mut self, options: &[SelectOption], edge: Edge) {
        if !self.is_open() {
            return;
        }
        let target = match edge {
            Edge::First => first_enabled(options),
            Edge::Last => last_enabled(options),
        };
        if target.is_some() {
            self.active = target;
        }
    }

    /// Highlights the next enabled option whose label starts with `c`,
    /// scanning after the current highlight and wrapping once. No-op while
    /// closed or when nothing matches.
    pub fn type_ahead(&mut self, options: &[SelectOption], c: char) {
        if !self.is_open() || options.is_empty() {
            return;
        }
        let start = self.active.map_or(0, |i| i + 1);
        if let Some(found) = find_by_initial(options, start, c) {
            self.active = Some(found);
        }
    }

    /// Highlights `index` if the list is open and the option is enabled.
    pub fn set_active(&mut self, options: &[SelectOption], index: usize) {
        if self.is_open() && is_enabled_at(options, index) {
            self.active = Some(index);
        }
    }

    /// Re-establishes the active-index invariant after the option list was
    /// replaced while open.
    pub fn revalidate(&mut self, options: &[SelectOption]) {
        if !self.is_open() {
            return;
        }
        let valid = self.active.is_none_or(|i| is_enabled_at(options, i));
        if !valid {
            self.open(options);
        }
    }

    /// Whether the active-index invariant holds for `options`.
    #[must_use]
    pub fn is_consistent(&self, options: &[SelectOption]) -> bool {
        !self.is_open() || self.active.is_none_or(|i| is_enabled_at(options, i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fruit() -> Vec<SelectOption> {
        vec![
            SelectOption::new("a", "Apple"),
            SelectOption::new("b", "Banana").disabled(true),
            SelectOption::new("c", "Cherry"),
        ]
    }

    fn all_disabled() -> Vec<SelectOption> {
        fruit().into_iter().map(|o| o.disabled(true)).collect()
    }

    #[test]
    fn test_initial_state_closed() {
        let state = SelectionState::new("a");
        assert_eq!(state.phase(), Phase::Closed);
        assert_eq!(state.active_index(), None);
        assert_eq!(state.value(), "a");
    }

    #[test]
    fn test_open_highlights_committed() {
        let opts = fruit();
        let mut state = SelectionState::new("c");
        state.open(&opts);
        assert!(state.is_open());
        assert_eq!(state.active_index(), Some(2));
    }

    #[test]
    fn test_open_falls_back_to_first_enabled() {
        let mut opts = fruit();
        opts[0].disabled = true;

        // committed value is disabled
        let mut state = SelectionState::new("b");
        state.open(&opts);
        assert_eq!(state.active_index(), Some(2));

        // committed value unknown
        let mut state = SelectionState::new("zzz");
        state.open(&fruit());
        assert_eq!(state.active_index(), Some(0));
    }

    #[test]
    fn test_open_all_disabled_has_no_active() {
        let opts = all_disabled();
        let mut state = SelectionState::new("a");
        state.open(&opts);
        assert!(state.is_open());
        assert_eq!(state.active_index(), None);
    }

    #[test]
    fn test_close_keeps_active() {
        let opts = fruit();
        let mut state = SelectionState::new("a");
        state.open(&opts);
        state.move_active(&opts, 1);
        state.close();
        assert!(!state.is_open());
        assert_eq!(state.active_index(), Some(2));

        // reopening recomputes from the committed value
        state.open(&opts);
        assert_eq!(state.active_index(), Some(0));
    }

    #[test]
    fn test_move_active_when_closed_opens() {
        let opts = fruit();
        let mut state = SelectionState::new("c");
        state.move_active(&opts, 1);
        assert!(state.is_open());
        assert_eq!(state.active_index(), Some(2));
    }

    #[test]
    fn test_move_active_skips_disabled_and_clamps() {
        let opts = fruit();
        let mut state = SelectionState::new("a");
        state.open(&opts);

        state.move_active(&opts, 1);
        assert_eq!(state.active_index(), Some(2));
        state.move_active(&opts, 1);
        assert_eq!(state.active_index(), Some(2));

        state.move_active(&opts, -1);
        assert_eq!(state.active_index(), Some(0));
        state.move_active(&opts, -1);
        assert_eq!(state.active_index(), Some(0));
    }

    #[test]
    fn test_move_active_all_disabled_stays_none() {
        let opts = all_disabled();
        let mut state = SelectionState::new("");
        state.open(&opts);
        state.move_active(&opts, 1);
        assert_eq!(state.active_index(), None);
        state.move_active(&opts, -1);
        assert_eq!(state.active_index(), None);
    }

    #[test]
    fn test_move_to_edge() {
        let opts = vec![
            SelectOption::new("x", "X").disabled(true),
            SelectOption::new("a", "Apple"),
            SelectOption::new("b", "Banana"),
            SelectOption::new("y", "Y").disabled(true),
        ];
        let mut state = SelectionState::new("a");

        state.move_to_edge(&opts, Edge::Last);
        assert!(!state.is_open(), "edge jumps never open the list");

        state.open(&opts);
        state.move_to_edge(&opts, Edge::Last);
        assert_eq!(state.active_index(), Some(2));
        state.move_to_edge(&opts, Edge::First);
        assert_eq!(state.active_index(), Some(1));
    }

    #[test]
    fn test_commit_enabled() {
        let opts = fruit();
        let mut state = SelectionState::new("a");
        state.open(&opts);
        let commit = state.commit(&opts, 2);
        assert_eq!(
            commit,
            Some(Commit {
                index: 2,
                value: "c".into()
            })
        );
        assert_eq!(state.value(), "c");
        assert!(!state.is_open());
    }

    #[test]
    fn test_commit_disabled_or_out_of_range_is_noop() {
        let opts = fruit();
        let mut state = SelectionState::new("a");
        state.open(&opts);
        let before = state.clone();

        assert_eq!(state.commit(&opts, 1), None);
        assert_eq!(state.commit(&opts, 99), None);
        assert_eq!(state, before);
    }

    #[test]
    fn test_type_ahead_matches_case_insensitively() {
        let opts = fruit();
        let mut state = SelectionState::new("a");
        state.open(&opts);
        state.type_ahead(&opts, 'C');
        assert_eq!(state.active_index(), Some(2));
    }

    #[test]
    fn test_type_ahead_skips_disabled_match() {
        let opts = fruit();
        let mut state = SelectionState::new("a");
        state.open(&opts);
        state.type_ahead(&opts, 'b');
        assert_eq!(state.active_index(), Some(0));
    }

    #[test]
    fn test_type_ahead_cycles_same_initial() {
        let opts = vec![
            SelectOption::new("b1", "Batumi"),
            SelectOption::new("k", "Kutaisi"),
            SelectOption::new("b2", "Borjomi"),
        ];
        let mut state = SelectionState::new("b1");
        state.open(&opts);
        state.type_ahead(&opts, 'b');
        assert_eq!(state.active_index(), Some(2));
        state.type_ahead(&opts, 'b');
        assert_eq!(state.active_index(), Some(0));
    }

    #[test]
    fn test_type_ahead_from_no_active_starts_at_zero() {
        let mut opts = vec![
            SelectOption::new("a", "Apple").disabled(true),
            SelectOption::new("b", "Avocado").disabled(true),
        ];
        let mut state = SelectionState::new("");
        state.open(&opts);
        assert_eq!(state.active_index(), None);

        opts[0].disabled = false;
        state.type_ahead(&opts, 'a');
        assert_eq!(state.active_index(), Some(0));
    }

    #[test]
    fn test_type_ahead_closed_is_noop() {
        let opts = fruit();
        let mut state = SelectionState::new("a");
        state.type_ahead(&opts, 'c');
        assert!(!state.is_open());
        assert_eq!(state.active_index(), None);
    }

    #[test]
    fn test_set_active_ignores_disabled() {
        let opts = fruit();
        let mut state = SelectionState::new("a");
        state.set_active(&opts, 2);
        assert_eq!(state.active_index(), None, "closed list ignores hover");

        state.open(&opts);
        state.set_active(&opts, 1);
        assert_eq!(state.active_index(), Some(0));
        state.set_active(&opts, 2);
        assert_eq!(state.active_index(), Some(2));
    }

    #[test]
    fn test_revalidate_after_options_change() {
        let opts = fruit();
        let mut state = SelectionState::new("a");
        state.open(&opts);
        state.move_active(&opts, 1);
        assert_eq!(state.active_index(), Some(2));

        let shorter = vec![SelectOption::new("a", "Apple")];
        assert!(!state.is_consistent(&shorter));
        state.revalidate(&shorter);
        assert!(state.is_consistent(&shorter));
        assert_eq!(state.active_index(), Some(0));
    }

    #[test]
    fn test_toggle() {
        let opts = fruit();
        let mut state = SelectionState::new("a");
        state.toggle(&opts);
        assert!(state.is_open());
        state.toggle(&opts);
        assert!(!state.is_open());
    }
}
