//! Option list model.
//!
//! A dropdown renders an ordered slice of [`SelectOption`]s. The slice is
//! owned by the caller and treated as immutable between renders; the helpers
//! here answer the navigation questions the state machine asks of it.

use serde::{Deserialize, Serialize};

/// A single selectable entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectOption {
    /// Value reported on commit. Expected to be unique within a list.
    pub value: String,
    /// Display text.
    pub label: String,
    /// Disabled options are shown but can never become active or committed.
    #[serde(default)]
    pub disabled: bool,
}

impl SelectOption {
    /// Creates an enabled option.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            disabled: false,
        }
    }

    /// Sets whether the option is disabled.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Whether the option can be activated.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        !self.disabled
    }

    /// Whether the label starts with `c`, ignoring case.
    #[must_use]
    pub fn label_starts_with(&self, c: char) -> bool {
        self.label
            .chars()
            .next()
            .is_some_and(|first| first.to_lowercase().eq(c.to_lowercase()))
    }
}

/// Builds enabled options from `(value, label)` pairs.
pub fn options_from_pairs<V, L>(pairs: impl IntoIterator<Item = (V, L)>) -> Vec<SelectOption>
where
    V: Into<String>,
    L: Into<String>,
{
    pairs
        .into_iter()
        .map(|(value, label)| SelectOption::new(value, label))
        .collect()
}

/// Whether `index` names an enabled option.
#[must_use]
pub fn is_enabled_at(options: &[SelectOption], index: usize) -> bool {
    options.get(index).is_some_and(SelectOption::is_enabled)
}

/// Index of the first enabled option.
#[must_use]
pub fn first_enabled(options: &[SelectOption]) -> Option<usize> {
    options.iter().position(SelectOption::is_enabled)
}

/// Index of the last enabled option.
#[must_use]
pub fn last_enabled(options: &[SelectOption]) -> Option<usize> {
    options.iter().rposition(SelectOption::is_enabled)
}

/// Index of the option carrying `value`. With duplicates the first wins.
#[must_use]
pub fn position_of(options: &[SelectOption], value: &str) -> Option<usize> {
    options.iter().position(|o| o.value == value)
}

/// The nearest enabled option strictly after (`forward`) or before `from`.
#[must_use]
pub fn neighbour_enabled(options: &[SelectOption], from: usize, forward: bool) -> Option<usize> {
    if forward {
        let start = from.checked_add(1)?;
        (start..options.len()).find(|&i| options[i].is_enabled())
    } else {
        (0..from.min(options.len())).rev().find(|&i| options[i].is_enabled())
    }
}

/// First enabled option whose label starts with `c`, scanning from `start`
/// and wrapping around the list exactly once.
#[must_use]
pub fn find_by_initial(options: &[SelectOption], start: usize, c: char) -> Option<usize> {
    let len = options.len();
    (0..len)
        .map(|offset| (start + offset) % len)
        .find(|&i| options[i].is_enabled() && options[i].label_starts_with(c))
}
