//! Key bindings for the dropdown.
//!
//! A [`Binding`] names the keys (as produced by [`KeyMsg`]'s `Display`
//! implementation) that trigger one dropdown action. [`KeyMap`] holds one
//! binding per action and is (de)serializable, so hosts can rebind keys from
//! a config file. Missing fields fall back to the defaults.
//!
//! # Example
//!
//! ```rust
//! use droplist::key::{KeyMsg, KeyType};
//! use droplist::keymap::KeyMap;
//!
//! let mut keymap = KeyMap::default();
//! keymap.next.bind("j");
//!
//! assert!(keymap.next.matches(&KeyMsg::from_type(KeyType::Down)));
//! assert!(keymap.next.matches(&KeyMsg::from_char('j')));
//! assert!(keymap.claims(&KeyMsg::from_char('j')));
//! ```

use serde::{Deserialize, Serialize};

use crate::key::KeyMsg;

/// The keys bound to one dropdown action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Binding {
    /// Key names, e.g. `"down"`, `"enter"`, `"j"`.
    pub keys: Vec<String>,
    /// Key label for help text, e.g. `"↓"`.
    pub label: String,
    /// What the action does, for help text.
    pub action: String,
    /// Suspends the binding without forgetting its keys.
    pub suspended: bool,
}

impl Binding {
    /// A binding on `keys` with help text `label` / `action`.
    #[must_use]
    pub fn on(keys: &[&str], label: &str, action: &str) -> Self {
        Self {
            keys: keys.iter().map(|&k| k.to_owned()).collect(),
            label: label.to_owned(),
            action: action.to_owned(),
            suspended: false,
        }
    }

    /// Adds `key` unless it is already bound.
    pub fn bind(&mut self, key: &str) {
        if !self.keys.iter().any(|k| k == key) {
            self.keys.push(key.to_owned());
        }
    }

    /// Removes `key`. Returns whether it was bound.
    pub fn unbind(&mut self, key: &str) -> bool {
        let before = self.keys.len();
        self.keys.retain(|k| k != key);
        self.keys.len() != before
    }

    /// Whether the binding can fire: not suspended and has keys.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.suspended && !self.keys.is_empty()
    }

    /// Whether `key` fires this binding.
    #[must_use]
    pub fn matches(&self, key: &KeyMsg) -> bool {
        self.is_active() && {
            let name = key.to_string();
            self.keys.iter().any(|k| *k == name)
        }
    }
}

/// Keybindings consulted by the dropdown interpreter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeyMap {
    /// Open the list, or commit the active option when open.
    pub select: Binding,
    /// Close the list without committing.
    pub close: Binding,
    /// Move the active option down (opens when closed).
    pub next: Binding,
    /// Move the active option up (opens when closed).
    pub prev: Binding,
    /// Jump to the first enabled option.
    pub first: Binding,
    /// Jump to the last enabled option.
    pub last: Binding,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            select: Binding::on(&["enter", " "], "enter", "select"),
            close: Binding::on(&["esc"], "esc", "close"),
            next: Binding::on(&["down"], "↓", "next"),
            prev: Binding::on(&["up"], "↑", "previous"),
            first: Binding::on(&["home"], "home", "first"),
            last: Binding::on(&["end"], "end", "last"),
        }
    }
}

impl KeyMap {
    fn bindings(&self) -> [&Binding; 6] {
        [
            &self.select,
            &self.close,
            &self.next,
            &self.prev,
            &self.first,
            &self.last,
        ]
    }

    /// Whether `key` fires any binding. The interpreter only offers
    /// unclaimed keys to type-ahead.
    #[must_use]
    pub fn claims(&self, key: &KeyMsg) -> bool {
        self.bindings().iter().any(|b| b.matches(key))
    }

    /// One-line help for the active navigation bindings, e.g.
    /// `"↑ previous · ↓ next · enter select · esc close"`.
    #[must_use]
    pub fn help_line(&self) -> String {
        [&self.prev, &self.next, &self.select, &self.close]
            .into_iter()
            .filter(|b| b.is_active())
            .map(|b| format!("{} {}", b.label, b.action))
            .collect::<Vec<_>>()
            .join(" · ")
    }
}
