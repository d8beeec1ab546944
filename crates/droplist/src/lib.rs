#![forbid(unsafe_code)]
// Allow pedantic lints for early-stage API ergonomics.
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

//! # Droplist
//!
//! An accessible single-select dropdown for terminal applications, driven by
//! keyboard and pointer alike.
//!
//! The component is split into small layers:
//! - **option** - the option list model and its enabled-index queries
//! - **state** - the open/closed selection state machine
//! - **key** / **pointer** - input events, with crossterm conversions
//! - **keymap** - rebindable key bindings
//! - **interpreter** - maps input events onto state transitions
//! - **dismiss** - closes open lists on pointer-downs outside them
//! - **dropdown** - the component tying the layers together
//!
//! Alongside it live a few helpers that filter screens built around
//! dropdowns tend to need:
//! - **paginator** - page state and numbered page bars
//! - **debounce** - clock-injected debouncing of rapid input
//! - **recent** - bounded most-recent-first history with JSON persistence
//!
//! ## Example
//!
//! ```rust
//! use droplist::prelude::*;
//!
//! let hub = DismissHub::new();
//! let mut category = Dropdown::new()
//!     .options(options_from_pairs([("", "All"), ("it", "IT"), ("hr", "HR")]))
//!     .value("");
//! category.mount(&hub);
//!
//! category.handle_key(&KeyMsg::from_type(KeyType::Enter));
//! category.type_ahead('h');
//! category.handle_key(&KeyMsg::from_type(KeyType::Enter));
//! assert_eq!(category.get_value(), "hr");
//! ```

pub mod debounce;
pub mod dismiss;
pub mod dropdown;
pub mod interpreter;
pub mod key;
pub mod keymap;
pub mod option;
pub mod paginator;
pub mod pointer;
pub mod recent;
pub mod state;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::debounce::Debouncer;
    pub use crate::dismiss::{DismissHub, Subscription};
    pub use crate::dropdown::{Boundary, Dropdown};
    pub use crate::interpreter::{Interpreter, Outcome, Target};
    pub use crate::key::{KeyMsg, KeyType, from_crossterm_key};
    pub use crate::keymap::{Binding, KeyMap};
    pub use crate::option::{SelectOption, options_from_pairs};
    pub use crate::paginator::{PageItem, Paginator, page_range};
    pub use crate::pointer::{PointerAction, PointerButton, PointerMsg, Rect, from_crossterm_mouse};
    pub use crate::recent::{RecentStore, StoreError};
    pub use crate::state::{Commit, Edge, Phase, SelectionState};
}
