//! The dropdown component.
//!
//! [`Dropdown`] composes the option list, the selection state machine, the
//! interpreter and a dismissal subscription behind the controlled-component
//! contract: the owner supplies `options` and `value`, and learns about
//! commits through `on_change` (called exactly once per commit).
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use parking_lot::Mutex;
//!
//! use droplist::dismiss::DismissHub;
//! use droplist::dropdown::Dropdown;
//! use droplist::key::{KeyMsg, KeyType};
//! use droplist::option::SelectOption;
//! use droplist::pointer::PointerMsg;
//!
//! let changes = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&changes);
//!
//! let hub = DismissHub::new();
//! let mut region = Dropdown::new()
//!     .options(vec![
//!         SelectOption::new("tbs", "Tbilisi"),
//!         SelectOption::new("bat", "Batumi"),
//!     ])
//!     .value("tbs")
//!     .on_change(move |v| sink.lock().push(v.to_string()));
//! region.mount(&hub);
//! region.layout(0, 0);
//!
//! region.handle_key(&KeyMsg::from_type(KeyType::Down));
//! region.handle_key(&KeyMsg::from_type(KeyType::Down));
//! region.handle_key(&KeyMsg::from_type(KeyType::Enter));
//! assert_eq!(changes.lock().as_slice(), ["bat"]);
//!
//! region.handle_key(&KeyMsg::from_type(KeyType::Enter));
//! assert!(region.is_open());
//! hub.dispatch(&PointerMsg::press(60, 20));
//! assert!(!region.is_open());
//! ```

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::dismiss::{DismissHub, Subscription};
use crate::interpreter::{Interpreter, Outcome, Target};
use crate::key::KeyMsg;
use crate::keymap::KeyMap;
use crate::option::SelectOption;
use crate::pointer::{PointerMsg, Rect};
use crate::state::{Edge, SelectionState};

static LAST_ID: AtomicUsize = AtomicUsize::new(0);

fn next_id() -> usize {
    LAST_ID.fetch_add(1, Ordering::Relaxed)
}

const ACTIVE_MARK: &str = "› ";
const DISABLED_MARK: &str = "× ";
const PLAIN_MARK: &str = "  ";
const COMMITTED_MARK: &str = " ✓";
const CARET_CLOSED: &str = "▾";
const CARET_OPEN: &str = "▴";

/// Screen area the component occupies: the trigger, plus the list when open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Boundary {
    /// The trigger line.
    pub trigger: Rect,
    /// The open list, if shown.
    pub list: Option<Rect>,
}

impl Boundary {
    /// Whether `(x, y)` is inside the component.
    #[must_use]
    pub fn contains(&self, x: u16, y: u16) -> bool {
        self.trigger.contains(x, y) || self.list.is_some_and(|r| r.contains(x, y))
    }
}

/// State shared with the dismissal listener.
#[derive(Debug, Default)]
struct Shared {
    state: SelectionState,
    boundary: Boundary,
}

type ChangeFn = Box<dyn FnMut(&str) + Send>;

/// An accessible single-select dropdown.
pub struct Dropdown {
    id: usize,
    options: Vec<SelectOption>,
    placeholder: String,
    disabled: bool,
    width: u16,
    max_width: u16,
    max_rows: usize,
    origin: (u16, u16),
    offset: usize,
    interpreter: Interpreter,
    shared: Arc<Mutex<Shared>>,
    on_change: Option<ChangeFn>,
    subscription: Option<Subscription>,
}

impl Default for Dropdown {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Dropdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shared = self.shared.lock();
        f.debug_struct("Dropdown")
            .field("id", &self.id)
            .field("options", &self.options.len())
            .field("value", &shared.state.value())
            .field("open", &shared.state.is_open())
            .field("active", &shared.state.active_index())
            .field("disabled", &self.disabled)
            .field("mounted", &self.subscription.is_some())
            .finish_non_exhaustive()
    }
}

impl Dropdown {
    /// Creates an empty, closed, unmounted dropdown.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: next_id(),
            options: Vec::new(),
            placeholder: String::new(),
            disabled: false,
            width: 0,
            max_width: u16::MAX,
            max_rows: 8,
            origin: (0, 0),
            offset: 0,
            interpreter: Interpreter::new(),
            shared: Arc::new(Mutex::new(Shared::default())),
            on_change: None,
            subscription: None,
        }
    }

    /// Sets the options.
    #[must_use]
    pub fn options(mut self, options: Vec<SelectOption>) -> Self {
        self.set_options(options);
        self
    }

    /// Sets the committed value.
    #[must_use]
    pub fn value(self, value: impl Into<String>) -> Self {
        self.set_value(value);
        self
    }

    /// Sets the text shown when no option matches the value.
    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Sets whether the whole component is disabled.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.set_disabled(disabled);
        self
    }

    /// Sets a fixed width in columns. `0` sizes to the widest label.
    #[must_use]
    pub fn width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    /// Caps the automatic width; longer labels are truncated with `…`.
    #[must_use]
    pub fn max_width(mut self, width: u16) -> Self {
        self.max_width = width.max(1);
        self
    }

    /// Sets how many option rows are visible at once.
    #[must_use]
    pub fn max_rows(mut self, rows: usize) -> Self {
        self.max_rows = rows.max(1);
        self
    }

    /// Sets the key map.
    #[must_use]
    pub fn keymap(mut self, keymap: KeyMap) -> Self {
        self.interpreter = Interpreter::with_keymap(keymap);
        self
    }

    /// Sets the change callback.
    #[must_use]
    pub fn on_change<F>(mut self, f: F) -> Self
    where
        F: FnMut(&str) + Send + 'static,
    {
        self.on_change = Some(Box::new(f));
        self
    }

    // -------------------------------------------------------------------------
    // Props
    // -------------------------------------------------------------------------

    /// Replaces the option list.
    pub fn set_options(&mut self, options: Vec<SelectOption>) {
        self.options = options;
        self.offset = self
            .offset
            .min(self.options.len().saturating_sub(self.visible_rows()));
        self.shared.lock().state.revalidate(&self.options);
        self.scroll_to_active();
        self.relayout();
    }

    /// Replaces the committed value without reporting a change.
    pub fn set_value(&self, value: impl Into<String>) {
        self.shared.lock().state.set_value(value);
    }

    /// Enables or disables the component. Disabling closes an open list.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            self.close();
        }
    }

    /// Returns the component id.
    #[must_use]
    pub const fn id(&self) -> usize {
        self.id
    }

    /// The options.
    #[must_use]
    pub fn get_options(&self) -> &[SelectOption] {
        &self.options
    }

    /// The committed value.
    #[must_use]
    pub fn get_value(&self) -> String {
        self.shared.lock().state.value().to_string()
    }

    /// Label of the committed option, if it is in the list.
    #[must_use]
    pub fn selected_label(&self) -> Option<&str> {
        let value = self.get_value();
        self.options
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.as_str())
    }

    /// Whether the component is disabled.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Whether the list is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.shared.lock().state.is_open()
    }

    /// The highlighted option, if the list is open.
    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        let shared = self.shared.lock();
        if shared.state.is_open() {
            shared.state.active_index()
        } else {
            None
        }
    }

    /// The key map in use.
    #[must_use]
    pub const fn get_keymap(&self) -> &KeyMap {
        self.interpreter.keymap()
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Installs the outside-pointer listener. Mounting twice is a no-op.
    pub fn mount(&mut self, hub: &DismissHub) {
        if self.subscription.is_some() {
            debug!(dropdown = self.id, "already mounted");
            return;
        }
        let shared = Arc::downgrade(&self.shared);
        let id = self.id;
        self.subscription = Some(hub.subscribe(move |pointer| {
            let Some(shared) = shared.upgrade() else {
                return;
            };
            let mut shared = shared.lock();
            if shared.state.is_open() && !shared.boundary.contains(pointer.x, pointer.y) {
                shared.state.close();
                shared.boundary.list = None;
                debug!(dropdown = id, %pointer, "dismissed by outside pointer-down");
            }
        }));
        debug!(dropdown = self.id, "mounted");
    }

    /// Removes the outside-pointer listener and resets to closed.
    pub fn unmount(&mut self) {
        if self.subscription.take().is_some() {
            self.close();
            debug!(dropdown = self.id, "unmounted");
        }
    }

    /// Whether the listener is installed.
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Opens the list. Ignored while disabled.
    pub fn open(&mut self) {
        if self.disabled {
            return;
        }
        self.shared.lock().state.open(&self.options);
        self.scroll_to_active();
        self.relayout();
    }

    /// Closes the list.
    pub fn close(&mut self) {
        self.shared.lock().state.close();
        self.relayout();
    }

    /// Commits the option at `index`. Returns whether a commit happened.
    pub fn commit(&mut self, index: usize) -> bool {
        if self.disabled {
            return false;
        }
        let commit = self.shared.lock().state.commit(&self.options, index);
        self.relayout();
        match commit {
            Some(c) => {
                self.emit(&c.value);
                true
            }
            None => false,
        }
    }

    /// Moves the highlight by `delta` enabled options.
    pub fn move_active(&mut self, delta: isize) {
        if self.disabled {
            return;
        }
        self.shared.lock().state.move_active(&self.options, delta);
        self.scroll_to_active();
        self.relayout();
    }

    /// Jumps to the first or last enabled option.
    pub fn move_to_edge(&mut self, edge: Edge) {
        if self.disabled {
            return;
        }
        self.shared.lock().state.move_to_edge(&self.options, edge);
        self.scroll_to_active();
    }

    /// Type-ahead on `c`.
    pub fn type_ahead(&mut self, c: char) {
        if self.disabled {
            return;
        }
        self.shared.lock().state.type_ahead(&self.options, c);
        self.scroll_to_active();
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    /// Handles a key event.
    pub fn handle_key(&mut self, key: &KeyMsg) -> Outcome {
        if self.disabled {
            return Outcome::default();
        }
        let outcome = {
            let mut shared = self.shared.lock();
            self.interpreter
                .handle_key(&mut shared.state, &self.options, key)
        };
        self.after(&outcome);
        outcome
    }

    /// Handles a pointer event delivered to this component.
    ///
    /// Pointer-downs outside the boundary are ignored here; route every
    /// pointer event through [`DismissHub::dispatch`] as well so that open
    /// lists get dismissed.
    pub fn handle_pointer(&mut self, pointer: &PointerMsg) -> Outcome {
        if self.disabled {
            return Outcome::default();
        }
        let target = self.hit_test(pointer.x, pointer.y);
        let outcome = {
            let mut shared = self.shared.lock();
            self.interpreter
                .handle_pointer(&mut shared.state, &self.options, pointer, target)
        };
        self.after(&outcome);
        outcome
    }

    fn after(&mut self, outcome: &Outcome) {
        if outcome.changed {
            self.scroll_to_active();
            self.relayout();
        }
        if let Some(value) = &outcome.committed {
            self.emit(value);
        }
    }

    fn emit(&mut self, value: &str) {
        debug!(dropdown = self.id, value, "change emitted");
        if let Some(on_change) = self.on_change.as_mut() {
            on_change(value);
        }
    }

    // -------------------------------------------------------------------------
    // Layout & view
    // -------------------------------------------------------------------------

    /// Places the component with its trigger at `(x, y)`; the list opens
    /// downward.
    pub fn layout(&mut self, x: u16, y: u16) {
        self.origin = (x, y);
        self.relayout();
    }

    /// The current boundary.
    #[must_use]
    pub fn boundary(&self) -> Boundary {
        self.shared.lock().boundary
    }

    /// Which part of the component `(x, y)` lands on.
    #[must_use]
    pub fn hit_test(&self, x: u16, y: u16) -> Target {
        let boundary = self.boundary();
        if boundary.trigger.contains(x, y) {
            return Target::Trigger;
        }
        match boundary.list {
            Some(list) if list.contains(x, y) => {
                let row = usize::from(y - list.y) + self.offset;
                if row < self.options.len() {
                    Target::Row(row)
                } else {
                    Target::List
                }
            }
            _ => Target::Outside,
        }
    }

    /// Width in columns: the fixed width if set, else the widest label
    /// capped at `max_width`.
    #[must_use]
    pub fn resolved_width(&self) -> u16 {
        if self.width > 0 {
            return self.width;
        }
        let widest = self
            .options
            .iter()
            .map(|o| o.label.width())
            .chain(std::iter::once(self.placeholder.width()))
            .max()
            .unwrap_or(0);
        u16::try_from(widest + PLAIN_MARK.width() + COMMITTED_MARK.width())
            .unwrap_or(u16::MAX)
            .min(self.max_width)
    }

    fn visible_rows(&self) -> usize {
        self.max_rows.min(self.options.len())
    }

    fn relayout(&self) {
        let (x, y) = self.origin;
        let width = self.resolved_width();
        let rows = u16::try_from(self.visible_rows()).unwrap_or(u16::MAX);
        let mut shared = self.shared.lock();
        shared.boundary.trigger = Rect::new(x, y, width, 1);
        shared.boundary.list = if shared.state.is_open() && rows > 0 {
            Some(Rect::new(x, y.saturating_add(1), width, rows))
        } else {
            None
        };
    }

    fn scroll_to_active(&mut self) {
        let Some(active) = self.active_index() else {
            return;
        };
        let rows = self.visible_rows().max(1);
        if active < self.offset {
            self.offset = active;
        } else if active >= self.offset + rows {
            self.offset = active + 1 - rows;
        }
    }

    /// Renders the trigger and, when open, the visible rows.
    #[must_use]
    pub fn view(&self) -> String {
        let shared = self.shared.lock();
        let width = usize::from(self.resolved_width());
        let open = shared.state.is_open();
        let value = shared.state.value();

        let label = self
            .options
            .iter()
            .find(|o| o.value == value)
            .map_or(self.placeholder.as_str(), |o| o.label.as_str());
        let caret = if open { CARET_OPEN } else { CARET_CLOSED };
        let label_width = width.saturating_sub(caret.width() + 1);
        let mut out = format!("{} {caret}", fit(label, label_width));

        if open {
            let active = shared.state.active_index();
            let rows = self.visible_rows();
            for (index, opt) in self
                .options
                .iter()
                .enumerate()
                .skip(self.offset)
                .take(rows)
            {
                let mark = if opt.disabled {
                    DISABLED_MARK
                } else if Some(index) == active {
                    ACTIVE_MARK
                } else {
                    PLAIN_MARK
                };
                let check = if opt.value == value { COMMITTED_MARK } else { "" };
                let text_width = width.saturating_sub(mark.width() + check.width());
                out.push('\n');
                out.push_str(mark);
                out.push_str(&fit(&opt.label, text_width));
                out.push_str(check);
            }
        }
        out
    }
}

/// Truncates `text` to `width` columns (ending in `…` when cut) and pads it
/// with spaces to exactly `width`.
fn fit(text: &str, width: usize) -> String {
    if text.width() <= width {
        let pad = width - text.width();
        return format!("{text}{}", " ".repeat(pad));
    }
    let mut out = String::new();
    let mut used = 0;
    let budget = width.saturating_sub(1);
    for grapheme in text.graphemes(true) {
        let w = grapheme.width();
        if used + w > budget {
            break;
        }
        out.push_str(grapheme);
        used += w;
    }
    if width > 0 {
        out.push('…');
        used += 1;
    }
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}
