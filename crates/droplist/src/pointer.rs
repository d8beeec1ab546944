//! Pointer (mouse) input handling.
//!
//! Terminal cells are the coordinate space: `x` is the column and `y` the
//! row, both 0-indexed.

use std::fmt;

/// Pointer event.
///
/// # Example
///
/// ```rust
/// use droplist::pointer::{PointerAction, PointerButton, PointerMsg};
///
/// let click = PointerMsg::press(4, 2);
/// assert!(click.is_primary_down());
/// assert_eq!(click.to_string(), "left press (4, 2)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerMsg {
    /// Column, 0-indexed.
    pub x: u16,
    /// Row, 0-indexed.
    pub y: u16,
    /// The action that occurred.
    pub action: PointerAction,
    /// The button involved.
    pub button: PointerButton,
}

impl PointerMsg {
    /// A left-button press at the given cell.
    #[must_use]
    pub const fn press(x: u16, y: u16) -> Self {
        Self {
            x,
            y,
            action: PointerAction::Press,
            button: PointerButton::Left,
        }
    }

    /// Pointer motion (hover) over the given cell.
    #[must_use]
    pub const fn hover(x: u16, y: u16) -> Self {
        Self {
            x,
            y,
            action: PointerAction::Motion,
            button: PointerButton::None,
        }
    }

    /// Whether this is a pointer-down of any non-wheel button.
    #[must_use]
    pub fn is_down(&self) -> bool {
        self.action == PointerAction::Press
            && !self.is_wheel()
            && self.button != PointerButton::None
    }

    /// Whether this is a pointer-down of the primary (left) button.
    #[must_use]
    pub fn is_primary_down(&self) -> bool {
        self.action == PointerAction::Press && self.button == PointerButton::Left
    }

    /// Whether this is a wheel event.
    #[must_use]
    pub fn is_wheel(&self) -> bool {
        matches!(self.button, PointerButton::WheelUp | PointerButton::WheelDown)
    }
}

impl fmt::Display for PointerMsg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.button == PointerButton::None {
            write!(f, "{} ({}, {})", self.action, self.x, self.y)
        } else {
            write!(f, "{} {} ({}, {})", self.button, self.action, self.x, self.y)
        }
    }
}

/// Pointer action type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerAction {
    /// Button pressed.
    #[default]
    Press,
    /// Button released.
    Release,
    /// Pointer moved.
    Motion,
}

impl fmt::Display for PointerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Press => "press",
            Self::Release => "release",
            Self::Motion => "motion",
        };
        write!(f, "{name}")
    }
}

/// Pointer button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerButton {
    /// No button (motion only).
    #[default]
    None,
    /// Left button.
    Left,
    /// Middle button.
    Middle,
    /// Right button.
    Right,
    /// Scroll wheel up.
    WheelUp,
    /// Scroll wheel down.
    WheelDown,
}

impl fmt::Display for PointerButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Left => "left",
            Self::Middle => "middle",
            Self::Right => "right",
            Self::WheelUp => "wheel up",
            Self::WheelDown => "wheel down",
        };
        write!(f, "{name}")
    }
}

/// Convert a crossterm mouse event to a [`PointerMsg`].
///
/// Horizontal scrolling has no counterpart and is reported as motion.
#[must_use]
pub fn from_crossterm_mouse(event: crossterm::event::MouseEvent) -> PointerMsg {
    use crossterm::event::{MouseButton, MouseEventKind};

    let map_button = |b: MouseButton| match b {
        MouseButton::Left => PointerButton::Left,
        MouseButton::Right => PointerButton::Right,
        MouseButton::Middle => PointerButton::Middle,
    };

    let (action, button) = match event.kind {
        MouseEventKind::Down(b) => (PointerAction::Press, map_button(b)),
        MouseEventKind::Up(b) => (PointerAction::Release, map_button(b)),
        MouseEventKind::Drag(b) => (PointerAction::Motion, map_button(b)),
        MouseEventKind::ScrollUp => (PointerAction::Press, PointerButton::WheelUp),
        MouseEventKind::ScrollDown => (PointerAction::Press, PointerButton::WheelDown),
        MouseEventKind::Moved | MouseEventKind::ScrollLeft | MouseEventKind::ScrollRight => {
            (PointerAction::Motion, PointerButton::None)
        }
    };

    PointerMsg {
        x: event.column,
        y: event.row,
        action,
        button,
    }
}

/// An axis-aligned rectangle of terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Left column.
    pub x: u16,
    /// Top row.
    pub y: u16,
    /// Width in columns.
    pub width: u16,
    /// Height in rows.
    pub height: u16,
}

impl Rect {
    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the rectangle covers no cells.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether the cell `(x, y)` lies inside the rectangle.
    #[must_use]
    pub fn contains(&self, x: u16, y: u16) -> bool {
        let (x, y) = (u32::from(x), u32::from(y));
        let (left, top) = (u32::from(self.x), u32::from(self.y));
        x >= left
            && y >= top
            && x < left + u32::from(self.width)
            && y < top + u32::from(self.height)
    }
}
