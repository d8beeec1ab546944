//! Keyboard input handling.
//!
//! Key events are normalised into [`KeyMsg`] so that bindings can be matched
//! by their canonical string form (`"enter"`, `"down"`, `" "`, `"a"`).

use std::fmt;

/// Keyboard key event.
///
/// # Example
///
/// ```rust
/// use droplist::key::{KeyMsg, KeyType};
///
/// let key = KeyMsg::from_type(KeyType::Down);
/// assert_eq!(key.to_string(), "down");
///
/// let key = KeyMsg::from_char('b');
/// assert_eq!(key.printable(), Some('b'));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMsg {
    /// The type of key pressed.
    pub key_type: KeyType,
    /// For [`KeyType::Runes`], the characters typed.
    pub runes: Vec<char>,
    /// Whether Alt was held.
    pub alt: bool,
}

impl KeyMsg {
    /// Create a key message from a key type.
    #[must_use]
    pub fn from_type(key_type: KeyType) -> Self {
        Self {
            key_type,
            runes: Vec::new(),
            alt: false,
        }
    }

    /// Create a key message from a single character.
    ///
    /// A space is reported as [`KeyType::Space`], matching terminal input.
    #[must_use]
    pub fn from_char(c: char) -> Self {
        if c == ' ' {
            return Self::from_type(KeyType::Space);
        }
        Self {
            key_type: KeyType::Runes,
            runes: vec![c],
            alt: false,
        }
    }

    /// Set the alt modifier.
    #[must_use]
    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    /// The single printable character carried by this event, if any.
    ///
    /// Returns `None` for special keys, alt combinations, control characters
    /// and multi-character input such as pastes.
    #[must_use]
    pub fn printable(&self) -> Option<char> {
        if self.key_type != KeyType::Runes || self.alt {
            return None;
        }
        match self.runes.as_slice() {
            [c] if !c.is_control() => Some(*c),
            _ => None,
        }
    }
}

impl fmt::Display for KeyMsg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.alt {
            write!(f, "alt+")?;
        }
        if self.key_type == KeyType::Runes {
            for c in &self.runes {
                write!(f, "{c}")?;
            }
            Ok(())
        } else {
            write!(f, "{}", self.key_type)
        }
    }
}

/// Key type enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    /// Regular character input.
    Runes,
    /// Enter / return.
    Enter,
    /// Space bar.
    Space,
    /// Escape.
    Esc,
    /// Tab.
    Tab,
    /// Shift+Tab.
    ShiftTab,
    /// Backspace.
    Backspace,
    /// Delete.
    Delete,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Home.
    Home,
    /// End.
    End,
    /// Page Up.
    PgUp,
    /// Page Down.
    PgDown,
    /// Ctrl+C.
    CtrlC,
    /// Ctrl+N.
    CtrlN,
    /// Ctrl+P.
    CtrlP,
    /// Ctrl+U.
    CtrlU,
    /// Any key without a dedicated variant.
    Unknown,
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Runes => "runes",
            Self::Enter => "enter",
            Self::Space => " ",
            Self::Esc => "esc",
            Self::Tab => "tab",
            Self::ShiftTab => "shift+tab",
            Self::Backspace => "backspace",
            Self::Delete => "delete",
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::Home => "home",
            Self::End => "end",
            Self::PgUp => "pgup",
            Self::PgDown => "pgdown",
            Self::CtrlC => "ctrl+c",
            Self::CtrlN => "ctrl+n",
            Self::CtrlP => "ctrl+p",
            Self::CtrlU => "ctrl+u",
            Self::Unknown => "unknown",
        };
        write!(f, "{name}")
    }
}

impl KeyType {
    /// Check if this is a cursor movement key.
    #[must_use]
    pub fn is_cursor(&self) -> bool {
        matches!(
            self,
            Self::Up
                | Self::Down
                | Self::Left
                | Self::Right
                | Self::Home
                | Self::End
                | Self::PgUp
                | Self::PgDown
        )
    }
}

/// Convert a crossterm key event to a [`KeyMsg`].
#[must_use]
pub fn from_crossterm_key(
    code: crossterm::event::KeyCode,
    modifiers: crossterm::event::KeyModifiers,
) -> KeyMsg {
    use crossterm::event::{KeyCode, KeyModifiers};

    let ctrl = modifiers.contains(KeyModifiers::CONTROL);
    let shift = modifiers.contains(KeyModifiers::SHIFT);
    let alt = modifiers.contains(KeyModifiers::ALT);

    let key_type = match code {
        KeyCode::Char(c) if ctrl => match c.to_ascii_lowercase() {
            'c' => KeyType::CtrlC,
            'n' => KeyType::CtrlN,
            'p' => KeyType::CtrlP,
            'u' => KeyType::CtrlU,
            'm' => KeyType::Enter,
            'i' => KeyType::Tab,
            _ => KeyType::Unknown,
        },
        KeyCode::Char(' ') => KeyType::Space,
        KeyCode::Char(c) => {
            return KeyMsg {
                key_type: KeyType::Runes,
                runes: vec![c],
                alt,
            };
        }
        KeyCode::Enter => KeyType::Enter,
        KeyCode::Esc => KeyType::Esc,
        KeyCode::Tab if shift => KeyType::ShiftTab,
        KeyCode::Tab => KeyType::Tab,
        KeyCode::BackTab => KeyType::ShiftTab,
        KeyCode::Backspace => KeyType::Backspace,
        KeyCode::Delete => KeyType::Delete,
        KeyCode::Up => KeyType::Up,
        KeyCode::Down => KeyType::Down,
        KeyCode::Left => KeyType::Left,
        KeyCode::Right => KeyType::Right,
        KeyCode::Home => KeyType::Home,
        KeyCode::End => KeyType::End,
        KeyCode::PageUp => KeyType::PgUp,
        KeyCode::PageDown => KeyType::PgDown,
        _ => KeyType::Unknown,
    };

    KeyMsg {
        key_type,
        runes: Vec::new(),
        alt,
    }
}
