// SPDX-License-Identifier: GPL-3.0-only

//! Key role classification.
//!
//! Key codes are classified once, when the keyboard is built, into a
//! [`KeyRole`] that the state machine matches on at event time.
//!
//! # Classification Order
//!
//! 1. Codes naming a modifier family: `Control*`, `Alt*`, `CapsLock`, `Shift*`
//! 2. Codes with an editing action: `Tab`, arrows, `Enter`, `Delete`,
//!    `Backspace`, `Space`
//! 3. Any other function key is inert
//! 4. Everything else prints its glyph

/// A named editing action consumed by the text cursor engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlAction {
    /// Insert a tab character
    Tab,
    /// Move the cursor one position left
    ArrowLeft,
    /// Move the cursor one position right
    ArrowRight,
    /// Move the cursor towards the previous line
    ArrowUp,
    /// Move the cursor towards the next line
    ArrowDown,
    /// Insert a newline
    Enter,
    /// Delete the character at the cursor
    Delete,
    /// Delete the character before the cursor
    Backspace,
    /// Insert a space
    Space,
}

impl ControlAction {
    /// Returns the action bound to an exact key code.
    pub fn from_code(code: &str) -> Option<Self> {
        let action = match code {
            "Tab" => Self::Tab,
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            "ArrowUp" => Self::ArrowUp,
            "ArrowDown" => Self::ArrowDown,
            "Enter" => Self::Enter,
            "Delete" => Self::Delete,
            "Backspace" => Self::Backspace,
            "Space" => Self::Space,
            _ => return None,
        };
        Some(action)
    }
}

/// What a key does when pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyRole {
    /// Held Control key (either side)
    Control,
    /// Held Alt key (either side)
    Alt,
    /// Latching Caps Lock
    CapsLock,
    /// Shift key (either side)
    Shift,
    /// Key bound to an editing action
    Action(ControlAction),
    /// Function key with no effect on the text (e.g., Meta)
    Inert,
    /// Key that prints its resolved glyph
    Printable,
}

impl KeyRole {
    /// Classifies a key code.
    pub fn classify(code: &str, function_key: bool) -> Self {
        if code.contains("Control") {
            Self::Control
        } else if code.contains("Alt") {
            Self::Alt
        } else if code.contains("Caps") {
            Self::CapsLock
        } else if code.contains("Shift") {
            Self::Shift
        } else if let Some(action) = ControlAction::from_code(code) {
            Self::Action(action)
        } else if function_key {
            Self::Inert
        } else {
            Self::Printable
        }
    }

    /// Returns `true` for roles whose press ignores physical auto-repeat.
    pub fn ignores_repeat(self) -> bool {
        matches!(self, Self::Control | Self::Alt | Self::CapsLock)
    }

    /// Returns `true` for roles whose active flag is not cleared on release.
    pub fn is_latching(self) -> bool {
        matches!(self, Self::CapsLock | Self::Shift)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
