// SPDX-License-Identifier: GPL-3.0-only

//! Normalized input events and the outcome of handling them.

use crate::input::keycode::ControlAction;

/// Where an event came from.
///
/// The state machine treats both sources alike, except that pointer presses
/// arm the one-shot "pointer left the key" cleanup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSource {
    /// A physical key
    Physical,
    /// A pointer on a rendered key
    Pointer,
}

/// What happened to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Key-down or pointer-down inside the key
    Press,
    /// Key-up or pointer-up
    Release,
    /// The pointer left the key's hit area
    PointerLeave,
}

/// A normalized `{code, kind}` event delivered by the UI event source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// Key code of the affected key
    pub code: String,
    /// Press, release or pointer leave
    pub kind: EventKind,
    /// Physical key or pointer
    pub source: EventSource,
    /// Physical auto-repeat signal
    pub repeat: bool,
}

impl KeyEvent {
    /// Creates an event.
    pub fn new(code: impl Into<String>, kind: EventKind, source: EventSource) -> Self {
        Self {
            code: code.into(),
            kind,
            source,
            repeat: false,
        }
    }

    /// A physical key-down.
    pub fn press(code: impl Into<String>) -> Self {
        Self::new(code, EventKind::Press, EventSource::Physical)
    }

    /// A physical auto-repeat key-down.
    pub fn repeat(code: impl Into<String>) -> Self {
        Self {
            repeat: true,
            ..Self::press(code)
        }
    }

    /// A physical key-up.
    pub fn release(code: impl Into<String>) -> Self {
        Self::new(code, EventKind::Release, EventSource::Physical)
    }

    /// A pointer-down on a key.
    pub fn pointer_press(code: impl Into<String>) -> Self {
        Self::new(code, EventKind::Press, EventSource::Pointer)
    }

    /// A pointer-up on a key.
    pub fn pointer_release(code: impl Into<String>) -> Self {
        Self::new(code, EventKind::Release, EventSource::Pointer)
    }

    /// The pointer leaving a key.
    pub fn pointer_leave(code: impl Into<String>) -> Self {
        Self::new(code, EventKind::PointerLeave, EventSource::Pointer)
    }
}

/// A resolved press, ready for the text cursor engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emit {
    /// Insert a printable glyph
    Glyph(String),
    /// Perform a named editing action
    Control(ControlAction),
}

/// Result of handling one event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventOutcome {
    /// The edit to apply, if the event resolved to one
    pub emit: Option<Emit>,
    /// The newly selected language, if the event switched languages
    pub switched_language: Option<String>,
}

impl EventOutcome {
    /// Returns `true` if the event changed neither the text nor the language.
    pub fn is_empty(&self) -> bool {
        self.emit.is_none() && self.switched_language.is_none()
    }
}
