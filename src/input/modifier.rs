// SPDX-License-Identifier: GPL-3.0-only

//! Modifier state and case resolution.
//!
//! Two independent axes decide which glyph a key shows and prints:
//!
//! - **Caps Lock**: latched, toggled by each press of the Caps key
//! - **Shift**: held flag, toggled by duplicate press signals
//!
//! Control and Alt are plain held flags used only for the language switch
//! combination.

/// Which glyph of a key is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphVariant {
    /// The default (lowercase) glyph
    Small,
    /// The shifted glyph
    Shift,
}

/// Selects a glyph variant from the case state.
///
/// Keys with an annotated shift glyph (digits, punctuation) ignore Caps Lock:
/// they behave as if only Shift mattered. Letters invert Shift while Caps
/// Lock is latched.
pub fn resolve_glyph(caps: bool, shift: bool, annotated: bool) -> GlyphVariant {
    let shifted = match (caps, shift) {
        (false, false) => false,
        (false, true) => true,
        (true, false) => !annotated,
        (true, true) => annotated,
    };

    if shifted {
        GlyphVariant::Shift
    } else {
        GlyphVariant::Small
    }
}

/// Latched and held modifier flags of one keyboard instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierState {
    caps: bool,
    shift: bool,
    control: bool,
    alt: bool,
}

impl ModifierState {
    /// Creates a new `ModifierState` with nothing latched or held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` while Caps Lock is latched.
    #[must_use]
    pub fn caps(&self) -> bool {
        self.caps
    }

    /// Returns `true` while Shift is held.
    #[must_use]
    pub fn shift(&self) -> bool {
        self.shift
    }

    /// Returns `true` while Control is held.
    #[must_use]
    pub fn control(&self) -> bool {
        self.control
    }

    /// Returns `true` while Alt is held.
    #[must_use]
    pub fn alt(&self) -> bool {
        self.alt
    }

    /// Returns `true` while both Control and Alt are held.
    #[must_use]
    pub fn combo_held(&self) -> bool {
        self.control && self.alt
    }

    /// Flips Caps Lock and returns the new state.
    pub fn toggle_caps(&mut self) -> bool {
        self.caps = !self.caps;
        self.caps
    }

    /// Sets the held Shift flag.
    pub fn set_shift(&mut self, held: bool) {
        self.shift = held;
    }

    /// Sets the held Control flag.
    pub fn set_control(&mut self, held: bool) {
        self.control = held;
    }

    /// Sets the held Alt flag.
    pub fn set_alt(&mut self, held: bool) {
        self.alt = held;
    }

    /// Selects the glyph variant for a key under the current case state.
    #[must_use]
    pub fn variant(&self, annotated: bool) -> GlyphVariant {
        resolve_glyph(self.caps, self.shift, annotated)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Test every row of the case table
    #[test]
    fn test_case_table() {
        assert_eq!(resolve_glyph(false, false, false), GlyphVariant::Small);
        assert_eq!(resolve_glyph(false, false, true), GlyphVariant::Small);
        assert_eq!(resolve_glyph(false, true, false), GlyphVariant::Shift);
        assert_eq!(resolve_glyph(false, true, true), GlyphVariant::Shift);
        assert_eq!(resolve_glyph(true, false, false), GlyphVariant::Shift);
        assert_eq!(resolve_glyph(true, false, true), GlyphVariant::Small);
        assert_eq!(resolve_glyph(true, true, false), GlyphVariant::Small);
        assert_eq!(resolve_glyph(true, true, true), GlyphVariant::Shift);
    }

    /// Test toggling caps and the held flags
    #[test]
    fn test_flags() {
        let mut state = ModifierState::new();
        assert!(state.toggle_caps());
        assert!(!state.toggle_caps());

        state.set_control(true);
        assert!(!state.combo_held());
        state.set_alt(true);
        assert!(state.combo_held());
        state.set_control(false);
        assert!(!state.combo_held());
    }

    /// Test Default trait implementation
    #[test]
    fn test_default() {
        let state = ModifierState::default();
        assert!(!state.caps());
        assert!(!state.shift());
        assert!(!state.control());
        assert!(!state.alt());
        assert_eq!(state.variant(false), GlyphVariant::Small);
    }
}
