// SPDX-License-Identifier: GPL-3.0-only

//! Registry of keys that are currently held down.
//!
//! A key code is present from the press that left it active until the
//! release (or synthesized release) that follows. Pointer presses also arm a
//! one-shot leave listener, disarmed together with the entry.

use std::collections::HashMap;

/// A held key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PressedEntry {
    /// Position of the key in the keyboard's key list
    pub index: usize,
    /// Whether a pointer leave should synthesize the release
    pub leave_armed: bool,
}

/// Tracks held keys by code.
#[derive(Debug, Clone, Default)]
pub struct PressedKeyRegistry {
    entries: HashMap<String, PressedEntry>,
}

impl PressedKeyRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a press. A pointer press arms the leave listener; a repeated
    /// press keeps an already armed listener.
    pub fn record(&mut self, code: &str, index: usize, pointer: bool) {
        let entry = self
            .entries
            .entry(code.to_string())
            .or_insert(PressedEntry {
                index,
                leave_armed: false,
            });
        entry.leave_armed |= pointer;
    }

    /// Removes an entry, disarming its leave listener.
    pub fn take(&mut self, code: &str) -> Option<PressedEntry> {
        self.entries.remove(code)
    }

    /// Returns `true` if the code is held.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    /// Returns `true` if a pointer leave for this code should release it.
    #[must_use]
    pub fn is_leave_armed(&self, code: &str) -> bool {
        self.entries.get(code).is_some_and(|entry| entry.leave_armed)
    }

    /// Returns the number of held keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no key is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Test record and take
    #[test]
    fn test_record_take() {
        let mut registry = PressedKeyRegistry::new();
        registry.record("KeyA", 3, false);
        assert!(registry.contains("KeyA"));
        assert!(!registry.is_leave_armed("KeyA"));

        let entry = registry.take("KeyA").unwrap();
        assert_eq!(entry.index, 3);
        assert!(registry.is_empty());
        assert!(registry.take("KeyA").is_none(), "entries are removed exactly once");
    }

    /// Test that pointer presses arm the leave listener
    #[test]
    fn test_pointer_arms_leave() {
        let mut registry = PressedKeyRegistry::new();
        registry.record("KeyB", 0, true);
        assert!(registry.is_leave_armed("KeyB"));

        registry.record("KeyB", 0, false);
        assert!(registry.is_leave_armed("KeyB"));
        assert_eq!(registry.len(), 1);

        registry.take("KeyB");
        assert!(!registry.is_leave_armed("KeyB"));
    }
}
