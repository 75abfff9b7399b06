// SPDX-License-Identifier: GPL-3.0-only

//! The keyboard: input state machine, text buffer and language persistence
//! wired together behind the interface the UI event source drives.

use crate::app_settings::STORAGE_KEY;
use crate::editor::TextBuffer;
use crate::input::{EventOutcome, InputStateMachine, KeyEvent};
use crate::layout::KeyboardResource;
use crate::storage::KeyValueStore;

/// One on-screen keyboard instance with its output text.
pub struct Keyboard {
    machine: InputStateMachine,
    buffer: TextBuffer,
    store: Box<dyn KeyValueStore>,
}

impl Keyboard {
    /// Builds a keyboard, restoring the last language from `store`.
    ///
    /// Falls back to `default_language`, then to the first language, when the
    /// stored code is absent or unknown.
    pub fn new(
        resource: KeyboardResource,
        store: Box<dyn KeyValueStore>,
        default_language: &str,
    ) -> Self {
        let language = store
            .get(STORAGE_KEY)
            .filter(|code| resource.languages.index_of(code).is_some())
            .unwrap_or_else(|| default_language.to_string());

        tracing::info!("Starting keyboard in language {}", language);

        Self {
            machine: InputStateMachine::build(resource, &language),
            buffer: TextBuffer::new(),
            store,
        }
    }

    /// Handles one event: updates key state, persists a language switch and
    /// applies the resolved edit to the text.
    pub fn handle_event(&mut self, event: &KeyEvent) -> EventOutcome {
        let outcome = self.machine.handle_event(event);

        if let Some(code) = &outcome.switched_language {
            self.persist_language(code);
        }
        if let Some(emit) = &outcome.emit {
            self.buffer.apply(emit);
        }

        outcome
    }

    /// Advances to the next language, as the language button does.
    pub fn switch_language(&mut self) -> Option<String> {
        let code = self.machine.switch_language()?;
        self.persist_language(&code);
        Some(code)
    }

    fn persist_language(&mut self, code: &str) {
        if let Err(e) = self.store.set(STORAGE_KEY, code) {
            tracing::warn!("Failed to save language {}: {}", code, e);
        }
    }

    /// Physical key-down.
    pub fn press(&mut self, code: &str) -> EventOutcome {
        self.handle_event(&KeyEvent::press(code))
    }

    /// Physical key-up.
    pub fn release(&mut self, code: &str) -> EventOutcome {
        self.handle_event(&KeyEvent::release(code))
    }

    /// Pointer-down on a key.
    pub fn pointer_press(&mut self, code: &str) -> EventOutcome {
        self.handle_event(&KeyEvent::pointer_press(code))
    }

    /// Pointer-up on a key.
    pub fn pointer_release(&mut self, code: &str) -> EventOutcome {
        self.handle_event(&KeyEvent::pointer_release(code))
    }

    /// Pointer leaving a key.
    pub fn pointer_leave(&mut self, code: &str) -> EventOutcome {
        self.handle_event(&KeyEvent::pointer_leave(code))
    }

    /// The output text.
    pub fn content(&self) -> &str {
        self.buffer.content()
    }

    /// The engine cursor.
    pub fn cursor(&self) -> usize {
        self.buffer.cursor()
    }

    /// The text buffer.
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// The input state machine.
    pub fn machine(&self) -> &InputStateMachine {
        &self.machine
    }

    /// Code of the current language.
    pub fn current_language(&self) -> Option<&str> {
        self.machine.current_language()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::load_default_resource;
    use crate::storage::{MemoryStore, StoreError};

    fn keyboard_with(store: MemoryStore) -> Keyboard {
        let resource = load_default_resource().unwrap().into_layout();
        Keyboard::new(resource, Box::new(store), "en")
    }

    /// Store whose writes always fail.
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Io {
                source: std::io::Error::other("read-only"),
                path: "readonly.json".into(),
            })
        }
    }

    /// Test the stored language is restored
    #[test]
    fn test_restores_stored_language() {
        let mut store = MemoryStore::new();
        store.set(STORAGE_KEY, "ru").unwrap();

        let mut keyboard = keyboard_with(store);
        assert_eq!(keyboard.current_language(), Some("ru"));
        keyboard.press("KeyQ");
        assert_eq!(keyboard.content(), "й");
    }

    /// Test unknown stored languages fall back to the default
    #[test]
    fn test_unknown_stored_language() {
        let mut store = MemoryStore::new();
        store.set(STORAGE_KEY, "xx").unwrap();
        assert_eq!(keyboard_with(store).current_language(), Some("en"));
    }

    /// Test Ctrl+Alt switches and the language button cycles back
    #[test]
    fn test_switching_cycles() {
        let mut keyboard = keyboard_with(MemoryStore::new());
        keyboard.press("ControlLeft");
        let outcome = keyboard.press("AltLeft");
        assert_eq!(outcome.switched_language.as_deref(), Some("ru"));
        keyboard.release("AltLeft");
        keyboard.release("ControlLeft");

        assert_eq!(keyboard.switch_language().as_deref(), Some("en"));
        assert_eq!(keyboard.content(), "");
    }

    /// Test a failing store does not interrupt switching
    #[test]
    fn test_store_failure_is_recovered() {
        let resource = load_default_resource().unwrap().into_layout();
        let mut keyboard = Keyboard::new(resource, Box::new(ReadOnlyStore), "ru");
        assert_eq!(keyboard.current_language(), Some("ru"));
        assert_eq!(keyboard.switch_language().as_deref(), Some("en"));
    }

    /// Test typing with editing keys
    #[test]
    fn test_typing_session() {
        let mut keyboard = keyboard_with(MemoryStore::new());
        for code in ["KeyH", "KeyI", "Enter", "KeyX", "Backspace", "Tab", "Space"] {
            keyboard.press(code);
            keyboard.release(code);
        }
        assert_eq!(keyboard.content(), "hi\n\t ");
        assert_eq!(keyboard.cursor(), 5);

        keyboard.press("ArrowUp");
        assert_eq!(keyboard.cursor(), 2);
        keyboard.press("Delete");
        assert_eq!(keyboard.content(), "hi\t ");
    }
}
