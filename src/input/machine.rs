// SPDX-License-Identifier: GPL-3.0-only

//! The input state machine.
//!
//! Consumes normalized press/release/leave events, keeps the modifier state
//! and per-key active flags, and resolves each press into at most one
//! [`Emit`]. The machine never edits text and never persists anything: the
//! caller applies the emit and stores a switched language.

use std::collections::HashMap;

use crate::input::event::{Emit, EventKind, EventOutcome, EventSource, KeyEvent};
use crate::input::keycode::KeyRole;
use crate::input::modifier::{GlyphVariant, ModifierState};
use crate::input::registry::PressedKeyRegistry;
use crate::layout::{KeyDescriptor, KeyboardResource, LanguageTable};

/// Runtime state of one rendered key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRuntimeState {
    code: String,
    row: usize,
    role: KeyRole,
    function_key: bool,
    small: String,
    shift: String,
    annotated: bool,
    active: bool,
    display: String,
    sub_highlighted: bool,
}

impl KeyRuntimeState {
    fn new(descriptor: &KeyDescriptor, row: usize) -> Self {
        Self {
            code: descriptor.code.clone(),
            row,
            role: KeyRole::classify(&descriptor.code, descriptor.function_key),
            function_key: descriptor.function_key,
            small: descriptor.small.clone(),
            shift: descriptor.shift.clone(),
            annotated: descriptor.has_annotated_shift(),
            active: false,
            display: descriptor.small.clone(),
            sub_highlighted: false,
        }
    }

    /// Key code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Zero-based row the key is rendered in.
    pub fn row(&self) -> usize {
        self.row
    }

    /// What the key does when pressed.
    pub fn role(&self) -> KeyRole {
        self.role
    }

    /// Whether the key is a function key.
    pub fn is_function_key(&self) -> bool {
        self.function_key
    }

    /// Default glyph of the current language.
    pub fn small(&self) -> &str {
        &self.small
    }

    /// Shifted glyph of the current language.
    pub fn shift(&self) -> &str {
        &self.shift
    }

    /// Whether the shifted glyph renders as a secondary annotation.
    pub fn has_annotated_shift(&self) -> bool {
        self.annotated
    }

    /// Whether the key is rendered pressed.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The glyph currently shown on the key.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Whether the annotation is emphasised over the main glyph.
    pub fn is_sub_highlighted(&self) -> bool {
        self.sub_highlighted
    }

    /// Returns the glyph for a variant.
    pub fn glyph(&self, variant: GlyphVariant) -> &str {
        match variant {
            GlyphVariant::Small => &self.small,
            GlyphVariant::Shift => &self.shift,
        }
    }

    fn replace_glyphs(&mut self, descriptor: &KeyDescriptor) {
        self.small.clone_from(&descriptor.small);
        self.shift.clone_from(&descriptor.shift);
        self.annotated = descriptor.has_annotated_shift();
    }

    fn refresh(&mut self, modifiers: ModifierState) {
        if self.function_key {
            self.display.clone_from(&self.small);
            self.sub_highlighted = false;
            return;
        }

        let glyph = self.glyph(modifiers.variant(self.annotated)).to_string();
        self.display = glyph;
        self.sub_highlighted = modifiers.shift() && self.annotated;
    }
}

/// Keyboard input state machine.
#[derive(Debug, Clone)]
pub struct InputStateMachine {
    languages: LanguageTable,
    current: usize,
    keys: Vec<KeyRuntimeState>,
    index: HashMap<String, usize>,
    modifiers: ModifierState,
    pressed: PressedKeyRegistry,
}

impl InputStateMachine {
    /// Builds the keys of `resource` in row order, starting in `language`.
    ///
    /// Row codes missing from the starting language are not rendered. An
    /// unknown language starts at the first one.
    pub fn build(resource: KeyboardResource, language: &str) -> Self {
        let KeyboardResource { rows, languages } = resource;

        let current = languages.index_of(language).unwrap_or_else(|| {
            tracing::warn!("Unknown language '{}', using the first language", language);
            0
        });

        let mut keys = Vec::new();
        let mut index = HashMap::new();
        if let Some(lang) = languages.get(current) {
            for (row_idx, row) in rows.iter().enumerate() {
                for code in row {
                    let Some(descriptor) = lang.descriptor(code) else {
                        continue;
                    };
                    index.entry(code.clone()).or_insert(keys.len());
                    keys.push(KeyRuntimeState::new(descriptor, row_idx));
                }
            }
        }

        tracing::debug!(
            "Built {} keys in {} rows for language {:?}",
            keys.len(),
            rows.len(),
            languages.get(current).map(|lang| lang.code.as_str())
        );

        Self {
            languages,
            current,
            keys,
            index,
            modifiers: ModifierState::new(),
            pressed: PressedKeyRegistry::new(),
        }
    }

    /// Handles one event. Unknown codes are ignored.
    pub fn handle_event(&mut self, event: &KeyEvent) -> EventOutcome {
        let Some(&index) = self.index.get(&event.code) else {
            tracing::debug!("Ignoring event for unknown key {}", event.code);
            return EventOutcome::default();
        };

        match event.kind {
            EventKind::Press => self.press(index, event),
            EventKind::Release => {
                self.release(index);
                EventOutcome::default()
            }
            EventKind::PointerLeave => {
                self.pointer_leave(index);
                EventOutcome::default()
            }
        }
    }

    fn press(&mut self, index: usize, event: &KeyEvent) -> EventOutcome {
        let role = self.keys[index].role;
        if event.repeat && role.ignores_repeat() {
            return EventOutcome::default();
        }

        let mut outcome = EventOutcome::default();

        match role {
            KeyRole::Control => self.modifiers.set_control(true),
            KeyRole::Alt => self.modifiers.set_alt(true),
            _ => {}
        }
        // Control while Alt is held, or Alt while Control is held.
        if matches!(role, KeyRole::Control | KeyRole::Alt) && self.modifiers.combo_held() {
            outcome.switched_language = self.switch_language();
        }

        self.keys[index].active = true;

        match role {
            KeyRole::CapsLock => {
                if !self.modifiers.toggle_caps() {
                    self.keys[index].active = false;
                }
                self.refresh_display();
            }
            KeyRole::Shift => {
                if self.modifiers.shift() {
                    self.modifiers.set_shift(false);
                    self.keys[index].active = false;
                } else {
                    self.modifiers.set_shift(true);
                }
                self.refresh_display();
            }
            _ => {}
        }

        outcome.emit = self.resolve(index);

        let key = &self.keys[index];
        if key.active {
            self.pressed
                .record(&key.code, index, event.source == EventSource::Pointer);
        }

        tracing::debug!("Pressed {} -> {:?}", key.code, outcome.emit);
        outcome
    }

    fn resolve(&self, index: usize) -> Option<Emit> {
        let key = &self.keys[index];
        match key.role {
            KeyRole::Action(action) => Some(Emit::Control(action)),
            KeyRole::Printable => {
                let glyph = key.glyph(self.modifiers.variant(key.annotated));
                (!glyph.is_empty()).then(|| Emit::Glyph(glyph.to_string()))
            }
            _ => None,
        }
    }

    fn release(&mut self, index: usize) {
        let key = &mut self.keys[index];
        self.pressed.take(&key.code);

        match key.role {
            KeyRole::Control => self.modifiers.set_control(false),
            KeyRole::Alt => self.modifiers.set_alt(false),
            _ => {}
        }

        if !key.role.is_latching() {
            key.active = false;
        }
        tracing::debug!("Released {}", key.code);
    }

    /// Synthesizes the release of a pointer-pressed key the pointer left.
    fn pointer_leave(&mut self, index: usize) {
        if !self.pressed.is_leave_armed(&self.keys[index].code) {
            return;
        }

        if self.keys[index].role == KeyRole::Shift {
            self.modifiers.set_shift(false);
            self.keys[index].active = false;
            self.refresh_display();
        }
        self.release(index);
    }

    /// Advances to the next language and returns its code.
    ///
    /// Every key takes the glyphs of its code in the new language; codes the
    /// language lacks keep their glyphs. Returns `None` only for an empty
    /// language table.
    pub fn switch_language(&mut self) -> Option<String> {
        self.current = self.languages.next_index(self.current);
        let lang = self.languages.get(self.current)?;

        for key in self.keys.iter_mut() {
            if let Some(descriptor) = lang.descriptor(&key.code) {
                key.replace_glyphs(descriptor);
            }
        }
        let code = lang.code.clone();
        self.refresh_display();

        tracing::info!("Switched language to {}", code);
        Some(code)
    }

    fn refresh_display(&mut self) {
        let modifiers = self.modifiers;
        for key in self.keys.iter_mut() {
            key.refresh(modifiers);
        }
    }

    /// Code of the current language.
    pub fn current_language(&self) -> Option<&str> {
        self.languages.get(self.current).map(|lang| lang.code.as_str())
    }

    /// The language tables.
    pub fn languages(&self) -> &LanguageTable {
        &self.languages
    }

    /// Current modifier state.
    pub fn modifiers(&self) -> ModifierState {
        self.modifiers
    }

    /// All rendered keys in row order.
    pub fn keys(&self) -> &[KeyRuntimeState] {
        &self.keys
    }

    /// Looks up a rendered key by code.
    pub fn key(&self, code: &str) -> Option<&KeyRuntimeState> {
        self.index.get(code).map(|&idx| &self.keys[idx])
    }

    /// Returns `true` if the code is in the pressed-key registry.
    pub fn is_pressed(&self, code: &str) -> bool {
        self.pressed.contains(code)
    }

    /// Number of keys in the pressed-key registry.
    pub fn pressed_count(&self) -> usize {
        self.pressed.len()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
