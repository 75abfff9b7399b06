// SPDX-License-Identifier: GPL-3.0-only

//! Keyslate - an on-screen keyboard input engine
//!
//! This crate routes physical and pointer key activity into a text buffer,
//! applying Caps Lock, Shift and language-layout transformations.
//!
//! # Architecture
//!
//! 1. **Input state machine** (`input`): consumes normalized press/release
//!    events, tracks modifiers and held keys, and resolves each press into a
//!    glyph or a named editing action.
//!
//! 2. **Text cursor engine** (`editor`): owns the output text and cursor and
//!    applies one edit per resolved press.
//!
//! The `keyboard` module wires both together with the language tables
//! (`layout`) and the store that remembers the last language (`storage`).
//!
//! # Modules
//!
//! - `app_settings`: Centralized constants
//! - `config`: User configuration loaded from JSON
//! - `editor`: Text buffer and cursor editing
//! - `input`: Key roles, modifier state, pressed-key registry, state machine
//! - `keyboard`: The keyboard facade driven by the UI event source
//! - `layout`: Language tables and their JSON resources
//! - `storage`: Key-value persistence

pub mod app_settings;
pub mod config;
pub mod editor;
pub mod input;
pub mod keyboard;
pub mod layout;
pub mod storage;

pub use keyboard::Keyboard;

// ============================================================================
// Integration Tests
// ============================================================================
