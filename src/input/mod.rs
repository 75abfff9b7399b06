// SPDX-License-Identifier: GPL-3.0-only

//! Input handling for the keyboard.
//!
//! This module turns normalized key events into modifier transitions, key
//! highlight updates and resolved edits.
//!
//! # Features
//!
//! - **Key roles**: key codes are classified once into [`KeyRole`]s
//! - **Modifier state**: latched Caps Lock, Shift, and the held Control/Alt
//!   flags that switch languages together
//! - **Pressed-key registry**: every press is released exactly once, including
//!   pointer presses abandoned by leaving the key
//! - **State machine**: [`InputStateMachine`] resolves each press to at most
//!   one [`Emit`]
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use keyslate::input::{InputStateMachine, KeyEvent};
//! use keyslate::layout::load_default_resource;
//!
//! let resource = load_default_resource()?.into_layout();
//! let mut machine = InputStateMachine::build(resource, "en");
//!
//! machine.handle_event(&KeyEvent::press("ShiftLeft"));
//! let outcome = machine.handle_event(&KeyEvent::press("KeyA"));
//! println!("{:?}", outcome.emit); // Some(Glyph("A"))
//! ```

// Sub-modules
pub mod event;
pub mod keycode;
pub mod machine;
pub mod modifier;
pub mod registry;

// Re-export public API
pub use event::{Emit, EventKind, EventOutcome, EventSource, KeyEvent};
pub use keycode::{ControlAction, KeyRole};
pub use machine::{InputStateMachine, KeyRuntimeState};
pub use modifier::{resolve_glyph, GlyphVariant, ModifierState};
pub use registry::{PressedEntry, PressedKeyRegistry};
