// SPDX-License-Identifier: GPL-3.0-only

//! Text cursor engine.
//!
//! Owns the output text and its cursor and applies one edit per resolved
//! press: glyph insertion, tab, newline, space, Backspace/Delete, and the
//! four arrow movements.
//!
//! ```rust,ignore
//! use keyslate::editor::TextBuffer;
//!
//! let mut buffer = TextBuffer::with_content("ab", 1);
//! buffer.insert_char('x');
//! assert_eq!(buffer.content(), "axb");
//! ```

pub mod buffer;

pub use buffer::TextBuffer;
