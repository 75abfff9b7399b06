// SPDX-License-Identifier: GPL-3.0-only

//! Text buffer with a single collapsed cursor.
//!
//! Offsets count `char`s. The cursor never goes below zero, but moving right
//! is not bounded by the content length; splices clamp the cursor to the
//! content so an overshooting cursor edits at the end of the text.

use crate::input::{ControlAction, Emit};

/// The output text and its cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    content: String,
    cursor: usize,
}

impl TextBuffer {
    /// Creates an empty buffer with the cursor at 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a buffer with existing content and cursor.
    pub fn with_content(content: impl Into<String>, cursor: usize) -> Self {
        Self {
            content: content.into(),
            cursor,
        }
    }

    /// The full output text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The engine's cursor offset.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The cursor as a text surface shows it, clamped to the content length.
    pub fn surface_cursor(&self) -> usize {
        self.cursor.min(self.char_len())
    }

    fn char_len(&self) -> usize {
        self.content.chars().count()
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_idx)
            .map_or(self.content.len(), |(byte, _)| byte)
    }

    /// Applies one resolved press.
    pub fn apply(&mut self, emit: &Emit) {
        match emit {
            Emit::Glyph(glyph) => self.insert_text(glyph),
            Emit::Control(action) => self.apply_action(*action),
        }
    }

    /// Performs a named editing action.
    pub fn apply_action(&mut self, action: ControlAction) {
        match action {
            ControlAction::Tab => self.insert_tab(),
            ControlAction::ArrowLeft => self.move_left(),
            ControlAction::ArrowRight => self.move_right(),
            ControlAction::ArrowUp => self.move_up(),
            ControlAction::ArrowDown => self.move_down(),
            ControlAction::Enter => self.insert_newline(),
            ControlAction::Delete => self.delete_after(),
            ControlAction::Backspace => self.delete_before(),
            ControlAction::Space => self.insert_space(),
        }
    }

    /// Splices `text` at the cursor and advances past it.
    pub fn insert_text(&mut self, text: &str) {
        let at = self.byte_offset(self.surface_cursor());
        self.content.insert_str(at, text);
        self.cursor += text.chars().count();
    }

    /// Splices a single character at the cursor.
    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_offset(self.surface_cursor());
        self.content.insert(at, c);
        self.cursor += 1;
    }

    /// Inserts a tab character.
    pub fn insert_tab(&mut self) {
        self.insert_char('\t');
    }

    /// Inserts a newline.
    pub fn insert_newline(&mut self) {
        self.insert_char('\n');
    }

    /// Inserts a space.
    pub fn insert_space(&mut self) {
        self.insert_char(' ');
    }

    /// Removes the character before the cursor (Backspace).
    pub fn delete_before(&mut self) {
        let at = self.surface_cursor();
        if at > 0 {
            let start = self.byte_offset(at - 1);
            self.content.remove(start);
        }
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Removes the character at the cursor (Delete). The cursor stays put.
    pub fn delete_after(&mut self) {
        let at = self.surface_cursor();
        if at < self.char_len() {
            let start = self.byte_offset(at);
            self.content.remove(start);
        }
    }

    /// Moves the cursor one position left, stopping at 0.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Moves the cursor one position right.
    pub fn move_right(&mut self) {
        self.cursor += 1;
    }

    /// Moves the cursor back by the length of the current line segment
    /// including the newline that starts it, landing at the end of the
    /// previous line. Without a newline the cursor moves back by one.
    pub fn move_up(&mut self) {
        let chars: Vec<char> = self.content.chars().collect();
        let cursor = self.surface_cursor();
        self.cursor = cursor.saturating_sub(up_shift(&chars[..cursor]));
    }

    /// Moves the cursor forward over the rest of the current line, the
    /// newline and the next line (less its last character when another line
    /// follows). Without such a segment the cursor moves forward by one.
    pub fn move_down(&mut self) {
        let chars: Vec<char> = self.content.chars().collect();
        let suffix = &chars[self.surface_cursor()..];
        self.cursor += down_shift(suffix);
    }
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Length of the `\n` segment ending at the end of `prefix`, or 1.
fn up_shift(prefix: &[char]) -> usize {
    let Some(newline) = prefix.iter().rposition(|&c| c == '\n') else {
        return 1;
    };
    let tail = &prefix[newline + 1..];
    if tail.iter().any(|&c| is_line_terminator(c)) {
        return 1;
    }
    prefix.len() - newline
}

/// Length of the segment from the start of `suffix` into the next line, or 1.
fn down_shift(suffix: &[char]) -> usize {
    let line_end = suffix
        .iter()
        .position(|&c| is_line_terminator(c))
        .unwrap_or(suffix.len());
    if suffix.get(line_end) != Some(&'\n') {
        return 1;
    }

    let next_start = line_end + 1;
    let next_end = suffix[next_start..]
        .iter()
        .position(|&c| is_line_terminator(c))
        .map_or(suffix.len(), |offset| next_start + offset);

    if suffix.get(next_end) != Some(&'\n') {
        next_end
    } else if next_end > next_start {
        next_end - 1
    } else {
        1
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Test inserting in the middle of the text
    #[test]
    fn test_insert_char_middle() {
        let mut buffer = TextBuffer::with_content("ab", 1);
        buffer.insert_char('x');
        assert_eq!(buffer.content(), "axb");
        assert_eq!(buffer.cursor(), 2);
    }

    /// Test tab, newline and space splices
    #[test]
    fn test_whitespace_inserts() {
        let mut buffer = TextBuffer::new();
        buffer.insert_tab();
        buffer.insert_newline();
        buffer.insert_space();
        assert_eq!(buffer.content(), "\t\n ");
        assert_eq!(buffer.cursor(), 3);
    }

    /// Test backspace at the end and at the start
    #[test]
    fn test_delete_before() {
        let mut buffer = TextBuffer::with_content("ab", 2);
        buffer.delete_before();
        assert_eq!(buffer.content(), "a");
        assert_eq!(buffer.cursor(), 1);

        let mut buffer = TextBuffer::with_content("ab", 0);
        buffer.delete_before();
        assert_eq!(buffer.content(), "ab");
        assert_eq!(buffer.cursor(), 0);
    }

    /// Test delete keeps the cursor and is a no-op at the end
    #[test]
    fn test_delete_after() {
        let mut buffer = TextBuffer::with_content("abc", 1);
        buffer.delete_after();
        assert_eq!(buffer.content(), "ac");
        assert_eq!(buffer.cursor(), 1);

        let mut buffer = TextBuffer::with_content("abc", 3);
        buffer.delete_after();
        assert_eq!(buffer.content(), "abc");
        assert_eq!(buffer.cursor(), 3);
    }

    /// Test horizontal movement bounds
    #[test]
    fn test_move_left_right() {
        let mut buffer = TextBuffer::with_content("a", 0);
        buffer.move_left();
        assert_eq!(buffer.cursor(), 0);

        buffer.move_right();
        buffer.move_right();
        assert_eq!(buffer.cursor(), 2, "moving right is not bounded");
        assert_eq!(buffer.surface_cursor(), 1);
    }

    /// Test editing after the cursor overshoots the end
    #[test]
    fn test_edit_past_end() {
        let mut buffer = TextBuffer::with_content("ab", 4);
        buffer.insert_char('c');
        assert_eq!(buffer.content(), "abc");

        let mut buffer = TextBuffer::with_content("ab", 4);
        buffer.delete_before();
        assert_eq!(buffer.content(), "a");
        assert_eq!(buffer.cursor(), 3);
    }

    /// Test offsets count characters, not bytes
    #[test]
    fn test_multibyte_offsets() {
        let mut buffer = TextBuffer::with_content("йц", 1);
        buffer.insert_text("ф");
        assert_eq!(buffer.content(), "йфц");
        assert_eq!(buffer.cursor(), 2);

        buffer.delete_before();
        buffer.delete_after();
        assert_eq!(buffer.content(), "й");
    }

    /// Test moving up lands at the end of the previous line
    #[test]
    fn test_move_up() {
        let mut buffer = TextBuffer::with_content("ab\ncd", 5);
        buffer.move_up();
        assert_eq!(buffer.cursor(), 2);

        let mut buffer = TextBuffer::with_content("abc", 2);
        buffer.move_up();
        assert_eq!(buffer.cursor(), 1);

        let mut buffer = TextBuffer::with_content("abc", 0);
        buffer.move_up();
        assert_eq!(buffer.cursor(), 0);
    }

    /// Test ArrowUp from a cursor moved past the end lands on the previous line
    #[test]
    fn test_move_up_past_end() {
        let mut buffer = TextBuffer::with_content("ab\ncd", 5);
        buffer.move_right();
        buffer.move_right();
        assert_eq!(buffer.cursor(), 7);

        buffer.move_up();
        assert_eq!(buffer.cursor(), 2);
    }

    /// Test moving down over the next line
    #[test]
    fn test_move_down() {
        let mut buffer = TextBuffer::with_content("ab\ncd", 0);
        buffer.move_down();
        assert_eq!(buffer.cursor(), 5);

        let mut buffer = TextBuffer::with_content("ab\ncd\nef", 0);
        buffer.move_down();
        assert_eq!(buffer.cursor(), 4);

        let mut buffer = TextBuffer::with_content("ab\n\ncd", 0);
        buffer.move_down();
        assert_eq!(buffer.cursor(), 1);

        let mut buffer = TextBuffer::with_content("abc", 1);
        buffer.move_down();
        assert_eq!(buffer.cursor(), 2);
    }

    /// Test vertical moves stay non-negative on assorted inputs
    #[test]
    fn test_vertical_moves_never_negative() {
        let samples = ["", "\n", "\n\n\n", "a\r\nb", "x\ny\nz", "ab\n"];
        for text in samples {
            let len = text.chars().count();
            for cursor in 0..=len + 1 {
                let mut buffer = TextBuffer::with_content(text, cursor);
                buffer.move_up();
                buffer.move_up();
                buffer.move_down();
                buffer.move_up();
                assert!(buffer.cursor() <= len + 1 + 2 * (len + 1));
            }
        }
    }

    /// Test apply dispatches glyphs and actions
    #[test]
    fn test_apply() {
        let mut buffer = TextBuffer::new();
        buffer.apply(&Emit::Glyph("A".into()));
        buffer.apply(&Emit::Control(ControlAction::Enter));
        buffer.apply(&Emit::Control(ControlAction::Tab));
        buffer.apply(&Emit::Control(ControlAction::ArrowLeft));
        buffer.apply(&Emit::Control(ControlAction::Backspace));
        assert_eq!(buffer.content(), "A\t");
        assert_eq!(buffer.cursor(), 1);
    }
}
