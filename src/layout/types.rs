// SPDX-License-Identifier: GPL-3.0-only

//! Core data types for keyboard language tables.
//!
//! This module defines the error types, validation structures and the static
//! data model (key descriptors, per-language key lists and the row order)
//! loaded from JSON layout resources.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Error Handling Types
// ============================================================================

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal error that prevents the resource from being used
    Error,
    /// Non-fatal issue that should be addressed
    Warning,
}

/// A validation issue discovered while loading a layout resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Severity level (Error or Warning)
    pub severity: Severity,
    /// Human-readable description of the issue
    pub message: String,
    /// Path to the field that caused the issue (e.g., "languages[1].keys[4]")
    pub field_path: String,
    /// Optional suggestion for how to fix the issue
    pub suggestion: Option<String>,
}

impl ValidationIssue {
    /// Creates a new validation issue.
    pub fn new(
        severity: Severity,
        message: impl Into<String>,
        field_path: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            message: message.into(),
            field_path: field_path.into(),
            suggestion: None,
        }
    }

    /// Adds a suggestion to the validation issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity_str = match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
        };

        write!(f, "[{}] {}: {}", severity_str, self.field_path, self.message)?;

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  Suggestion: {}", suggestion)?;
        }

        Ok(())
    }
}

/// Error type for layout resource loading.
#[derive(Debug)]
pub enum ParseError {
    /// I/O error occurred while reading a layout file
    IoError {
        /// The underlying I/O error
        source: std::io::Error,
        /// Optional file path that caused the error
        file_path: Option<String>,
    },

    /// JSON parsing error
    JsonError {
        /// The underlying JSON parsing error
        source: serde_json::Error,
        /// Optional file path being parsed
        file_path: Option<String>,
        /// Line number where the error occurred (from serde_json)
        line_number: usize,
    },

    /// The embedded resource is missing from the binary
    MissingResource {
        /// Name of the embedded file that was requested
        name: String,
    },

    /// Fatal validation errors
    ValidationError {
        /// List of validation issues found
        issues: Vec<ValidationIssue>,
        /// Optional file path being validated
        file_path: Option<String>,
    },
}

impl ParseError {
    /// Creates an I/O error with file path.
    pub fn io_error_with_path(source: std::io::Error, file_path: impl Into<String>) -> Self {
        Self::IoError {
            source,
            file_path: Some(file_path.into()),
        }
    }

    /// Creates a JSON parsing error with context.
    pub fn json_error(source: serde_json::Error) -> Self {
        let line_number = source.line();
        Self::JsonError {
            source,
            file_path: None,
            line_number,
        }
    }

    /// Creates a JSON parsing error with file path.
    pub fn json_error_with_path(source: serde_json::Error, file_path: impl Into<String>) -> Self {
        let line_number = source.line();
        Self::JsonError {
            source,
            file_path: Some(file_path.into()),
            line_number,
        }
    }

    /// Creates a validation error from a list of issues.
    pub fn validation_error(issues: Vec<ValidationIssue>) -> Self {
        Self::ValidationError {
            issues,
            file_path: None,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::IoError { source, file_path } => {
                write!(f, "I/O error")?;
                if let Some(path) = file_path {
                    write!(f, " reading file '{}'", path)?;
                }
                write!(f, ": {}", source)
            }
            ParseError::JsonError {
                source,
                file_path,
                line_number,
            } => {
                write!(f, "JSON parsing error")?;
                if let Some(path) = file_path {
                    write!(f, " in file '{}'", path)?;
                }
                write!(f, " at line {}: {}", line_number, source)
            }
            ParseError::MissingResource { name } => {
                write!(f, "embedded layout resource '{}' not found", name)
            }
            ParseError::ValidationError { issues, file_path } => {
                write!(f, "Validation failed")?;
                if let Some(path) = file_path {
                    write!(f, " for file '{}'", path)?;
                }
                writeln!(f, " with {} issue(s):", issues.len())?;
                for (i, issue) in issues.iter().enumerate() {
                    write!(f, "  {}. {}", i + 1, issue)?;
                    if i < issues.len() - 1 {
                        writeln!(f)?;
                    }
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::IoError { source, .. } => Some(source),
            ParseError::JsonError { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        Self::json_error(err)
    }
}

// ============================================================================
// ParseResult Type
// ============================================================================

/// Result of successfully loading a resource with optional warnings.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult<T> {
    /// The successfully parsed resource
    pub layout: T,
    /// Non-fatal validation warnings
    pub warnings: Vec<ValidationIssue>,
}

impl<T> ParseResult<T> {
    /// Creates a new parse result with warnings.
    pub fn with_warnings(layout: T, warnings: Vec<ValidationIssue>) -> Self {
        Self { layout, warnings }
    }

    /// Returns true if there are any warnings.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Returns the number of warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Consumes the result and returns the resource, discarding warnings.
    pub fn into_layout(self) -> T {
        self.layout
    }
}

// ============================================================================
// Language Table Data Structures
// ============================================================================

/// Static description of one key in one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyDescriptor {
    /// Stable key identifier (e.g., "KeyQ", "ShiftLeft")
    pub code: String,

    /// Default (lowercase) glyph, or the label of a function key
    pub small: String,

    /// Shifted glyph, possibly empty
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub shift: String,

    /// Function keys never emit a printable glyph
    #[serde(default)]
    pub function_key: bool,
}

impl KeyDescriptor {
    /// Creates a printable key descriptor.
    pub fn printable(code: impl Into<String>, small: impl Into<String>, shift: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            small: small.into(),
            shift: shift.into(),
            function_key: false,
        }
    }

    /// Creates a function key descriptor with the given label.
    pub fn function(code: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            small: label.into(),
            shift: String::new(),
            function_key: true,
        }
    }

    /// Returns `true` when the shifted glyph is rendered as a secondary
    /// annotation instead of replacing the main glyph on Caps Lock.
    pub fn has_annotated_shift(&self) -> bool {
        is_annotation(&self.shift)
    }
}

/// Returns `true` if `shift` contains a glyph outside the Latin/Cyrillic
/// letters and ASCII digits.
pub fn is_annotation(shift: &str) -> bool {
    shift.chars().any(|c| !is_letter_or_digit(c))
}

fn is_letter_or_digit(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || ('а'..='я').contains(&c)
        || ('А'..='Я').contains(&c)
        || c == 'ё'
        || c == 'Ё'
}

/// The key list of a single language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageLayout {
    /// Language code (e.g., "en", "ru")
    pub code: String,

    /// Key descriptors for this language
    #[serde(default)]
    pub keys: Vec<KeyDescriptor>,
}

impl LanguageLayout {
    /// Looks up the descriptor for a key code.
    pub fn descriptor(&self, code: &str) -> Option<&KeyDescriptor> {
        self.keys.iter().find(|key| key.code == code)
    }
}

/// Ordered, cyclic mapping from language code to key list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageTable {
    languages: Vec<LanguageLayout>,
}

impl LanguageTable {
    /// Creates a table from languages in cycle order.
    pub fn new(languages: Vec<LanguageLayout>) -> Self {
        Self { languages }
    }

    /// Returns the number of languages.
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    /// Returns `true` if the table has no languages.
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// Returns the languages in cycle order.
    pub fn languages(&self) -> &[LanguageLayout] {
        &self.languages
    }

    /// Returns the language codes in cycle order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.languages.iter().map(|lang| lang.code.as_str())
    }

    /// Returns the position of a language code.
    pub fn index_of(&self, code: &str) -> Option<usize> {
        self.languages.iter().position(|lang| lang.code == code)
    }

    /// Returns the language at `index`.
    pub fn get(&self, index: usize) -> Option<&LanguageLayout> {
        self.languages.get(index)
    }

    /// Returns the language with the given code.
    pub fn language(&self, code: &str) -> Option<&LanguageLayout> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Returns the index following `index`, wrapping to the first language.
    ///
    /// A singleton table cycles to itself.
    pub fn next_index(&self, index: usize) -> usize {
        if index + 1 < self.languages.len() {
            index + 1
        } else {
            0
        }
    }
}

/// A complete keyboard resource: the row order plus the language tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardResource {
    /// Rows of key codes in display order
    #[serde(default)]
    pub rows: Vec<Vec<String>>,

    /// Languages in cycle order
    pub languages: LanguageTable,
}

// ============================================================================
// Unit Tests
// ============================================================================
