// SPDX-License-Identifier: GPL-3.0-only

//! Keyboard language tables.
//!
//! A keyboard resource is a JSON document holding the row order of the key
//! codes and an ordered list of languages, each mapping key codes to their
//! default and shifted glyphs. Languages are cyclic: switching past the last
//! wraps to the first.
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use keyslate::layout::load_default_resource;
//!
//! let result = load_default_resource()?;
//! for warning in &result.warnings {
//!     eprintln!("Warning: {}", warning);
//! }
//! let resource = result.into_layout();
//! println!("{} languages", resource.languages.len());
//! ```
//!
//! # Resource Format
//!
//! ```json
//! {
//!     "rows": [["KeyQ", "KeyW"], ["ShiftLeft"]],
//!     "languages": [
//!         {
//!             "code": "en",
//!             "keys": [
//!                 {"code": "KeyQ", "small": "q", "shift": "Q"},
//!                 {"code": "ShiftLeft", "small": "Shift", "function_key": true}
//!             ]
//!         }
//!     ]
//! }
//! ```

// Sub-modules
pub mod parser;
pub mod types;
pub mod validation;

// Re-export public API - Error handling types
pub use types::{ParseError, ParseResult, Severity, ValidationIssue};

// Re-export public API - Loader functions
pub use parser::{load_default_resource, parse_resource_file, parse_resource_from_string};

// Re-export public API - Data structures
pub use types::{KeyDescriptor, KeyboardResource, LanguageLayout, LanguageTable};
