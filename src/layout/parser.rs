// SPDX-License-Identifier: GPL-3.0-only

//! Loading logic for JSON keyboard resources.

use crate::layout::types::{KeyboardResource, ParseError, ParseResult};
use crate::layout::validation::validate_resource;
use rust_embed::RustEmbed;
use std::fs;

/// Name of the bundled resource inside the embedded folder.
pub const DEFAULT_RESOURCE: &str = "keyboard.json";

/// Layout resources compiled into the binary.
#[derive(RustEmbed)]
#[folder = "resources/layouts/"]
struct EmbeddedLayouts;

/// Parses a keyboard resource from a JSON file.
///
/// I/O failures and JSON syntax errors carry the file path; validation
/// failures are returned with the path attached as well.
pub fn parse_resource_file(path: &str) -> Result<ParseResult<KeyboardResource>, ParseError> {
    let json_str =
        fs::read_to_string(path).map_err(|e| ParseError::io_error_with_path(e, path))?;

    let resource: KeyboardResource = serde_json::from_str(&json_str)
        .map_err(|e| ParseError::json_error_with_path(e, path))?;

    validate_resource(resource).map_err(|e| match e {
        ParseError::ValidationError {
            issues,
            file_path: None,
        } => ParseError::ValidationError {
            issues,
            file_path: Some(path.to_string()),
        },
        other => other,
    })
}

/// Parses a keyboard resource from a JSON string.
pub fn parse_resource_from_string(json: &str) -> Result<ParseResult<KeyboardResource>, ParseError> {
    let resource: KeyboardResource = serde_json::from_str(json)?;
    validate_resource(resource)
}

/// Loads the English/Russian resource bundled with the crate.
pub fn load_default_resource() -> Result<ParseResult<KeyboardResource>, ParseError> {
    let file = EmbeddedLayouts::get(DEFAULT_RESOURCE).ok_or_else(|| ParseError::MissingResource {
        name: DEFAULT_RESOURCE.to_string(),
    })?;

    let resource: KeyboardResource = serde_json::from_slice(&file.data)?;
    validate_resource(resource)
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SMALL_RESOURCE: &str = r#"{
        "rows": [["KeyA", "ShiftLeft"]],
        "languages": [
            {
                "code": "en",
                "keys": [
                    {"code": "KeyA", "small": "a", "shift": "A"},
                    {"code": "ShiftLeft", "small": "Shift", "function_key": true}
                ]
            },
            {
                "code": "ru",
                "keys": [
                    {"code": "KeyA", "small": "ф", "shift": "Ф"},
                    {"code": "ShiftLeft", "small": "Shift", "function_key": true}
                ]
            }
        ]
    }"#;

    /// Test 1: Parse valid JSON string, keeping language order
    #[test]
    fn test_parse_valid_json_string() {
        let result = parse_resource_from_string(SMALL_RESOURCE).unwrap();
        assert!(!result.has_warnings());

        let codes: Vec<&str> = result.layout.languages.codes().collect();
        assert_eq!(codes, vec!["en", "ru"]);
        assert_eq!(result.layout.rows, vec![vec!["KeyA", "ShiftLeft"]]);
    }

    /// Test 2: Handle missing file with I/O error
    #[test]
    fn test_parse_missing_file() {
        let err = parse_resource_file("/nonexistent/path/to/keyboard.json").unwrap_err();
        match &err {
            ParseError::IoError { file_path, .. } => {
                assert!(file_path.is_some(), "Error should include file path");
                assert!(err.to_string().contains("/nonexistent/path/to/keyboard.json"));
            }
            _ => panic!("Expected IoError variant"),
        }
    }

    /// Test 3: Malformed JSON reports a line number
    #[test]
    fn test_parse_malformed_json() {
        let err = parse_resource_from_string("{\n  \"rows\": [\n  oops\n}").unwrap_err();
        match err {
            ParseError::JsonError { line_number, .. } => assert_eq!(line_number, 3),
            _ => panic!("Expected JsonError variant"),
        }
    }

    /// Test 4: Parse from a file on disk
    #[test]
    fn test_parse_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SMALL_RESOURCE.as_bytes()).unwrap();

        let result = parse_resource_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(result.layout.languages.len(), 2);
    }

    /// Test 5: Validation errors from a file carry its path
    #[test]
    fn test_validation_error_has_path() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"rows": [], "languages": []}"#).unwrap();

        match parse_resource_file(file.path().to_str().unwrap()) {
            Err(ParseError::ValidationError { file_path, .. }) => assert!(file_path.is_some()),
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    /// Test 6: The bundled resource loads cleanly
    #[test]
    fn test_default_resource_loads() {
        let result = load_default_resource().unwrap();
        assert!(!result.has_warnings(), "warnings: {:?}", result.warnings);

        let resource = result.layout;
        assert_eq!(resource.rows.len(), 5);
        let codes: Vec<&str> = resource.languages.codes().collect();
        assert_eq!(codes, vec!["en", "ru"]);

        let ru = resource.languages.language("ru").unwrap();
        assert_eq!(ru.descriptor("KeyQ").unwrap().small, "й");
        assert!(ru.descriptor("Digit3").unwrap().has_annotated_shift());
    }
}
