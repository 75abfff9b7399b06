// SPDX-License-Identifier: GPL-3.0-only

//! Validation rules for keyboard resources.
//!
//! Validation is permissive: problems the keyboard can live with are collected
//! as warnings, and only resources that cannot drive a keyboard at all are
//! rejected.

use crate::layout::types::{
    KeyboardResource, LanguageLayout, LanguageTable, ParseError, ParseResult, Severity,
    ValidationIssue,
};
use std::collections::HashSet;

/// Validates a resource and returns it with warnings.
///
/// Duplicate key codes inside a language are dropped (first wins).
pub fn validate_resource(
    mut resource: KeyboardResource,
) -> Result<ParseResult<KeyboardResource>, ParseError> {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    validate_languages(&resource.languages, &mut errors);
    if !errors.is_empty() {
        return Err(ParseError::validation_error(errors));
    }

    if resource.rows.is_empty() {
        warnings.push(
            ValidationIssue::new(Severity::Warning, "No rows defined", "rows")
                .with_suggestion("List the key codes of each row in display order"),
        );
    }

    let languages = resource
        .languages
        .languages()
        .iter()
        .enumerate()
        .map(|(idx, lang)| dedup_keys(lang, idx, &mut warnings))
        .collect();
    resource.languages = LanguageTable::new(languages);

    validate_glyphs(&resource.languages, &mut warnings);
    validate_row_codes(&resource, &mut warnings);

    Ok(ParseResult::with_warnings(resource, warnings))
}

/// Checks the fatal constraints on the language list.
fn validate_languages(languages: &LanguageTable, errors: &mut Vec<ValidationIssue>) {
    if languages.is_empty() {
        errors.push(
            ValidationIssue::new(Severity::Error, "No languages defined", "languages")
                .with_suggestion("Add at least one language with its key list"),
        );
        return;
    }

    let mut seen = HashSet::new();
    for (idx, lang) in languages.languages().iter().enumerate() {
        let path = format!("languages[{}].code", idx);
        if lang.code.is_empty() {
            errors.push(ValidationIssue::new(
                Severity::Error,
                "Language code is empty",
                path,
            ));
        } else if !seen.insert(lang.code.as_str()) {
            errors.push(ValidationIssue::new(
                Severity::Error,
                format!("Duplicate language code '{}'", lang.code),
                path,
            ));
        }
    }
}

fn dedup_keys(
    lang: &LanguageLayout,
    lang_idx: usize,
    warnings: &mut Vec<ValidationIssue>,
) -> LanguageLayout {
    let mut seen = HashSet::new();
    let mut keys = Vec::with_capacity(lang.keys.len());

    for (key_idx, key) in lang.keys.iter().enumerate() {
        if seen.insert(key.code.clone()) {
            keys.push(key.clone());
        } else {
            warnings.push(ValidationIssue::new(
                Severity::Warning,
                format!("Duplicate key code '{}' ignored", key.code),
                format!("languages[{}].keys[{}]", lang_idx, key_idx),
            ));
        }
    }

    LanguageLayout {
        code: lang.code.clone(),
        keys,
    }
}

fn validate_glyphs(languages: &LanguageTable, warnings: &mut Vec<ValidationIssue>) {
    for (lang_idx, lang) in languages.languages().iter().enumerate() {
        for (key_idx, key) in lang.keys.iter().enumerate() {
            if !key.function_key && key.small.is_empty() {
                warnings.push(
                    ValidationIssue::new(
                        Severity::Warning,
                        format!("Key '{}' has no glyph", key.code),
                        format!("languages[{}].keys[{}].small", lang_idx, key_idx),
                    )
                    .with_suggestion("Set 'small' or mark the key with 'function_key'"),
                );
            }
        }
    }
}

/// Warns about row codes a language has no descriptor for.
fn validate_row_codes(resource: &KeyboardResource, warnings: &mut Vec<ValidationIssue>) {
    for (row_idx, row) in resource.rows.iter().enumerate() {
        for (col_idx, code) in row.iter().enumerate() {
            for lang in resource.languages.languages() {
                if lang.descriptor(code).is_none() {
                    warnings.push(ValidationIssue::new(
                        Severity::Warning,
                        format!("Language '{}' has no key '{}'", lang.code, code),
                        format!("rows[{}][{}]", row_idx, col_idx),
                    ));
                }
            }
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::types::KeyDescriptor;

    fn lang(code: &str, keys: Vec<KeyDescriptor>) -> LanguageLayout {
        LanguageLayout {
            code: code.to_string(),
            keys,
        }
    }

    /// Test that an empty language list is fatal
    #[test]
    fn test_empty_languages_rejected() {
        let resource = KeyboardResource::default();
        match validate_resource(resource) {
            Err(ParseError::ValidationError { issues, .. }) => {
                assert_eq!(issues.len(), 1);
                assert_eq!(issues[0].severity, Severity::Error);
            }
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    /// Test that duplicate language codes are fatal
    #[test]
    fn test_duplicate_language_rejected() {
        let resource = KeyboardResource {
            rows: vec![],
            languages: LanguageTable::new(vec![lang("en", vec![]), lang("en", vec![])]),
        };
        assert!(validate_resource(resource).is_err());
    }

    /// Test that duplicate key codes are dropped with a warning
    #[test]
    fn test_duplicate_keys_deduplicated() {
        let resource = KeyboardResource {
            rows: vec![vec!["KeyA".into()]],
            languages: LanguageTable::new(vec![lang(
                "en",
                vec![
                    KeyDescriptor::printable("KeyA", "a", "A"),
                    KeyDescriptor::printable("KeyA", "x", "X"),
                ],
            )]),
        };
        let result = validate_resource(resource).unwrap();
        assert_eq!(result.warning_count(), 1);

        let en = result.layout.languages.language("en").unwrap();
        assert_eq!(en.keys.len(), 1);
        assert_eq!(en.keys[0].small, "a");
    }

    /// Test warnings for missing row codes and empty glyphs
    #[test]
    fn test_row_and_glyph_warnings() {
        let resource = KeyboardResource {
            rows: vec![vec!["KeyA".into(), "KeyB".into()]],
            languages: LanguageTable::new(vec![lang(
                "en",
                vec![KeyDescriptor::printable("KeyA", "", "A")],
            )]),
        };
        let result = validate_resource(resource).unwrap();
        let messages: Vec<&str> = result.warnings.iter().map(|w| w.message.as_str()).collect();
        assert!(messages.contains(&"Key 'KeyA' has no glyph"));
        assert!(messages.contains(&"Language 'en' has no key 'KeyB'"));
    }
}
