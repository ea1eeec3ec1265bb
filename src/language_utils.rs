use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for ISO language code handling
///
/// This module provides functions for validating and displaying
/// ISO 639-1 (2-letter) and ISO 639-3 (3-letter) language codes,
/// used for the translation target language tag.

/// Parse a language code into an isolang Language
fn parse_language(code: &str) -> Option<Language> {
    let normalized_code = code.trim().to_lowercase();

    if normalized_code.len() == 2 {
        Language::from_639_1(&normalized_code)
    } else if normalized_code.len() == 3 {
        Language::from_639_3(&normalized_code)
    } else {
        None
    }
}

/// Get the English name of a language from its ISO code.
///
/// The name is what gets interpolated into the translation prompt,
/// so "bn" becomes "Bengali" rather than a bare tag the model may
/// not recognize.
pub fn get_language_name(code: &str) -> Result<String> {
    parse_language(code)
        .map(|lang| lang.to_name().to_string())
        .ok_or_else(|| anyhow!("Invalid language code: {}", code))
}

/// Check whether two language codes refer to the same language,
/// regardless of whether they are 2-letter or 3-letter forms.
pub fn language_codes_match(first: &str, second: &str) -> bool {
    match (parse_language(first), parse_language(second)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
