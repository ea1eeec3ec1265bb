/*!
 * Tests for language utility functions
 */

use yaptai::language_utils::{get_language_name, language_codes_match};

#[test]
fn test_getLanguageName_withTwoLetterCodes_shouldReturnEnglishName() {
    assert_eq!(get_language_name("en").unwrap(), "English");
    assert_eq!(get_language_name("bn").unwrap(), "Bengali");
    assert_eq!(get_language_name("es").unwrap(), "Spanish");
}

#[test]
fn test_getLanguageName_withThreeLetterCodes_shouldReturnEnglishName() {
    assert_eq!(get_language_name("eng").unwrap(), "English");
    assert_eq!(get_language_name("ben").unwrap(), "Bengali");
    assert_eq!(get_language_name("fra").unwrap(), "French");
}

#[test]
fn test_getLanguageName_withMixedCaseAndWhitespace_shouldNormalize() {
    assert_eq!(get_language_name(" EN ").unwrap(), "English");
    assert_eq!(get_language_name("Bn").unwrap(), "Bengali");
}

#[test]
fn test_getLanguageName_withInvalidCodes_shouldFail() {
    assert!(get_language_name("").is_err());
    assert!(get_language_name("xx").is_err());
    assert!(get_language_name("zz").is_err());
    assert!(get_language_name("nonsense").is_err());
}

#[test]
fn test_languageCodesMatch_withEquivalentCodes_shouldMatch() {
    assert!(language_codes_match("en", "en"));
    assert!(language_codes_match("en", "eng"));
    assert!(language_codes_match("EN", "en"));
    assert!(language_codes_match("bn", "ben"));
}

#[test]
fn test_languageCodesMatch_withDifferentLanguages_shouldNotMatch() {
    assert!(!language_codes_match("en", "es"));
    assert!(!language_codes_match("bn", "fra"));
    assert!(!language_codes_match("en", "zz"));
}
