/*!
 * Translation service for page translation using AI providers.
 *
 * This module contains the core functionality for translating extracted
 * page text using various AI providers. It is split into several submodules:
 *
 * - `core`: The `Translator` trait and the provider-backed `TranslationService`
 * - `chunk`: Splitting oversized page text at newline boundaries
 * - `retry`: Reusable bounded exponential backoff for transient failures
 */

// Re-export main types for easier usage
pub use self::core::{TranslationService, Translator};
pub use self::retry::{Retryable, with_retry};

// Submodules
pub mod chunk;
pub mod core;
pub mod retry;
