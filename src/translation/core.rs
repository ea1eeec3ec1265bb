/*!
 * Core translation service implementation.
 *
 * This module contains the `Translator` trait, which is the seam the
 * pipeline depends on, and `TranslationService`, the provider-backed
 * implementation that dispatches to the configured AI provider.
 */

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use log::debug;

use crate::app_config::{TranslationConfig, TranslationProvider as ConfigTranslationProvider};
use crate::errors::TranslationError;
use crate::language_utils;
use crate::providers::Provider;
use crate::providers::gemini::{Gemini, GeminiRequest};
use crate::providers::mock::{MockProvider, MockRequest};
use crate::providers::ollama::{GenerationRequest, Ollama};
use crate::providers::openai::{OpenAI, OpenAIRequest};

use super::chunk;

/// The remote call boundary for translation.
///
/// Kept deliberately small (text in, text out, language tag parameter) so
/// tests can substitute a deterministic fake without network access.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` into the language identified by `target_language`
    /// (an ISO 639 code). Makes a single logical attempt; callers decide
    /// about retries.
    async fn translate(&self, text: &str, target_language: &str)
    -> Result<String, TranslationError>;
}

/// Translation provider implementation variants
enum TranslationProviderImpl {
    /// Google Gemini API service
    Gemini {
        /// Client instance
        client: Gemini,
    },

    /// OpenAI API service
    OpenAI {
        /// Client instance
        client: OpenAI,
    },

    /// Ollama local LLM service
    Ollama {
        /// Client instance
        client: Ollama,
    },

    /// Deterministic in-process fake (tests only)
    Mock {
        /// Client instance
        client: MockProvider,
    },
}

/// Main translation service for page translation
pub struct TranslationService {
    /// Provider implementation
    provider: TranslationProviderImpl,

    /// Configuration for the translation service
    pub config: TranslationConfig,
}

impl TranslationService {
    /// Create a new translation service with the given configuration
    pub fn new(config: TranslationConfig) -> Result<Self> {
        let timeout_secs = config.get_timeout_secs();

        let provider = match config.provider {
            ConfigTranslationProvider::Gemini => TranslationProviderImpl::Gemini {
                client: Gemini::new_with_timeout(
                    config.get_api_key(),
                    config.get_endpoint(),
                    config.get_model(),
                    timeout_secs,
                ),
            },
            ConfigTranslationProvider::OpenAI => TranslationProviderImpl::OpenAI {
                client: OpenAI::new_with_timeout(
                    config.get_api_key(),
                    config.get_endpoint(),
                    timeout_secs,
                ),
            },
            ConfigTranslationProvider::Ollama => TranslationProviderImpl::Ollama {
                client: Ollama::from_url_with_timeout(config.get_endpoint(), timeout_secs),
            },
        };

        Ok(Self { provider, config })
    }

    /// Create a service backed by a mock provider, for tests
    pub fn with_mock_provider(client: MockProvider, config: TranslationConfig) -> Self {
        Self {
            provider: TranslationProviderImpl::Mock { client },
            config,
        }
    }

    /// Test the connection to the translation provider
    pub async fn test_connection(&self) -> Result<()> {
        match &self.provider {
            TranslationProviderImpl::Gemini { client } => client
                .test_connection()
                .await
                .map_err(|e| anyhow!("Failed to connect to Gemini API: {}", e)),
            TranslationProviderImpl::OpenAI { client } => client
                .test_connection()
                .await
                .map_err(|e| anyhow!("Failed to connect to OpenAI API: {}", e)),
            TranslationProviderImpl::Ollama { client } => client
                .test_connection()
                .await
                .map_err(|e| anyhow!("Failed to connect to Ollama: {}", e)),
            TranslationProviderImpl::Mock { client } => client
                .test_connection()
                .await
                .map_err(|e| anyhow!("Mock provider refused connection: {}", e)),
        }
    }

    /// Build the system prompt from the configured template.
    ///
    /// The {target_language} placeholder gets the English language name,
    /// which models handle more reliably than a bare ISO tag.
    fn system_prompt(&self, target_language: &str) -> String {
        let language_name = language_utils::get_language_name(target_language)
            .unwrap_or_else(|_| target_language.to_string());
        self.config
            .common
            .system_prompt
            .replace("{target_language}", &language_name)
    }

    /// Translate a single chunk with one request to the active provider
    async fn translate_chunk(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<String, TranslationError> {
        let system_prompt = self.system_prompt(target_language);
        let temperature = self.config.common.temperature;

        let translated = match &self.provider {
            TranslationProviderImpl::Gemini { client } => {
                let request = GeminiRequest::new()
                    .system(&system_prompt)
                    .add_message("user", text)
                    .temperature(temperature);

                let response = client.complete(request).await?;
                Gemini::extract_text(&response)
            }
            TranslationProviderImpl::OpenAI { client } => {
                let request = OpenAIRequest::new(self.config.get_model())
                    .add_message("system", &system_prompt)
                    .add_message("user", text)
                    .temperature(temperature);

                let response = client.complete(request).await?;
                OpenAI::extract_text(&response)
            }
            TranslationProviderImpl::Ollama { client } => {
                let request = GenerationRequest::new(self.config.get_model(), text)
                    .system(&system_prompt)
                    .temperature(temperature);

                let response = client.complete(request).await?;
                Ollama::extract_text(&response)
            }
            TranslationProviderImpl::Mock { client } => {
                let request = MockRequest {
                    text: text.to_string(),
                    target_language: target_language.to_string(),
                };

                let response = client.complete(request).await?;
                MockProvider::extract_text(&response)
            }
        };

        if translated.trim().is_empty() {
            return Err(TranslationError::EmptyResponse);
        }

        Ok(translated)
    }
}

#[async_trait]
impl Translator for TranslationService {
    async fn translate(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<String, TranslationError> {
        // Skip empty text without a remote call
        if text.trim().is_empty() {
            return Ok(String::new());
        }

        let max_chars = self.config.get_max_chars_per_request();
        let chunks = chunk::split_text(text, max_chars);

        if chunks.len() == 1 {
            return self.translate_chunk(&chunks[0], target_language).await;
        }

        debug!(
            "Text of {} chars split into {} chunks (limit {})",
            text.chars().count(),
            chunks.len(),
            max_chars
        );

        // Chunks translate sequentially and reassemble in order
        let mut translated_parts = Vec::with_capacity(chunks.len());
        for part in &chunks {
            let translated = self.translate_chunk(part, target_language).await?;
            translated_parts.push(translated);
        }

        Ok(translated_parts.join("\n"))
    }
}
