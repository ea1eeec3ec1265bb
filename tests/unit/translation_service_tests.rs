/*!
 * Tests for translation service functionality
 */

use yaptai::app_config::TranslationConfig;
use yaptai::errors::TranslationError;
use yaptai::providers::mock::MockProvider;
use yaptai::translation::{TranslationService, Translator};

fn service_with(provider: MockProvider) -> TranslationService {
    TranslationService::with_mock_provider(provider, TranslationConfig::default())
}

/// Config whose active provider allows only tiny requests, to force chunking
fn small_chunk_config(max_chars: usize) -> TranslationConfig {
    let mut config = TranslationConfig::default();
    if let Some(provider_config) = config
        .available_providers
        .iter_mut()
        .find(|p| p.provider_type == "gemini")
    {
        provider_config.max_chars_per_request = max_chars;
    }
    config
}

#[tokio::test]
async fn test_translate_withMockProvider_shouldReturnTranslatedText() {
    let provider = MockProvider::working();
    let service = service_with(provider.clone());

    let result = service.translate("hello world", "bn").await.unwrap();

    assert!(result.contains("[TRANSLATED to bn]"));
    assert!(result.contains("hello world"));
    assert_eq!(provider.request_count(), 1);
}

#[tokio::test]
async fn test_translate_withEmptyText_shouldSkipProviderEntirely() {
    let provider = MockProvider::working();
    let service = service_with(provider.clone());

    let result = service.translate("   \n  ", "bn").await.unwrap();

    assert_eq!(result, "");
    assert_eq!(provider.request_count(), 0);
}

#[tokio::test]
async fn test_translate_withLongText_shouldChunkAndReassemble() {
    let provider = MockProvider::working();
    let service =
        TranslationService::with_mock_provider(provider.clone(), small_chunk_config(40));

    let text = "first line of the page\nsecond line of the page\nthird line of the page";
    let result = service.translate(text, "bn").await.unwrap();

    // The page went out as several requests and came back as one string
    assert!(provider.request_count() >= 2);
    assert!(result.contains("first line"));
    assert!(result.contains("third line"));
}

#[tokio::test]
async fn test_translate_withEmptyProviderResponse_shouldError() {
    let service = service_with(MockProvider::empty());

    let result = service.translate("some text", "bn").await;
    assert!(matches!(result, Err(TranslationError::EmptyResponse)));
}

#[tokio::test]
async fn test_translate_withFailingProvider_shouldPropagateError() {
    let provider = MockProvider::failing();
    let service = service_with(provider.clone());

    let result = service.translate("some text", "bn").await;
    assert!(matches!(result, Err(TranslationError::Provider(_))));
    // The service makes a single attempt; retry policy lives in the caller
    assert_eq!(provider.request_count(), 1);
}

#[tokio::test]
async fn test_testConnection_withWorkingAndFailingMocks_shouldReflectState() {
    assert!(service_with(MockProvider::working())
        .test_connection()
        .await
        .is_ok());
    assert!(service_with(MockProvider::failing())
        .test_connection()
        .await
        .is_err());
}
