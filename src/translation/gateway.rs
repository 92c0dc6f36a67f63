use thiserror::Error;

use super::backend::TranslationBackend;
use super::language::{LanguageTable, UnknownLanguage};

/// Prefix of the message that stands in for a failed translation.
pub const TRANSLATION_ERROR_PREFIX: &str = "Translation error: ";

/// Language code the service answers with when it cannot tell.
const UNDETERMINED: &str = "und";

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error(transparent)]
    UnknownLanguage(#[from] UnknownLanguage),

    #[error("{0:#}")]
    Service(anyhow::Error),
}

/// A successful language detection.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub language: String,
    /// Confidence in percent, 0 to 100.
    pub confidence: f64,
}

/// Detection and translation on top of a [`TranslationBackend`].
pub struct TranslationGateway<B> {
    backend: B,
    languages: LanguageTable,
}

impl<B: TranslationBackend> TranslationGateway<B> {
    pub const fn new(backend: B, languages: LanguageTable) -> Self {
        Self { backend, languages }
    }

    pub const fn languages(&self) -> &LanguageTable {
        &self.languages
    }

    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Detects the language of `text`.
    ///
    /// Returns `None` if the service fails or cannot determine the language.
    pub async fn detect(&self, text: &str) -> Option<Detection> {
        match self.backend.detect(text).await {
            Ok(detected) if detected.language.is_empty() || detected.language == UNDETERMINED => {
                tracing::debug!("service could not determine the language");
                None
            }
            Ok(detected) => Some(Detection {
                language: detected.language,
                confidence: detected.confidence * 100.0,
            }),
            Err(e) => {
                tracing::debug!(error = %format!("{e:#}"), "language detection failed");
                None
            }
        }
    }

    /// Translates `text` into `target`, a language code or English name.
    pub async fn translate(&self, text: &str, target: &str) -> Result<String, TranslateError> {
        let code = self.languages.resolve(target)?;
        tracing::debug!(language = code, bytes = text.len(), "translating");

        self.backend
            .translate(text, code)
            .await
            .map_err(TranslateError::Service)
    }

    /// Like [`translate`](Self::translate), but a failure comes back as
    /// `"Translation error: ..."` in place of the translated text.
    pub async fn translate_or_message(&self, text: &str, target: &str) -> String {
        self.translate(text, target)
            .await
            .unwrap_or_else(|e| format!("{TRANSLATION_ERROR_PREFIX}{e}"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::translation::DetectedLanguage;
    use anyhow::{Result, bail};
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeBackend {
        detection: Option<(&'static str, f64)>,
        fail_translate: bool,
        targets: Mutex<Vec<String>>,
    }

    impl TranslationBackend for FakeBackend {
        async fn detect(&self, _text: &str) -> Result<DetectedLanguage> {
            match self.detection {
                Some((language, confidence)) => Ok(DetectedLanguage {
                    language: language.to_string(),
                    confidence,
                }),
                None => bail!("service unavailable"),
            }
        }

        async fn translate(&self, text: &str, target: &str) -> Result<String> {
            self.targets.lock().unwrap().push(target.to_string());
            if self.fail_translate {
                bail!("quota exceeded");
            }
            Ok(format!("[{target}] {text}"))
        }
    }

    fn gateway(backend: FakeBackend) -> TranslationGateway<FakeBackend> {
        TranslationGateway::new(backend, LanguageTable::default())
    }

    #[tokio::test]
    async fn test_detect_scales_confidence_to_percent() {
        let gateway = gateway(FakeBackend {
            detection: Some(("en", 0.98)),
            ..FakeBackend::default()
        });

        let detection = gateway.detect("Hello").await.unwrap();

        assert_eq!(detection.language, "en");
        assert!((detection.confidence - 98.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_detect_failure_is_none() {
        let gateway = gateway(FakeBackend::default());
        assert_eq!(gateway.detect("Hello").await, None);
    }

    #[tokio::test]
    async fn test_detect_undetermined_is_none() {
        let gateway = gateway(FakeBackend {
            detection: Some(("und", 0.0)),
            ..FakeBackend::default()
        });
        assert_eq!(gateway.detect("1234").await, None);
    }

    #[tokio::test]
    async fn test_translate_resolves_name_to_code() {
        let gateway = gateway(FakeBackend::default());

        let translated = gateway.translate("Hallo", "English").await.unwrap();

        assert_eq!(translated, "[en] Hallo");
        assert_eq!(*gateway.backend().targets.lock().unwrap(), vec!["en"]);
    }

    #[tokio::test]
    async fn test_translate_unknown_language_never_reaches_backend() {
        let gateway = gateway(FakeBackend::default());

        let err = gateway.translate("Hello", "Klingon").await.unwrap_err();

        assert!(matches!(err, TranslateError::UnknownLanguage(_)));
        assert!(gateway.backend().targets.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_translate_service_failure_is_typed() {
        let gateway = gateway(FakeBackend {
            fail_translate: true,
            ..FakeBackend::default()
        });

        let err = gateway.translate("Hello", "uk").await.unwrap_err();

        assert!(matches!(err, TranslateError::Service(_)));
        assert!(err.to_string().contains("quota exceeded"));
    }

    #[tokio::test]
    async fn test_translate_or_message_inlines_error() {
        let gateway = gateway(FakeBackend {
            fail_translate: true,
            ..FakeBackend::default()
        });

        let text = gateway.translate_or_message("Hello", "uk").await;

        assert!(text.starts_with(TRANSLATION_ERROR_PREFIX));
        assert!(text.contains("quota exceeded"));
    }

    #[tokio::test]
    async fn test_translate_or_message_passes_translation_through() {
        let gateway = gateway(FakeBackend::default());
        assert_eq!(gateway.translate_or_message("Hi", "ja").await, "[ja] Hi");
    }
}
