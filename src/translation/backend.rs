use anyhow::Result;
use std::future::Future;

/// Language detection as returned by the service.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedLanguage {
    /// Language code as reported by the service (e.g. `en`, `zh-CN`, `und`).
    pub language: String,
    /// Confidence as a fraction between 0 and 1.
    pub confidence: f64,
}

/// The external translation service.
///
/// Errors are unstructured; the gateway decides which failures are soft.
pub trait TranslationBackend {
    fn detect(&self, text: &str) -> impl Future<Output = Result<DetectedLanguage>> + Send;

    /// Translates `text` into the language with the canonical code `target`.
    fn translate(&self, text: &str, target: &str) -> impl Future<Output = Result<String>> + Send;
}
