mod backend;
mod client;
mod gateway;
mod language;

pub use backend::{DetectedLanguage, TranslationBackend};
pub use client::GoogleTranslateClient;
pub use gateway::{Detection, TRANSLATION_ERROR_PREFIX, TranslateError, TranslationGateway};
pub use language::{LanguageTable, SUPPORTED_LANGUAGES, UnknownLanguage, print_languages};
