mod loader;
mod settings;

pub use loader::{ConfigError, ConfigMap, DEFAULT_CONFIG_FILE, load_config, parse_config};
pub use settings::{
    DEFAULT_API_KEY_ENV, DEFAULT_CHAR_LIMIT, DEFAULT_ENDPOINT, DEFAULT_SENTENCE_LIMIT,
    DEFAULT_WORD_LIMIT, OutputMode, ServiceSettings, Settings, TranslationErrorPolicy,
};
