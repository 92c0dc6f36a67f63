use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use super::loader::{ConfigError, ConfigMap};
use crate::input::ReadLimits;

pub const DEFAULT_CHAR_LIMIT: usize = 1000;
pub const DEFAULT_WORD_LIMIT: usize = 200;
pub const DEFAULT_SENTENCE_LIMIT: usize = 10;

/// Google Cloud Translation v2 REST endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://translation.googleapis.com/language/translate/v2";

/// Environment variable consulted for the API key unless `api_key_env` says otherwise.
pub const DEFAULT_API_KEY_ENV: &str = "GOOGLE_TRANSLATE_API_KEY";

/// Where the translated text goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Print the translation after the report.
    Screen,
    /// Write the translation to the output file.
    File,
    /// Any other (or missing) `output` value: translate but output nothing.
    Discard,
}

impl OutputMode {
    /// Values are matched exactly, so `Screen` or `FILE` discard the result.
    pub fn from_config(value: Option<&str>) -> Self {
        match value {
            Some("screen") => Self::Screen,
            Some("file") => Self::File,
            _ => Self::Discard,
        }
    }
}

/// What a failed translation turns into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TranslationErrorPolicy {
    /// The error message stands in for the translation and the run continues.
    #[default]
    Inline,
    /// The run stops with the error.
    Strict,
}

impl FromStr for TranslationErrorPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inline" => Ok(Self::Inline),
            "strict" => Ok(Self::Strict),
            other => Err(ConfigError::InvalidValue {
                key: "translation_errors",
                value: other.to_string(),
                expected: "inline, strict",
            }),
        }
    }
}

/// Connection settings for the translation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSettings {
    pub endpoint: String,
    /// API key stored directly in the config file.
    pub api_key: Option<String>,
    /// Environment variable name containing the API key.
    pub api_key_env: String,
    /// File holding the API key, either plain text or `{"api_key": "..."}`.
    pub credentials_file: Option<PathBuf>,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            credentials_file: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CredentialsFile {
    api_key: String,
}

impl ServiceSettings {
    /// Resolves the API key: environment variable first, then `api_key`,
    /// then `credentials_file`.
    pub fn resolve_api_key(&self) -> Result<String> {
        if let Ok(key) = std::env::var(&self.api_key_env)
            && !key.trim().is_empty()
        {
            return Ok(key.trim().to_string());
        }

        if let Some(key) = self.api_key.as_deref().filter(|k| !k.is_empty()) {
            return Ok(key.to_string());
        }

        if let Some(path) = &self.credentials_file {
            let contents = fs::read_to_string(path).with_context(|| {
                format!("Failed to read credentials file: {}", path.display())
            })?;
            let key = serde_json::from_str::<CredentialsFile>(&contents)
                .map_or_else(|_| contents.trim().to_string(), |c| c.api_key);
            if key.is_empty() {
                bail!("Credentials file {} contains no API key", path.display());
            }
            return Ok(key);
        }

        bail!(
            "No API key configured for the translation service\n\n\
             Provide one via:\n  \
             - Environment: export {}=\"your-api-key\"\n  \
             - Config file: api_key=<key> or credentials_file=<path>",
            self.api_key_env
        )
    }
}

/// Typed view over the configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub text_file: PathBuf,
    /// Target language as written in the config (code or English name).
    pub target_language: String,
    pub output: OutputMode,
    pub limits: ReadLimits,
    pub translation_errors: TranslationErrorPolicy,
    pub service: ServiceSettings,
}

impl Settings {
    pub fn from_config(config: &ConfigMap) -> Result<Self, ConfigError> {
        let required = |key: &'static str| {
            config
                .get(key)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .ok_or(ConfigError::MissingKey(key))
        };

        let limits = ReadLimits {
            characters: Some(parse_limit(config, "char_limit", DEFAULT_CHAR_LIMIT)?),
            words: Some(parse_limit(config, "word_limit", DEFAULT_WORD_LIMIT)?),
            sentences: Some(parse_limit(
                config,
                "sentence_limit",
                DEFAULT_SENTENCE_LIMIT,
            )?),
        };

        let translation_errors = config
            .get("translation_errors")
            .map(str::parse::<TranslationErrorPolicy>)
            .transpose()?
            .unwrap_or_default();

        let defaults = ServiceSettings::default();
        let service = ServiceSettings {
            endpoint: config
                .get("endpoint")
                .map_or(defaults.endpoint, str::to_string),
            api_key: config.get("api_key").map(str::to_string),
            api_key_env: config
                .get("api_key_env")
                .map_or(defaults.api_key_env, str::to_string),
            credentials_file: config.get("credentials_file").map(PathBuf::from),
        };

        Ok(Self {
            text_file: PathBuf::from(required("text_file")?),
            target_language: required("target_language")?,
            output: OutputMode::from_config(config.get("output")),
            limits,
            translation_errors,
            service,
        })
    }
}

fn parse_limit(config: &ConfigMap, key: &'static str, default: usize) -> Result<usize, ConfigError> {
    config.get(key).map_or(Ok(default), |value| {
        value.parse().map_err(|source| ConfigError::InvalidNumber {
            key,
            value: value.to_string(),
            source,
        })
    })
}
