use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::config::{OutputMode, Settings, TranslationErrorPolicy, load_config};
use crate::fs::{atomic_write, file_size};
use crate::input::{TextReader, TextSnapshot};
use crate::status;
use crate::translation::{
    GoogleTranslateClient, LanguageTable, TranslationBackend, TranslationGateway,
};
use crate::ui::{Spinner, Style};

pub struct TranslateOptions {
    pub config: PathBuf,
    pub output_file: PathBuf,
}

/// How a run ended when it did not fail outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    /// The config file is missing, unreadable, empty or invalid.
    ConfigUnavailable,
    /// The text file could not be read or was empty.
    NoText,
}

impl Outcome {
    pub const fn exit_code(self) -> exitcode::ExitCode {
        match self {
            Self::Completed => exitcode::OK,
            Self::ConfigUnavailable => exitcode::CONFIG,
            Self::NoText => exitcode::NOINPUT,
        }
    }
}

pub async fn run_translate(options: TranslateOptions) -> Result<Outcome> {
    let Some(settings) = load_settings(&options.config) else {
        return Ok(Outcome::ConfigUnavailable);
    };

    let api_key = settings.service.resolve_api_key()?;
    let client = GoogleTranslateClient::new(settings.service.endpoint.clone(), api_key);
    let gateway = TranslationGateway::new(client, LanguageTable::default());

    let mut stdout = io::stdout().lock();
    process_text(&settings, &gateway, &options.output_file, &mut stdout).await
}

/// Loads the config file, reporting any problem on stderr.
pub fn load_settings(path: &Path) -> Option<Settings> {
    let config = match load_config(path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {e}", Style::error("Error:"));
            return None;
        }
    };

    if config.is_empty() {
        status!("Config file {} has no settings", path.display());
        return None;
    }

    match Settings::from_config(&config) {
        Ok(settings) => Some(settings),
        Err(e) => {
            eprintln!("{} {e}", Style::error("Error:"));
            None
        }
    }
}

/// Reads the text file, writes the report to `out`, then detects,
/// translates and delivers the translation.
pub async fn process_text<B, W>(
    settings: &Settings,
    gateway: &TranslationGateway<B>,
    output_file: &Path,
    out: &mut W,
) -> Result<Outcome>
where
    B: TranslationBackend,
    W: Write,
{
    let text_file = &settings.text_file;
    report_line(out, "File name:", text_file.display())?;

    let snapshot = TextReader::read(text_file, &settings.limits).unwrap_or_else(|e| {
        eprintln!("{} {e:#}", Style::error("Error:"));
        TextSnapshot::default()
    });

    if snapshot.is_empty() {
        eprintln!("{} no text was read", Style::error("Error:"));
        return Ok(Outcome::NoText);
    }

    if snapshot.truncated {
        status!(
            "{} reading stopped early because a configured limit was exceeded",
            Style::warning("Note:")
        );
    }

    report_line(out, "File size:", format!("{} bytes", file_size(text_file)?))?;
    report_line(out, "Characters:", snapshot.stats.characters)?;
    report_line(out, "Words:", snapshot.stats.words)?;
    report_line(out, "Sentences:", snapshot.stats.sentences)?;

    let spinner = Spinner::new("Detecting language...");
    let detection = gateway.detect(&snapshot.text).await;
    spinner.stop();

    match detection {
        Some(detection) => report_line(
            out,
            "Detected language:",
            format!(
                "{}, confidence: {:.2}%",
                describe_language(gateway.languages(), &detection.language),
                detection.confidence
            ),
        )?,
        None => writeln!(out, "Could not detect the language.")?,
    }

    let spinner = Spinner::new("Translating...");
    let translated = match settings.translation_errors {
        TranslationErrorPolicy::Inline => {
            gateway
                .translate_or_message(&snapshot.text, &settings.target_language)
                .await
        }
        TranslationErrorPolicy::Strict => gateway
            .translate(&snapshot.text, &settings.target_language)
            .await
            .context("Translation failed")?,
    };
    spinner.stop();

    match settings.output {
        OutputMode::Screen => {
            let languages = gateway.languages();
            let code = languages.resolve(&settings.target_language)?;
            let name = languages.name(code).unwrap_or(code);
            writeln!(out, "{}", Style::header(format!("Translation to {name}:")))?;
            writeln!(out, "{translated}")?;
        }
        OutputMode::File => {
            atomic_write(output_file, &translated)?;
            writeln!(
                out,
                "{} Translated text saved to {}",
                Style::success("✓"),
                output_file.display()
            )?;
        }
        OutputMode::Discard => {
            tracing::debug!("output is neither 'screen' nor 'file', translation not delivered");
        }
    }

    Ok(Outcome::Completed)
}

fn report_line<W: Write>(out: &mut W, label: &str, value: impl std::fmt::Display) -> Result<()> {
    writeln!(out, "{} {}", Style::label(label), Style::value(value))?;
    Ok(())
}

/// `English (en)` for known codes, the bare code otherwise.
fn describe_language(languages: &LanguageTable, code: &str) -> String {
    languages
        .name(code)
        .map_or_else(|| code.to_string(), |name| format!("{name} ({code})"))
}
