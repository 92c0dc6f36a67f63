//! Language code resolution and supported languages.

use thiserror::Error;

use crate::ui::Style;

/// Supported language codes and their English names.
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("en", "English"),
    ("uk", "Ukrainian"),
    ("de", "German"),
    ("fr", "French"),
    ("es", "Spanish"),
    ("ru", "Russian"),
    ("it", "Italian"),
    ("zh", "Chinese"),
    ("ja", "Japanese"),
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid language code or name: '{0}'")]
pub struct UnknownLanguage(pub String);

/// Immutable lookup between language codes and display names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageTable {
    entries: &'static [(&'static str, &'static str)],
}

impl Default for LanguageTable {
    fn default() -> Self {
        Self::new(SUPPORTED_LANGUAGES)
    }
}

impl LanguageTable {
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    /// Resolves a language code or English name to its canonical code.
    ///
    /// Both are matched case-insensitively; codes are tried before names.
    pub fn resolve(&self, lang: &str) -> Result<&'static str, UnknownLanguage> {
        self.entries
            .iter()
            .find(|(code, _)| code.eq_ignore_ascii_case(lang))
            .or_else(|| {
                let lowered = lang.to_lowercase();
                self.entries
                    .iter()
                    .find(|(_, name)| name.to_lowercase() == lowered)
            })
            .map(|(code, _)| *code)
            .ok_or_else(|| UnknownLanguage(lang.to_string()))
    }

    /// Display name for a canonical code.
    pub fn name(&self, code: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, name)| *name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.entries.iter().copied()
    }
}

/// Prints the supported languages to stdout.
pub fn print_languages(table: &LanguageTable) {
    println!("{}", Style::header("Supported languages"));
    for (code, name) in table.iter() {
        println!("  {:4} {}", Style::code(code), Style::secondary(name));
    }
}
