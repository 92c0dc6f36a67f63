//! # textlate - text statistics and translation CLI
//!
//! `textlate` reads a text file named in a small `key=value` configuration
//! file, reports its size and basic statistics, detects its language and
//! translates it with Google Cloud Translation.
//!
//! ## Quick Start
//!
//! ```bash
//! # Uses ./config.txt
//! textlate
//!
//! # Explicit configuration file
//! textlate --config ./my-config.txt
//!
//! # List the supported target languages
//! textlate languages
//! ```
//!
//! ## Configuration
//!
//! ```text
//! text_file=sample.txt
//! target_language=uk
//! output=screen
//! char_limit=1000
//! word_limit=200
//! sentence_limit=10
//! ```
//!
//! The API key is read from `GOOGLE_TRANSLATE_API_KEY` unless the
//! configuration names another variable, a key or a credentials file.

/// Command-line interface definitions and handlers.
pub mod cli;

/// `key=value` configuration loading and typed settings.
pub mod config;

/// File system utilities.
pub mod fs;

/// Text file reading with limits and text statistics.
pub mod input;

/// Global output configuration (quiet mode, colors).
pub mod output;

/// Language detection and translation through an external service.
pub mod translation;

/// Terminal UI components (spinner, colors).
pub mod ui;
