//! Subcommand implementations.

/// Default command: report statistics, detect and translate.
pub mod translate;
