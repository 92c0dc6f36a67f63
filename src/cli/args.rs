use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_FILE;

/// Default file the translation is written to with `output=file`.
pub const DEFAULT_OUTPUT_FILE: &str = "translated_text.txt";

#[derive(Parser, Debug)]
#[command(name = "textlate")]
#[command(about = "Text statistics, language detection and translation CLI tool")]
#[command(version)]
pub struct Args {
    /// Configuration file with key=value lines
    #[arg(short = 'c', long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// File the translation is written to when output=file
    #[arg(short = 'o', long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output_file: PathBuf,

    /// Suppress status messages on stderr
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List supported target languages
    Languages,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["textlate"]).ok();
        let args = args.as_ref();

        assert_eq!(args.map(|a| a.config.clone()), Some(PathBuf::from("config.txt")));
        assert_eq!(
            args.map(|a| a.output_file.clone()),
            Some(PathBuf::from("translated_text.txt"))
        );
        assert!(args.is_some_and(|a| a.command.is_none() && !a.quiet));
    }

    #[test]
    fn test_languages_subcommand() {
        let args = Args::try_parse_from(["textlate", "languages"]).ok();
        assert!(args.is_some_and(|a| matches!(a.command, Some(Command::Languages))));
    }
}
