use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use textlate::cli::commands::translate::{self, Outcome};
use textlate::cli::{Args, Command};
use textlate::output::{self, OutputConfig};
use textlate::translation::{LanguageTable, print_languages};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    output::init(OutputConfig {
        quiet: args.quiet,
        no_color: args.no_color || OutputConfig::default().no_color,
    });
    init_tracing(args.verbose);

    match args.command {
        Some(Command::Languages) => {
            print_languages(&LanguageTable::default());
        }
        None => {
            let options = translate::TranslateOptions {
                config: args.config,
                output_file: args.output_file,
            };
            let outcome = translate::run_translate(options).await?;
            if outcome != Outcome::Completed {
                std::process::exit(outcome.exit_code());
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "textlate=debug" } else { "textlate=warn" };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
