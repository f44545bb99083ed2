//! Tolka CLI - Command-line interface for local machine translation

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod commands;
mod progress;

use anyhow::Result;

/// Tolka - Local machine translation
///
/// Translates text with locally run models, downloading them on first use.
///
/// Examples:
///   tolka translate "Hello world"           # en -> fr by default
///   tolka translate "Hallo" --from nl --to en
///   tolka auto "Привет мир"                 # detect, then translate
///   tolka config                            # show the active configuration
#[derive(Parser)]
#[command(
    name = "tolka",
    about = "Local machine translation",
    version = env!("CARGO_PKG_VERSION"),
    arg_required_else_help = true,
    propagate_version = true,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "plain"
    )]
    pub output_format: OutputFormat,

    /// Suppress progress output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Translate text between two languages
    ///
    /// Uses the configured translation model. Pass --from auto to detect
    /// the source language first.
    #[command(name = "translate", alias = "tr")]
    Translate {
        /// Text to translate
        text: String,

        /// Source language code, or "auto" to detect it
        #[arg(short, long, default_value = "en")]
        from: String,

        /// Target language code
        #[arg(short, long, default_value = "fr")]
        to: String,
    },

    /// Detect the source language, then translate
    #[command(name = "auto", alias = "detect")]
    Auto {
        /// Text to translate
        text: String,

        /// Target language code
        #[arg(short, long, default_value = "en")]
        to: String,
    },

    /// Show the active configuration
    #[command(name = "config")]
    Config,
}

#[derive(Clone, ValueEnum)]
pub enum OutputFormat {
    /// Just the translated text
    Plain,
    /// Full reply payload as JSON
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt::init();
    }

    match cli.command {
        Commands::Translate { text, from, to } => {
            commands::translate::execute(
                text,
                from,
                to,
                cli.config.as_deref(),
                cli.output_format,
                cli.quiet,
            )
            .await?;
        }

        Commands::Auto { text, to } => {
            commands::auto::execute(text, to, cli.config.as_deref(), cli.output_format, cli.quiet)
                .await?;
        }

        Commands::Config => {
            commands::config::execute(cli.config.as_deref(), cli.output_format)?;
        }
    }

    Ok(())
}
