//! chainhide - chained classical cipher with image steganography
//!
//! A CLI tool that encrypts text with a matrix -> transposition -> substitution
//! cipher chain and hides the ciphertext in lossless images.

mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::Level;

use chainhide::config::{ConfigError, Settings};
use commands::{
    CommandExecutor, DecryptCommand, EmbedCommand, EncryptCommand, ExtractCommand, GlobalOptions,
    InspectCommand,
};

/// chainhide - chained classical cipher with image steganography
///
/// Encrypts over a fixed 80-symbol alphabet and hides the result in the red
/// channel of PNG/BMP images. Not meant to resist modern cryptanalysis.
#[derive(Parser)]
#[command(name = "chainhide")]
#[command(version)]
#[command(about = "Chained classical cipher with LSB image steganography")]
#[command(long_about = None)]
struct Cli {
    /// Settings file (default: ~/.chainhide/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output (progress on stderr, debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a message
    Encrypt(EncryptCommand),

    /// Decrypt a message
    Decrypt(DecryptCommand),

    /// Hide a message (optionally encrypted) in an image
    Embed(EmbedCommand),

    /// Recover a message hidden in an image
    Extract(ExtractCommand),

    /// Show the key matrix, ranks and grid derived from a key
    Inspect(InspectCommand),
}

impl Commands {
    fn executor(&self) -> &dyn CommandExecutor {
        match self {
            Commands::Encrypt(cmd) => cmd,
            Commands::Decrypt(cmd) => cmd,
            Commands::Embed(cmd) => cmd,
            Commands::Extract(cmd) => cmd,
            Commands::Inspect(cmd) => cmd,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    let settings = load_settings(cli.config.as_ref())?;
    let options = GlobalOptions {
        cipher: settings.cipher,
        verbose: cli.verbose,
    };

    cli.command.executor().execute(&options)
}

/// Loads the settings file, falling back to defaults when there is no home directory.
fn load_settings(path: Option<&PathBuf>) -> Result<Settings> {
    match path {
        Some(path) => Settings::load_from(path)
            .with_context(|| format!("Failed to load settings from {}", path.display())),
        None => match Settings::load() {
            Err(ConfigError::NoConfigDir) => Ok(Settings::default()),
            other => other.context("Failed to load settings"),
        },
    }
}
