//! Command module - Strategy pattern for CLI commands.
//!
//! Each command is a separate module implementing the `CommandExecutor` trait.

mod decrypt;
mod embed;
mod encrypt;
mod extract;
mod inspect;

pub use decrypt::DecryptCommand;
pub use embed::EmbedCommand;
pub use encrypt::EncryptCommand;
pub use extract::ExtractCommand;
pub use inspect::InspectCommand;

use std::io::{self, Read};

use anyhow::{Context, Result};
use chainhide::CipherConfig;

/// Options shared by every command, resolved from global flags and the settings file.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalOptions {
    /// Cipher policies from the settings file.
    pub cipher: CipherConfig,
    /// Print progress information to stderr.
    pub verbose: bool,
}

/// Trait for command execution - Strategy pattern.
///
/// Each command struct holds its parsed arguments and implements
/// this trait to define its execution logic.
pub trait CommandExecutor {
    /// Executes the command with its parsed arguments.
    fn execute(&self, options: &GlobalOptions) -> Result<()>;
}

/// Returns the inline value, or reads `what` from stdin when none was given.
fn inline_or_stdin(inline: Option<&str>, what: &str) -> Result<String> {
    if let Some(value) = inline {
        return Ok(value.to_string());
    }

    eprintln!("Reading {} from stdin (Ctrl+D to finish):", what);
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .with_context(|| format!("Failed to read {} from stdin", what))?;
    Ok(buffer.trim_end_matches(|c: char| c == '\r' || c == '\n').to_string())
}

/// Reports how many characters the alphabet filter will drop.
fn report_dropped(text: &str, options: &GlobalOptions) {
    if !options.verbose {
        return;
    }
    let dropped = text.chars().count() - chainhide::cipher::sanitize(text).chars().count();
    if dropped > 0 {
        eprintln!("Note: {} characters outside the alphabet will be dropped", dropped);
    }
}
