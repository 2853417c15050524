//! Encrypt command - run a message through the cipher chain.

use anyhow::{Context, Result};
use clap::Args;

use chainhide::encrypt_message_with_config;

use super::{inline_or_stdin, report_dropped, CommandExecutor, GlobalOptions};

/// Encrypt a message (matrix -> transposition -> substitution).
///
/// Characters outside the 80-symbol alphabet, including spaces, are dropped.
#[derive(Args, Debug)]
pub struct EncryptCommand {
    /// Cipher key (at least 16 alphabet symbols)
    #[arg(short, long)]
    pub key: String,

    /// Message to encrypt (reads from stdin if not provided)
    #[arg(short, long)]
    pub message: Option<String>,
}

impl CommandExecutor for EncryptCommand {
    fn execute(&self, options: &GlobalOptions) -> Result<()> {
        let message = inline_or_stdin(self.message.as_deref(), "message")?;
        report_dropped(&message, options);

        let cipher = encrypt_message_with_config(&self.key, &message, &options.cipher)
            .context("Encryption failed")?;

        if options.verbose {
            eprintln!("Encrypted {} symbols", cipher.len());
        }
        println!("{}", cipher);
        Ok(())
    }
}
