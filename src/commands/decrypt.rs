//! Decrypt command - undo the cipher chain.

use anyhow::{Context, Result};
use clap::Args;

use chainhide::decrypt_message_with_config;

use super::{inline_or_stdin, CommandExecutor, GlobalOptions};

/// Decrypt a ciphertext produced by `encrypt`.
///
/// There is no integrity check: a wrong key prints garbage instead of failing.
#[derive(Args, Debug)]
pub struct DecryptCommand {
    /// Cipher key (must match the encryption key)
    #[arg(short, long)]
    pub key: String,

    /// Ciphertext to decrypt (reads from stdin if not provided)
    #[arg(short, long)]
    pub cipher: Option<String>,
}

impl CommandExecutor for DecryptCommand {
    fn execute(&self, options: &GlobalOptions) -> Result<()> {
        let cipher = inline_or_stdin(self.cipher.as_deref(), "ciphertext")?;

        let plain = decrypt_message_with_config(&self.key, &cipher, &options.cipher)
            .context("Decryption failed")?;

        println!("{}", plain);
        Ok(())
    }
}
