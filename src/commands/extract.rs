//! Extract command - recover a message hidden by `embed`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use chainhide::{decrypt_message_with_config, ImageStego};

use super::{CommandExecutor, GlobalOptions};

/// Recover a message hidden in an image.
///
/// With --key the recovered ciphertext is decrypted before printing.
#[derive(Args, Debug)]
pub struct ExtractCommand {
    /// Stego image
    #[arg(short, long)]
    pub input: PathBuf,

    /// Decrypt the hidden ciphertext with this key
    #[arg(short, long)]
    pub key: Option<String>,
}

impl CommandExecutor for ExtractCommand {
    fn execute(&self, options: &GlobalOptions) -> Result<()> {
        let stego = ImageStego::from_file(&self.input)
            .with_context(|| format!("Failed to load image {}", self.input.display()))?;

        let hidden = stego
            .extract()
            .with_context(|| format!("No hidden message found in {}", self.input.display()))?;

        if options.verbose {
            eprintln!("Recovered {} bytes", hidden.len());
        }

        let message = match &self.key {
            Some(key) => decrypt_message_with_config(key, &hidden, &options.cipher)
                .context("Decryption failed")?,
            None => hidden,
        };

        println!("{}", message);
        Ok(())
    }
}
