//! Embed command - hide a message in an image.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;

use chainhide::{encrypt_message_with_config, ImageStego};

use super::{inline_or_stdin, report_dropped, CommandExecutor, GlobalOptions};

/// Hide a message in the red channel LSBs of a cover image.
///
/// With --key the message is encrypted first and the ciphertext is hidden.
/// The output must be a lossless format (PNG or BMP).
#[derive(Args, Debug)]
pub struct EmbedCommand {
    /// Cover image
    #[arg(short, long)]
    pub input: PathBuf,

    /// Where to write the stego image (.png or .bmp)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Message to hide (reads from stdin if not provided)
    #[arg(short, long)]
    pub message: Option<String>,

    /// Encrypt the message with this key before hiding it
    #[arg(short, long)]
    pub key: Option<String>,
}

impl CommandExecutor for EmbedCommand {
    fn execute(&self, options: &GlobalOptions) -> Result<()> {
        if is_lossy(&self.output) {
            bail!(
                "{} is a lossy format and would destroy the hidden message; use .png or .bmp",
                self.output.display()
            );
        }

        let message = inline_or_stdin(self.message.as_deref(), "message")?;

        let payload = match &self.key {
            Some(key) => {
                report_dropped(&message, options);
                encrypt_message_with_config(key, &message, &options.cipher)
                    .context("Encryption failed")?
            }
            None => message,
        };

        let cover = ImageStego::from_file(&self.input)
            .with_context(|| format!("Failed to load cover image {}", self.input.display()))?;

        if options.verbose {
            eprintln!(
                "Cover holds {} bits; payload needs {}",
                cover.capacity(),
                payload.len() * 8 + chainhide::stego::image::TERMINATOR_BITS
            );
        }

        let hidden = cover.hide(&payload).context("Failed to hide message")?;
        ImageStego::from_image(hidden)
            .save(&self.output)
            .with_context(|| format!("Failed to write {}", self.output.display()))?;

        eprintln!("Message hidden in {}", self.output.display());
        Ok(())
    }
}

fn is_lossy(path: &Path) -> bool {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    matches!(ext.as_str(), "jpg" | "jpeg" | "webp" | "avif")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_lossy() {
        assert!(is_lossy(Path::new("out.jpg")));
        assert!(is_lossy(Path::new("out.JPEG")));
        assert!(!is_lossy(Path::new("out.png")));
        assert!(!is_lossy(Path::new("out.bmp")));
        assert!(!is_lossy(Path::new("out")));
    }
}
