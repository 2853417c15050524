//! Inspect command - show the material a key derives.

use anyhow::{Context, Result};
use clap::Args;

use chainhide::cipher::{compute_ranks, sanitize_with, Grid, KeyMatrix};

use super::{CommandExecutor, GlobalOptions};

/// Show the key matrix, transposition ranks and substitution grid for a key.
///
/// Useful to check that a key can decrypt before sharing it.
#[derive(Args, Debug)]
pub struct InspectCommand {
    /// Cipher key
    #[arg(short, long)]
    pub key: String,
}

impl CommandExecutor for InspectCommand {
    fn execute(&self, options: &GlobalOptions) -> Result<()> {
        let config = &options.cipher;
        let key = sanitize_with(&self.key, config.symbols).context("Invalid key")?;

        let matrix = KeyMatrix::derive(&self.key, config).context("Cannot build key matrix")?;
        println!("Key matrix:");
        for row in matrix.rows() {
            let cells: Vec<String> = row.iter().map(|v| format!("{:>3}", v)).collect();
            println!("  [{}]", cells.join(" "));
        }

        let determinant = matrix.determinant();
        match matrix.inverse() {
            Ok(_) => println!("Determinant: {} (invertible, decryption possible)", determinant),
            Err(_) => println!(
                "Determinant: {} (NOT invertible mod 80, messages cannot be decrypted)",
                determinant
            ),
        }

        println!();
        println!("Transposition ranks ({} columns):", key.chars().count());
        let ranks: Vec<String> = compute_ranks(&key, config.rank_order)
            .iter()
            .map(|r| r.to_string())
            .collect();
        println!("  {}", ranks.join(" "));

        println!();
        println!("Substitution grid:");
        for row in Grid::build(&key).rows() {
            let row: String = row.iter().flat_map(|c| [*c, ' ']).collect();
            println!("  {}", row.trim_end());
        }

        Ok(())
    }
}
