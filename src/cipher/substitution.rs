//! Playfair-style digraph substitution over an 8×10 grid.
//!
//! The grid holds all 80 symbols: the key's distinct symbols first, then the
//! rest of the alphabet in canonical order. Pairs on the same row shift right,
//! pairs in the same column shift down (both with wraparound), and any other
//! pair swaps columns across the rectangle it spans. Decryption shifts the
//! other way; the rectangle swap is its own inverse.

use super::alphabet::{self, ALPHABET, MODULUS, PADDING};
use super::CipherError;
use crate::config::CipherConfig;

/// Grid height.
pub const GRID_ROWS: usize = 8;

/// Grid width.
pub const GRID_COLS: usize = 10;

/// Key-ordered arrangement of the alphabet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: [char; MODULUS],
    /// Cell of each symbol, indexed by alphabet index.
    cell_of: [u8; MODULUS],
}

impl Grid {
    /// Builds the grid from the sanitized, de-duplicated key followed by the alphabet.
    pub fn build(key: &str) -> Self {
        let mut cells = ['\0'; MODULUS];
        let mut cell_of = [u8::MAX; MODULUS];
        let mut filled = 0;

        for idx in alphabet::indices(key).into_iter().chain(alphabet::indices(ALPHABET)) {
            if cell_of[idx as usize] != u8::MAX {
                continue;
            }
            cell_of[idx as usize] = filled as u8;
            cells[filled] = alphabet::index_to_symbol(i64::from(idx));
            filled += 1;
        }

        Self { cells, cell_of }
    }

    /// Row and column of `c`, or `None` when it is not an alphabet symbol.
    pub fn position(&self, c: char) -> Option<(usize, usize)> {
        alphabet::index_of(c).map(|idx| self.cell_position(idx))
    }

    /// Symbol at `(row, col)`, both taken with wraparound.
    pub fn symbol_at(&self, row: usize, col: usize) -> char {
        self.cells[(row % GRID_ROWS) * GRID_COLS + col % GRID_COLS]
    }

    /// Grid rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.cells.chunks(GRID_COLS)
    }

    fn cell_position(&self, idx: u8) -> (usize, usize) {
        let cell = self.cell_of[idx as usize] as usize;
        (cell / GRID_COLS, cell % GRID_COLS)
    }

    fn substitute(&self, text: &str, shift: isize) -> String {
        let indices = alphabet::indices(text);
        let mut out = String::with_capacity(indices.len());

        for pair in indices.chunks_exact(2) {
            let (ra, ca) = self.cell_position(pair[0]);
            let (rb, cb) = self.cell_position(pair[1]);

            if ra == rb {
                out.push(self.symbol_at(ra, wrap(ca, shift, GRID_COLS)));
                out.push(self.symbol_at(rb, wrap(cb, shift, GRID_COLS)));
            } else if ca == cb {
                out.push(self.symbol_at(wrap(ra, shift, GRID_ROWS), ca));
                out.push(self.symbol_at(wrap(rb, shift, GRID_ROWS), cb));
            } else {
                out.push(self.symbol_at(ra, cb));
                out.push(self.symbol_at(rb, ca));
            }
        }
        out
    }
}

fn wrap(value: usize, shift: isize, size: usize) -> usize {
    (value as isize + shift).rem_euclid(size as isize) as usize
}

/// Encrypts digraphs, padding odd-length text with `@`.
pub fn encrypt(text: &str, key: &str, config: &CipherConfig) -> Result<String, CipherError> {
    let grid = Grid::build(&alphabet::sanitize_with(key, config.symbols)?);

    let mut text = alphabet::sanitize_with(text, config.symbols)?;
    if text.len() % 2 != 0 {
        text.push(PADDING);
    }
    Ok(grid.substitute(&text, 1))
}

/// Decrypts digraphs. Padding is left in place for the caller to handle.
pub fn decrypt(cipher: &str, key: &str, config: &CipherConfig) -> Result<String, CipherError> {
    let grid = Grid::build(&alphabet::sanitize_with(key, config.symbols)?);

    let cipher = alphabet::sanitize_with(cipher, config.symbols)?;
    if cipher.len() % 2 != 0 {
        return Err(CipherError::MalformedCiphertext {
            length: cipher.len(),
            block: 2,
        });
    }
    Ok(grid.substitute(&cipher, -1))
}
