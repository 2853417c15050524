//! Modular matrix (Hill-style) block cipher.
//!
//! Plaintext is split into blocks of [`MATRIX_SIZE`] symbol indices and each
//! block vector `v` is replaced by `K · v mod 80`. Decryption multiplies by the
//! modular inverse of `K`, which exists only when `det(K)` is coprime to 80.

use tracing::trace;

use super::alphabet::{self, MODULUS, PADDING};
use super::CipherError;
use crate::config::{CipherConfig, ShortKeyPolicy};

/// Dimension of the key matrix.
pub const MATRIX_SIZE: usize = 4;

/// Number of key symbols consumed by the key matrix.
pub const KEY_SYMBOLS: usize = MATRIX_SIZE * MATRIX_SIZE;

const M: i64 = MODULUS as i64;

type Rows = [[i64; MATRIX_SIZE]; MATRIX_SIZE];

/// Square key matrix with entries in `0..80`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyMatrix {
    rows: Rows,
}

impl KeyMatrix {
    /// Builds the key matrix from the first 16 sanitized key symbols, row-major.
    pub fn derive(key: &str, config: &CipherConfig) -> Result<Self, CipherError> {
        let key = alphabet::sanitize_with(key, config.symbols)?;
        let mut values = alphabet::indices(&key);

        if values.len() < KEY_SYMBOLS {
            match config.short_key {
                ShortKeyPolicy::Reject => {
                    return Err(CipherError::KeyTooShort {
                        required: KEY_SYMBOLS,
                        actual: values.len(),
                    })
                }
                ShortKeyPolicy::ZeroPad => values.resize(KEY_SYMBOLS, 0),
            }
        }

        let mut rows = [[0i64; MATRIX_SIZE]; MATRIX_SIZE];
        for (i, value) in values.iter().take(KEY_SYMBOLS).enumerate() {
            rows[i / MATRIX_SIZE][i % MATRIX_SIZE] = i64::from(*value);
        }
        Ok(Self { rows })
    }

    /// Builds a matrix from explicit rows; entries are reduced modulo 80.
    pub fn from_rows(rows: Rows) -> Self {
        let mut reduced = rows;
        for value in reduced.iter_mut().flatten() {
            *value = value.rem_euclid(M);
        }
        Self { rows: reduced }
    }

    /// Returns the matrix rows.
    pub fn rows(&self) -> &Rows {
        &self.rows
    }

    /// Determinant reduced into `0..80`.
    pub fn determinant(&self) -> i64 {
        determinant(&self.as_vecs()).rem_euclid(M)
    }

    /// Returns true if the matrix has an inverse modulo 80.
    pub fn is_invertible(&self) -> bool {
        mod_inverse(self.determinant(), M).is_some()
    }

    /// Computes the inverse modulo 80 as `det⁻¹ · adj(K) mod 80`.
    pub fn inverse(&self) -> Result<Self, CipherError> {
        let det = self.determinant();
        let det_inv =
            mod_inverse(det, M).ok_or(CipherError::MatrixNotInvertible { determinant: det })?;

        let full = self.as_vecs();
        let mut rows = [[0i64; MATRIX_SIZE]; MATRIX_SIZE];
        for i in 0..MATRIX_SIZE {
            for j in 0..MATRIX_SIZE {
                // adj[j][i] is the (i, j) cofactor
                let sign = if (i + j) % 2 == 0 { 1 } else { -1 };
                let cofactor = sign * determinant(&minor(&full, i, j));
                rows[j][i] = (det_inv * cofactor).rem_euclid(M);
            }
        }
        Ok(Self { rows })
    }

    /// Multiplies the matrix by one block of symbol indices.
    fn apply(&self, block: &[u8]) -> [u8; MATRIX_SIZE] {
        let mut out = [0u8; MATRIX_SIZE];
        for (slot, row) in out.iter_mut().zip(self.rows.iter()) {
            let sum: i64 = row
                .iter()
                .zip(block)
                .map(|(k, v)| k * i64::from(*v))
                .sum();
            *slot = sum.rem_euclid(M) as u8;
        }
        out
    }

    fn as_vecs(&self) -> Vec<Vec<i64>> {
        self.rows.iter().map(|row| row.to_vec()).collect()
    }

    fn transform(&self, indices: &[u8]) -> String {
        indices
            .chunks(MATRIX_SIZE)
            .flat_map(|block| self.apply(block))
            .map(|n| alphabet::index_to_symbol(i64::from(n)))
            .collect()
    }
}

/// Finds `x` in `1..m` with `a·x ≡ 1 (mod m)` by exhaustive search.
pub fn mod_inverse(a: i64, m: i64) -> Option<i64> {
    let a = a.rem_euclid(m);
    (1..m).find(|x| (a * x) % m == 1)
}

/// Cofactor expansion along the first row.
fn determinant(m: &[Vec<i64>]) -> i64 {
    match m.len() {
        0 => 1,
        1 => m[0][0],
        2 => m[0][0] * m[1][1] - m[0][1] * m[1][0],
        n => (0..n)
            .map(|col| {
                let sign = if col % 2 == 0 { 1 } else { -1 };
                sign * m[0][col] * determinant(&minor(m, 0, col))
            })
            .sum(),
    }
}

/// Matrix without `row` and `col`.
fn minor(m: &[Vec<i64>], row: usize, col: usize) -> Vec<Vec<i64>> {
    m.iter()
        .enumerate()
        .filter(|(r, _)| *r != row)
        .map(|(_, values)| {
            values
                .iter()
                .enumerate()
                .filter(|(c, _)| *c != col)
                .map(|(_, v)| *v)
                .collect()
        })
        .collect()
}

/// Encrypts `plaintext` block by block, padding with `@` to a multiple of the matrix size.
pub fn encrypt(
    plaintext: &str,
    matrix: &KeyMatrix,
    config: &CipherConfig,
) -> Result<String, CipherError> {
    let mut text = alphabet::sanitize_with(plaintext, config.symbols)?;
    while text.len() % MATRIX_SIZE != 0 {
        text.push(PADDING);
    }

    trace!(blocks = text.len() / MATRIX_SIZE, "matrix encrypt");
    Ok(matrix.transform(&alphabet::indices(&text)))
}

/// Decrypts with the inverse matrix and strips trailing `@` from the result.
///
/// A plaintext that genuinely ended in `@` loses those symbols.
pub fn decrypt(
    ciphertext: &str,
    matrix: &KeyMatrix,
    config: &CipherConfig,
) -> Result<String, CipherError> {
    let text = alphabet::sanitize_with(ciphertext, config.symbols)?;
    if text.len() % MATRIX_SIZE != 0 {
        return Err(CipherError::MalformedCiphertext {
            length: text.len(),
            block: MATRIX_SIZE,
        });
    }

    let inverse = matrix.inverse()?;
    trace!(blocks = text.len() / MATRIX_SIZE, "matrix decrypt");

    let plain = inverse.transform(&alphabet::indices(&text));
    Ok(plain.trim_end_matches(PADDING).to_string())
}
