//! Cipher error types.

use thiserror::Error;

/// Errors that can occur in any stage of the cipher chain.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CipherError {
    /// The key does not carry enough alphabet symbols for the stage.
    #[error("Key too short: need {required} alphabet symbols, got {actual}")]
    KeyTooShort {
        /// Symbols the stage needs.
        required: usize,
        /// Symbols left after sanitization.
        actual: usize,
    },

    /// The key matrix determinant has no inverse modulo 80.
    #[error("Key matrix is not invertible (determinant {determinant} mod 80)")]
    MatrixNotInvertible {
        /// Determinant reduced modulo 80.
        determinant: i64,
    },

    /// Ciphertext length does not fit the stage's block structure.
    #[error("Malformed ciphertext: length {length} is not a multiple of {block}")]
    MalformedCiphertext {
        /// Length of the offending input.
        length: usize,
        /// Block size (matrix size, column count or digraph width).
        block: usize,
    },

    /// Character outside the 80-symbol alphabet (strict mode only).
    #[error("Unsupported symbol {symbol:?} at position {position}")]
    UnsupportedSymbol {
        /// The rejected character.
        symbol: char,
        /// Character offset within the input.
        position: usize,
    },
}
