//! The chained cipher.
//!
//! This module provides:
//! - The fixed 80-symbol alphabet and sanitization
//! - Matrix (Hill-style) block cipher modulo 80
//! - Rank columnar transposition
//! - 8×10 grid digraph substitution
//! - The pipeline that chains all three

pub mod alphabet;
mod error;
pub mod matrix;
pub mod substitution;
pub mod transposition;

pub use alphabet::{sanitize, sanitize_with, ALPHABET, MODULUS, PADDING};
pub use error::CipherError;
pub use matrix::{KeyMatrix, MATRIX_SIZE};
pub use substitution::Grid;
pub use transposition::compute_ranks;

use tracing::debug;

use crate::config::CipherConfig;

/// Encrypts with the default policies. See [`encrypt_message_with_config`].
pub fn encrypt_message(key: &str, plaintext: &str) -> Result<String, CipherError> {
    encrypt_message_with_config(key, plaintext, &CipherConfig::default())
}

/// Decrypts with the default policies. See [`decrypt_message_with_config`].
pub fn decrypt_message(key: &str, ciphertext: &str) -> Result<String, CipherError> {
    decrypt_message_with_config(key, ciphertext, &CipherConfig::default())
}

/// Encrypts a message through the full chain:
/// 1. Matrix cipher (sanitizes and pads to 4-symbol blocks)
/// 2. Rank transposition (pads to full rows)
/// 3. Grid substitution (pads to an even length)
///
/// The output consists only of alphabet symbols.
pub fn encrypt_message_with_config(
    key: &str,
    plaintext: &str,
    config: &CipherConfig,
) -> Result<String, CipherError> {
    let key_matrix = KeyMatrix::derive(key, config)?;

    let blocks = matrix::encrypt(plaintext, &key_matrix, config)?;
    let columns = transposition::encrypt(&blocks, key, config)?;
    let cipher = substitution::encrypt(&columns, key, config)?;

    debug!(
        matrix = blocks.len(),
        transposition = columns.len(),
        substitution = cipher.len(),
        "message encrypted"
    );
    Ok(cipher)
}

/// Decrypts a message by undoing the three stages in reverse order.
///
/// Padding is removed between stages:
/// - A trailing `@` that breaks the column count is the substitution pad.
/// - After unscrambling, trailing `@` are trimmed and the length is rounded
///   back up to whole matrix blocks, restoring `@` symbols the matrix stage
///   produced itself.
///
/// There is no integrity check: a wrong key yields garbage, not an error,
/// unless the derived matrix is not invertible.
pub fn decrypt_message_with_config(
    key: &str,
    ciphertext: &str,
    config: &CipherConfig,
) -> Result<String, CipherError> {
    let key_matrix = KeyMatrix::derive(key, config)?;
    let columns = sanitize_with(key, config.symbols)?.len();

    let mut unsubstituted = substitution::decrypt(ciphertext, key, config)?;
    if columns > 0 && unsubstituted.len() % columns != 0 && unsubstituted.ends_with(PADDING) {
        unsubstituted.pop();
    }

    let unscrambled = transposition::unscramble(&unsubstituted, key, config)?;
    let blocks = restore_blocks(&unscrambled);

    let plaintext = matrix::decrypt(&blocks, &key_matrix, config)?;

    debug!(
        substitution = unsubstituted.len(),
        matrix = blocks.len(),
        plaintext = plaintext.len(),
        "message decrypted"
    );
    Ok(plaintext)
}

/// Drops transposition padding while keeping whole matrix blocks.
fn restore_blocks(text: &str) -> String {
    let trimmed = text.trim_end_matches(PADDING).len();
    let blocks = trimmed.div_ceil(MATRIX_SIZE) * MATRIX_SIZE;
    text[..blocks.min(text.len())].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RankOrder, ShortKeyPolicy};

    const KEY: &str = "TESTKEY1Mango#42";

    #[test]
    fn test_hello_roundtrip() {
        let cipher = encrypt_message(KEY, "HELLO").unwrap();
        assert_eq!(cipher, "*6((T`'^P.X)((((");
        assert_eq!(decrypt_message(KEY, &cipher).unwrap(), "HELLO");
    }

    #[test]
    fn test_ciphertext_length_follows_padding() {
        // 5 symbols -> 8 after the matrix stage -> 16 columns -> 16 (even)
        assert_eq!(encrypt_message(KEY, "HELLO").unwrap().len(), 16);
        // 17 symbols -> 20 -> 32
        assert_eq!(encrypt_message(KEY, "abcdefghijklmnopq").unwrap().len(), 32);
    }

    #[test]
    fn test_odd_column_count_roundtrip() {
        // 17-symbol key: transposition output is odd, substitution pads it
        let key = "TESTKEY1harbor55x";
        for text in ["HELLO", "x", "The_quick_brown_fox!", "abcdefghijklmnopq"] {
            let cipher = encrypt_message(key, text).unwrap();
            assert_eq!(cipher.len() % 2, 0);
            assert_eq!(decrypt_message(key, &cipher).unwrap(), text);
        }
    }

    #[test]
    fn test_spaces_are_dropped() {
        let cipher = encrypt_message(KEY, "HELLO WORLD").unwrap();
        assert_eq!(decrypt_message(KEY, &cipher).unwrap(), "HELLOWORLD");
    }

    #[test]
    fn test_padding_symbol_inside_text_survives() {
        for text in ["user@example.com", "@@x", "a@b@c@d"] {
            let cipher = encrypt_message(KEY, text).unwrap();
            assert_eq!(decrypt_message(KEY, &cipher).unwrap(), text);
        }
    }

    #[test]
    fn test_empty_message() {
        assert_eq!(encrypt_message(KEY, "").unwrap(), "");
        assert_eq!(decrypt_message(KEY, "").unwrap(), "");
    }

    #[test]
    fn test_short_key_policies() {
        assert_eq!(
            encrypt_message("TESTKEY1", "HELLO"),
            Err(CipherError::KeyTooShort {
                required: 16,
                actual: 8
            })
        );

        let zero_pad = CipherConfig {
            short_key: ShortKeyPolicy::ZeroPad,
            ..CipherConfig::default()
        };
        let cipher = encrypt_message_with_config("TESTKEY1", "HELLO", &zero_pad).unwrap();
        assert_eq!(cipher.len(), 8);
        assert_eq!(
            decrypt_message_with_config("TESTKEY1", &cipher, &zero_pad),
            Err(CipherError::MatrixNotInvertible { determinant: 0 })
        );
    }

    #[test]
    fn test_non_invertible_key() {
        // det = 4 mod 80
        assert!(matches!(
            decrypt_message("TESTKEY1abcdefgh", "ABCDEFGHIJKLMNOP"),
            Err(CipherError::MatrixNotInvertible { determinant: 4 })
        ));
    }

    #[test]
    fn test_tiered_config_roundtrip() {
        let config = CipherConfig {
            rank_order: RankOrder::Tiered,
            ..CipherConfig::default()
        };
        let cipher = encrypt_message_with_config(KEY, "Rendezvous_at_9", &config).unwrap();
        assert_eq!(
            decrypt_message_with_config(KEY, &cipher, &config).unwrap(),
            "Rendezvous_at_9"
        );
    }

    #[test]
    fn test_wrong_key_gives_garbage() {
        let cipher = encrypt_message(KEY, "Attack_at_dawn").unwrap();
        let other = decrypt_message("TESTKEY1Falcon12", &cipher).unwrap();
        assert_ne!(other, "Attack_at_dawn");
    }

    #[test]
    fn test_restore_blocks() {
        assert_eq!(restore_blocks("ABCD@@@"), "ABCD");
        assert_eq!(restore_blocks("ABC@@@@"), "ABC@");
        assert_eq!(restore_blocks("AB@@"), "AB@@");
        assert_eq!(restore_blocks("@@@"), "");
        assert_eq!(restore_blocks(""), "");
    }
}
