//! Rank (Myszkowski-style) columnar transposition.
//!
//! Text is laid out row-major in as many columns as the key has symbols.
//! Each column gets the rank of its key symbol among the sorted distinct key
//! symbols. Output walks the ranks in ascending order; within a rank it goes
//! row by row, emitting every column of that rank left to right, so columns
//! sharing a symbol are read together.

use tracing::trace;

use super::alphabet::{self, PADDING};
use super::CipherError;
use crate::config::{CipherConfig, RankOrder};

/// Sort key of a key symbol under `order`.
fn rank_key(c: char, order: RankOrder) -> (u8, char) {
    match order {
        RankOrder::Lexicographic => (0, c),
        RankOrder::Tiered => {
            let tier = if c.is_ascii_alphabetic() {
                0
            } else if c.is_ascii_digit() {
                1
            } else {
                2
            };
            (tier, c)
        }
    }
}

/// Returns the 1-based rank of every key symbol among the sorted distinct symbols.
pub fn compute_ranks(key: &str, order: RankOrder) -> Vec<usize> {
    let mut distinct: Vec<(u8, char)> = key.chars().map(|c| rank_key(c, order)).collect();
    distinct.sort_unstable();
    distinct.dedup();

    key.chars()
        .map(|c| match distinct.binary_search(&rank_key(c, order)) {
            Ok(i) | Err(i) => i + 1,
        })
        .collect()
}

/// Cell indices (row-major) in the order the cipher emits them.
fn traversal(ranks: &[usize], rows: usize) -> Vec<usize> {
    let cols = ranks.len();
    let mut levels = ranks.to_vec();
    levels.sort_unstable();
    levels.dedup();

    let mut order = Vec::with_capacity(rows * cols);
    for level in levels {
        for row in 0..rows {
            for (col, _) in ranks.iter().enumerate().filter(|(_, r)| **r == level) {
                order.push(row * cols + col);
            }
        }
    }
    order
}

/// Sanitized transposition key; must keep at least one symbol.
fn column_key(key: &str, config: &CipherConfig) -> Result<String, CipherError> {
    let key = alphabet::sanitize_with(key, config.symbols)?;
    if key.is_empty() {
        return Err(CipherError::KeyTooShort {
            required: 1,
            actual: 0,
        });
    }
    Ok(key)
}

/// Encrypts `text`, turning spaces into `@` and padding to full rows with `@`.
pub fn encrypt(text: &str, key: &str, config: &CipherConfig) -> Result<String, CipherError> {
    let key = column_key(key, config)?;
    let ranks = compute_ranks(&key, config.rank_order);
    let cols = ranks.len();

    let mut cells: Vec<char> = text
        .chars()
        .map(|c| if c == ' ' { PADDING } else { c })
        .collect();
    while cells.len() % cols != 0 {
        cells.push(PADDING);
    }
    let rows = cells.len() / cols;
    trace!(rows, cols, "transposition encrypt");

    Ok(traversal(&ranks, rows).into_iter().map(|i| cells[i]).collect())
}

/// Puts every cipher symbol back into the cell it was read from.
///
/// Unlike [`decrypt`], padding symbols are left in place.
pub fn unscramble(cipher: &str, key: &str, config: &CipherConfig) -> Result<String, CipherError> {
    let key = column_key(key, config)?;
    let ranks = compute_ranks(&key, config.rank_order);
    let cols = ranks.len();

    let symbols: Vec<char> = cipher.chars().collect();
    if symbols.len() % cols != 0 {
        return Err(CipherError::MalformedCiphertext {
            length: symbols.len(),
            block: cols,
        });
    }
    let rows = symbols.len() / cols;
    trace!(rows, cols, "transposition decrypt");

    let mut cells = vec![PADDING; symbols.len()];
    for (symbol, cell) in symbols.into_iter().zip(traversal(&ranks, rows)) {
        cells[cell] = symbol;
    }
    Ok(cells.into_iter().collect())
}

/// Decrypts `cipher`, turning every `@` back into a space.
pub fn decrypt(cipher: &str, key: &str, config: &CipherConfig) -> Result<String, CipherError> {
    Ok(unscramble(cipher, key, config)?.replace(PADDING, " "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiered() -> CipherConfig {
        CipherConfig {
            rank_order: RankOrder::Tiered,
            ..CipherConfig::default()
        }
    }

    #[test]
    fn test_ranks_lexicographic() {
        assert_eq!(
            compute_ranks("TESTKEY1", RankOrder::Lexicographic),
            vec![5, 2, 4, 5, 3, 2, 6, 1]
        );
        assert_eq!(
            compute_ranks("ZEBRAS", RankOrder::Lexicographic),
            vec![6, 3, 2, 4, 1, 5]
        );
    }

    #[test]
    fn test_ranks_tiered() {
        assert_eq!(
            compute_ranks("TESTKEY1", RankOrder::Tiered),
            vec![4, 1, 3, 4, 2, 1, 5, 6]
        );
        assert_eq!(compute_ranks("a1B", RankOrder::Lexicographic), vec![3, 1, 2]);
        assert_eq!(compute_ranks("a1B", RankOrder::Tiered), vec![2, 3, 1]);
        assert_eq!(compute_ranks("!a9", RankOrder::Tiered), vec![3, 1, 2]);
    }

    #[test]
    fn test_ranks_length_matches_key() {
        let ranks = compute_ranks("mississippi", RankOrder::Lexicographic);
        assert_eq!(ranks.len(), 11);
        assert_eq!(ranks, vec![2, 1, 4, 4, 1, 4, 4, 1, 3, 3, 1]);
    }

    #[test]
    fn test_distinct_key_is_plain_columnar() {
        let config = CipherConfig::default();
        let cipher = encrypt("WEAREDISCOVERED", "ZEBRAS", &config).unwrap();
        assert_eq!(cipher, "EV@ACDESERO@DE@WIR");

        assert_eq!(
            unscramble(&cipher, "ZEBRAS", &config).unwrap(),
            "WEAREDISCOVERED@@@"
        );
        assert_eq!(
            decrypt(&cipher, "ZEBRAS", &config).unwrap(),
            "WEAREDISCOVERED   "
        );
    }

    #[test]
    fn test_shared_rank_columns_read_row_by_row() {
        let config = CipherConfig::default();
        // Columns 0 and 1 share rank 1: a b, then d e, then column 2
        assert_eq!(encrypt("abcdef", "AAB", &config).unwrap(), "abdecf");
        assert_eq!(decrypt("abdecf", "AAB", &config).unwrap(), "abcdef");
    }

    #[test]
    fn test_spaces_become_padding() {
        let config = CipherConfig::default();
        let cipher = encrypt("HELLO WORLD", "TOMATO", &config).unwrap();
        assert_eq!(cipher, "LLLRE@O@HOWD");
        assert_eq!(decrypt(&cipher, "TOMATO", &config).unwrap(), "HELLO WORLD ");
    }

    #[test]
    fn test_tiered_roundtrip() {
        let config = tiered();
        let text = "Meet_me_at_the_old_mill,10pm!";
        let cipher = encrypt(text, "a1B-key9", &config).unwrap();
        assert_ne!(cipher, encrypt(text, "a1B-key9", &CipherConfig::default()).unwrap());
        assert_eq!(unscramble(&cipher, "a1B-key9", &config).unwrap().trim_end_matches('@'), text);
    }

    #[test]
    fn test_single_column_key_is_identity() {
        let config = CipherConfig::default();
        assert_eq!(encrypt("abc", "K", &config).unwrap(), "abc");
    }

    #[test]
    fn test_malformed_length() {
        let config = CipherConfig::default();
        assert_eq!(
            decrypt("ABCDE", "ZEBRAS", &config),
            Err(CipherError::MalformedCiphertext {
                length: 5,
                block: 6
            })
        );
    }

    #[test]
    fn test_key_without_symbols() {
        let config = CipherConfig::default();
        assert_eq!(
            encrypt("abc", "  ++ ", &config),
            Err(CipherError::KeyTooShort {
                required: 1,
                actual: 0
            })
        );
    }

    #[test]
    fn test_empty_text() {
        let config = CipherConfig::default();
        assert_eq!(encrypt("", "ZEBRAS", &config).unwrap(), "");
        assert_eq!(decrypt("", "ZEBRAS", &config).unwrap(), "");
    }
}
