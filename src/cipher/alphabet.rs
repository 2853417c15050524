//! The fixed 80-symbol alphabet shared by every cipher stage.
//!
//! Symbols map to indices 0..80 in the order of [`ALPHABET`]. The reverse
//! lookup table is computed at compile time, so there is no runtime state.

use super::CipherError;
use crate::config::SymbolPolicy;

/// Ordered alphabet: letters, digits, then punctuation ending with the padding symbol.
pub const ALPHABET: &str = concat!(
    "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
    "abcdefghijklmnopqrstuvwxyz",
    "0123456789",
    "_-`~",
    "!?'().,",
    "#$%^&*@",
);

/// Modulus for all index arithmetic.
pub const MODULUS: usize = 80;

/// Symbol used to pad blocks, columns and digraphs.
pub const PADDING: char = '@';

const UNMAPPED: u8 = u8::MAX;

const LOOKUP: [u8; 128] = build_lookup();

const fn build_lookup() -> [u8; 128] {
    let bytes = ALPHABET.as_bytes();
    let mut table = [UNMAPPED; 128];
    let mut i = 0;
    while i < bytes.len() {
        table[bytes[i] as usize] = i as u8;
        i += 1;
    }
    table
}

/// Returns the index of `c`, or `None` when it is not an alphabet symbol.
pub fn index_of(c: char) -> Option<u8> {
    let code = c as u32;
    if code >= 128 {
        return None;
    }
    match LOOKUP[code as usize] {
        UNMAPPED => None,
        idx => Some(idx),
    }
}

/// Returns true if `c` belongs to the alphabet.
pub fn is_symbol(c: char) -> bool {
    index_of(c).is_some()
}

/// Maps a symbol to its index in `0..80`.
pub fn symbol_to_index(c: char) -> Result<u8, CipherError> {
    index_of(c).ok_or(CipherError::UnsupportedSymbol {
        symbol: c,
        position: 0,
    })
}

/// Maps any integer to a symbol, reducing it modulo 80 first.
pub fn index_to_symbol(n: i64) -> char {
    ALPHABET.as_bytes()[n.rem_euclid(MODULUS as i64) as usize] as char
}

/// Keeps only alphabet symbols, preserving order.
pub fn sanitize(text: &str) -> String {
    text.chars().filter(|&c| is_symbol(c)).collect()
}

/// Sanitizes `text` according to `policy`.
///
/// `Strict` reports the first character outside the alphabet instead of dropping it.
pub fn sanitize_with(text: &str, policy: SymbolPolicy) -> Result<String, CipherError> {
    match policy {
        SymbolPolicy::Sanitize => Ok(sanitize(text)),
        SymbolPolicy::Strict => {
            if let Some((position, symbol)) = text.chars().enumerate().find(|&(_, c)| !is_symbol(c)) {
                return Err(CipherError::UnsupportedSymbol { symbol, position });
            }
            Ok(text.to_string())
        }
    }
}

/// Converts already-sanitized text into symbol indices.
pub(crate) fn indices(text: &str) -> Vec<u8> {
    text.chars().filter_map(index_of).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_has_80_distinct_symbols() {
        let mut chars: Vec<char> = ALPHABET.chars().collect();
        assert_eq!(chars.len(), MODULUS);
        chars.sort_unstable();
        chars.dedup();
        assert_eq!(chars.len(), MODULUS);
    }

    #[test]
    fn test_index_mapping_is_bijective() {
        for (i, c) in ALPHABET.chars().enumerate() {
            assert_eq!(symbol_to_index(c).unwrap() as usize, i);
            assert_eq!(index_to_symbol(i as i64), c);
        }
    }

    #[test]
    fn test_padding_is_last_symbol() {
        assert_eq!(symbol_to_index(PADDING).unwrap(), 79);
    }

    #[test]
    fn test_index_to_symbol_wraps() {
        assert_eq!(index_to_symbol(80), 'A');
        assert_eq!(index_to_symbol(-1), '@');
        assert_eq!(index_to_symbol(-81), '@');
        assert_eq!(index_to_symbol(165), 'F');
    }

    #[test]
    fn test_unsupported_symbol() {
        for c in [' ', '\n', 'é', '+', '/', '"', ':'] {
            assert!(matches!(
                symbol_to_index(c),
                Err(CipherError::UnsupportedSymbol { symbol, .. }) if symbol == c
            ));
        }
    }

    #[test]
    fn test_sanitize_drops_foreign_characters() {
        assert_eq!(sanitize("Hello, World! 100%"), "Hello,World!100%");
        assert_eq!(sanitize("ñandú + café"), "andcaf");
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn test_sanitize_strict() {
        assert_eq!(sanitize_with("abc@", SymbolPolicy::Strict).unwrap(), "abc@");

        let err = sanitize_with("ab c", SymbolPolicy::Strict).unwrap_err();
        assert_eq!(
            err,
            CipherError::UnsupportedSymbol {
                symbol: ' ',
                position: 2
            }
        );
    }
}
