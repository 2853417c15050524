//! # chainhide - chained classical cipher with image steganography
//!
//! chainhide encrypts text through three classical ciphers chained over a
//! fixed 80-symbol alphabet and can hide the result in a picture.
//!
//! ## Overview
//!
//! - **Matrix cipher**: 4×4 key matrix, block multiplication modulo 80
//! - **Rank transposition**: columns read in order of key symbol rank
//! - **Grid substitution**: digraphs substituted on an 8×10 key grid
//! - **LSB steganography**: ciphertext bits in the red channel of an image
//!
//! ## Security Model
//!
//! - **Not modern cryptography**: small modulus, classical constructions
//! - **No integrity check**: a wrong key yields garbage, not an error
//! - **Lossless carriers only**: recompressing a stego image destroys the message
//! - **Keys are opaque strings**: no key management or exchange
//!
//! ## Example Usage
//!
//! ```rust
//! use chainhide::{decrypt_message, encrypt_message};
//!
//! let key = "TESTKEY1Mango#42";
//!
//! let cipher = encrypt_message(key, "HELLO").unwrap();
//! assert_eq!(cipher.len(), 16);
//!
//! let plain = decrypt_message(key, &cipher).unwrap();
//! assert_eq!(plain, "HELLO");
//! ```
//!
//! Hiding the ciphertext in an image:
//!
//! ```rust
//! use chainhide::{decode_image, encode_image, encrypt_message};
//! use image::{DynamicImage, RgbImage};
//!
//! let cover = DynamicImage::ImageRgb8(RgbImage::new(64, 64));
//! let cipher = encrypt_message("TESTKEY1Mango#42", "Meet_at_noon").unwrap();
//!
//! let stego = encode_image(&cover, &cipher).unwrap();
//! assert_eq!(decode_image(&stego), Some(cipher));
//! ```
//!
//! ## Modules
//!
//! - [`cipher`]: Alphabet, the three ciphers and the pipeline
//! - [`stego`]: LSB image steganography
//! - [`config`]: Cipher policies and the settings file

pub mod cipher;
pub mod config;
pub mod stego;

// Re-export commonly used types at the crate root
pub use cipher::{
    decrypt_message, decrypt_message_with_config, encrypt_message, encrypt_message_with_config,
    CipherError,
};
pub use config::{CipherConfig, RankOrder, Settings, ShortKeyPolicy, SymbolPolicy};
pub use stego::{decode_image, encode_image, ImageStego, StegoError};
