//! Steganography module for hiding data in carriers.
//!
//! Supports:
//! - Image LSB steganography (PNG, BMP), red channel only
//!
//! The codec carries arbitrary text and knows nothing about the cipher chain.

pub mod image;

pub use self::image::{decode_image, encode_image, ImageStego, StegoError, TERMINATOR};
