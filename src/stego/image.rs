//! LSB (Least Significant Bit) steganography for images.
//!
//! Hides data in the least significant bit of the red channel, one bit per
//! pixel, in raster order. Green, blue, alpha and the upper seven red bits are
//! never touched. Supports lossless formats only (PNG, BMP).
//!
//! Format: [data bits, 8 per byte, MSB first] + [terminator `0xFFFE`, 16 bits]

use image::{DynamicImage, GenericImageView, ImageBuffer, ImageFormat, Pixel};
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// End-of-message marker, scanned bit by bit.
pub const TERMINATOR: u16 = 0b1111_1111_1111_1110;

/// Length of the terminator in bits.
pub const TERMINATOR_BITS: usize = 16;

/// Errors that can occur during image steganography.
#[derive(Error, Debug)]
pub enum StegoError {
    #[error("Message too large for image: need {needed} bits, have capacity for {capacity}")]
    MessageTooLarge { needed: usize, capacity: usize },

    #[error("Payload contains the terminator pattern at bit {bit_offset}")]
    TerminatorCollision { bit_offset: usize },

    #[error("Image load error: {0}")]
    ImageLoadError(String),

    #[error("Image save error: {0}")]
    ImageSaveError(String),

    #[error("No hidden data found in image")]
    NoDataFound,

    #[error("Invalid data format in image")]
    InvalidFormat,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Shift register holding the last 16 bits read.
#[derive(Debug, Default)]
struct TerminatorWindow {
    window: u16,
    seen: usize,
}

impl TerminatorWindow {
    /// Pushes one bit; returns true when the window now equals the terminator.
    fn push(&mut self, bit: u8) -> bool {
        self.window = (self.window << 1) | u16::from(bit & 1);
        self.seen += 1;
        self.seen >= TERMINATOR_BITS && self.window == TERMINATOR
    }
}

/// Expands `data` into bits (MSB first) and appends the terminator.
fn message_bits(data: &[u8]) -> Vec<u8> {
    let mut bits = Vec::with_capacity(data.len() * 8 + TERMINATOR_BITS);
    for byte in data {
        bits.extend((0..8).rev().map(|i| (byte >> i) & 1));
    }
    bits.extend((0..TERMINATOR_BITS).rev().map(|i| ((TERMINATOR >> i) & 1) as u8));
    bits
}

/// Fails if a decoder would see the terminator before the end of `bits`.
fn check_collision(bits: &[u8]) -> Result<(), StegoError> {
    let mut window = TerminatorWindow::default();
    for (i, bit) in bits.iter().enumerate() {
        if window.push(*bit) && i + 1 < bits.len() {
            return Err(StegoError::TerminatorCollision {
                bit_offset: i + 1 - TERMINATOR_BITS,
            });
        }
    }
    Ok(())
}

/// Overwrites the red LSB of the first `bits.len()` pixels.
fn embed<P>(buffer: &mut ImageBuffer<P, Vec<u8>>, bits: &[u8])
where
    P: Pixel<Subpixel = u8>,
{
    for (pixel, bit) in buffer.pixels_mut().zip(bits) {
        let red = &mut pixel.channels_mut()[0];
        *red = (*red & 0xFE) | bit;
    }
}

/// Reads red LSBs until the terminator shows up, then regroups the bits into bytes.
fn scan(bits: impl Iterator<Item = u8>) -> Result<Vec<u8>, StegoError> {
    let mut window = TerminatorWindow::default();
    let mut bytes = Vec::new();
    let mut current = 0u8;

    for bit in bits {
        current = (current << 1) | bit;
        if window.push(bit) {
            let payload_bits = window.seen - TERMINATOR_BITS;
            if payload_bits % 8 != 0 {
                return Err(StegoError::InvalidFormat);
            }
            bytes.truncate(payload_bits / 8);
            debug!(bytes = bytes.len(), "terminator found");
            return Ok(bytes);
        }
        if window.seen % 8 == 0 {
            bytes.push(current);
            current = 0;
        }
    }

    Err(StegoError::NoDataFound)
}

/// Extracts the raw payload bytes from `image`.
fn reveal(image: &DynamicImage) -> Result<Vec<u8>, StegoError> {
    match image {
        DynamicImage::ImageRgb8(buffer) => scan(buffer.pixels().map(|p| p.0[0] & 1)),
        DynamicImage::ImageRgba8(buffer) => scan(buffer.pixels().map(|p| p.0[0] & 1)),
        other => {
            let buffer = other.to_rgba8();
            scan(buffer.pixels().map(|p| p.0[0] & 1))
        }
    }
}

/// Image steganography handler.
pub struct ImageStego {
    image: DynamicImage,
}

impl ImageStego {
    /// Creates a new ImageStego from a file path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, StegoError> {
        let image = image::open(path).map_err(|e| StegoError::ImageLoadError(e.to_string()))?;
        Ok(Self { image })
    }

    /// Creates a new ImageStego from encoded image bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StegoError> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| StegoError::ImageLoadError(e.to_string()))?;
        Ok(Self { image })
    }

    /// Creates a new ImageStego from a DynamicImage.
    pub fn from_image(image: DynamicImage) -> Self {
        Self { image }
    }

    /// Returns the capacity in bits, terminator included (one bit per pixel).
    pub fn capacity(&self) -> usize {
        let (width, height) = self.image.dimensions();
        (width as usize) * (height as usize)
    }

    /// Returns how many message bytes fit once the terminator is accounted for.
    pub fn max_message_len(&self) -> usize {
        self.capacity().saturating_sub(TERMINATOR_BITS) / 8
    }

    /// Hides a text message. See [`ImageStego::hide_bytes`].
    pub fn hide(&self, message: &str) -> Result<DynamicImage, StegoError> {
        self.hide_bytes(message.as_bytes())
    }

    /// Hides arbitrary bytes in the image.
    ///
    /// # Returns
    /// A new image with the data hidden inside. RGB8 and RGBA8 images keep
    /// their layout; anything else is converted to RGBA8 first.
    pub fn hide_bytes(&self, data: &[u8]) -> Result<DynamicImage, StegoError> {
        let bits = message_bits(data);
        let capacity = self.capacity();
        if bits.len() > capacity {
            return Err(StegoError::MessageTooLarge {
                needed: bits.len(),
                capacity,
            });
        }
        check_collision(&bits)?;

        debug!(bits = bits.len(), capacity, "embedding payload");

        let output = match &self.image {
            DynamicImage::ImageRgb8(buffer) => {
                let mut buffer = buffer.clone();
                embed(&mut buffer, &bits);
                DynamicImage::ImageRgb8(buffer)
            }
            DynamicImage::ImageRgba8(buffer) => {
                let mut buffer = buffer.clone();
                embed(&mut buffer, &bits);
                DynamicImage::ImageRgba8(buffer)
            }
            other => {
                let mut buffer = other.to_rgba8();
                embed(&mut buffer, &bits);
                DynamicImage::ImageRgba8(buffer)
            }
        };

        Ok(output)
    }

    /// Extracts a hidden text message.
    pub fn extract(&self) -> Result<String, StegoError> {
        String::from_utf8(self.extract_bytes()?).map_err(|_| StegoError::InvalidFormat)
    }

    /// Extracts hidden bytes.
    pub fn extract_bytes(&self) -> Result<Vec<u8>, StegoError> {
        reveal(&self.image)
    }

    /// Saves the image to a file. The format follows the file extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), StegoError> {
        self.image
            .save(path)
            .map_err(|e| StegoError::ImageSaveError(e.to_string()))
    }

    /// Returns the image as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, StegoError> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| StegoError::ImageSaveError(e.to_string()))?;
        Ok(bytes)
    }

    /// Returns a reference to the underlying image.
    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// Consumes self and returns the underlying image.
    pub fn into_image(self) -> DynamicImage {
        self.image
    }
}

/// Hides `message` in a copy of `cover`.
pub fn encode_image(cover: &DynamicImage, message: &str) -> Result<DynamicImage, StegoError> {
    ImageStego::from_image(cover.clone()).hide(message)
}

/// Recovers a hidden message, or `None` if the image carries no valid one.
pub fn decode_image(image: &DynamicImage) -> Option<String> {
    reveal(image)
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
}
