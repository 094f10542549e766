//! Payload compression.
//!
//! A single backend is compiled in: Brotli. Callers use [`compress`] and
//! [`decompress`] and never name the backend directly, so the stage code
//! stays independent of the underlying library.

pub mod brotli;

use std::io::{Read, Write};

use crate::{Error, Result};

pub use self::brotli::{BrotliDecoder, BrotliEncoder, BrotliEncoderOptions};

/// Highest supported compression level.
pub const MAX_LEVEL: u32 = 11;

/// Level used when none is configured (maximum quality).
pub const DEFAULT_LEVEL: u32 = MAX_LEVEL;

/// Checks that `level` is a supported compression level.
///
/// # Errors
///
/// Returns [`Error::InvalidLevel`] for levels above [`MAX_LEVEL`].
pub fn validate_level(level: u32) -> Result<u32> {
    if level > MAX_LEVEL {
        return Err(Error::InvalidLevel { level });
    }
    Ok(level)
}

/// Compresses `data` at the given level (0-11).
///
/// # Errors
///
/// Returns [`Error::InvalidLevel`] for an unsupported level and
/// [`Error::Compression`] if the encoder fails.
pub fn compress(data: &[u8], level: u32) -> Result<Vec<u8>> {
    let options = BrotliEncoderOptions {
        quality: validate_level(level)?,
        ..Default::default()
    };

    let mut encoder = BrotliEncoder::new(Vec::with_capacity(data.len() / 2), &options);
    encoder
        .write_all(data)
        .map_err(|e| Error::Compression(e.to_string()))?;
    encoder
        .try_finish()
        .map_err(|e| Error::Compression(e.to_string()))
}

/// Decompresses data produced by [`compress`].
///
/// # Errors
///
/// Returns [`Error::Compression`] if the input is not a valid stream.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = BrotliDecoder::new(data);
    let mut output = Vec::with_capacity(data.len() * 2);
    decoder
        .read_to_end(&mut output)
        .map_err(|e| Error::Compression(e.to_string()))?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compress_then_decompress() {
        let original = b"var Module=GameGlobal.Module; ".repeat(64);
        let compressed = compress(&original, DEFAULT_LEVEL).unwrap();
        assert!(compressed.len() < original.len());
        assert_eq!(decompress(&compressed).unwrap(), original);
    }

    #[test]
    fn every_level_is_accepted() {
        let data = b"\0asm\x01\0\0\0 payload";
        for level in 0..=MAX_LEVEL {
            let compressed = compress(data, level).unwrap();
            assert_eq!(decompress(&compressed).unwrap(), data);
        }
    }

    #[test]
    fn level_out_of_range() {
        let err = compress(b"data", MAX_LEVEL + 1).unwrap_err();
        assert!(matches!(err, Error::InvalidLevel { level: 12 }));
    }
}
