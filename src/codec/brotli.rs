//! Brotli compression codec.
//!
//! Brotli is the compression the mini-game host decodes natively for
//! `.wasm.br` payloads, so it is the only backend this crate carries.

use std::io::{self, Read, Write};

use brotli::CompressorWriter;
use brotli::Decompressor;
use brotli::enc::BrotliEncoderParams;

/// Default buffer size for the Brotli encoder and decoder.
const BUFFER_SIZE: usize = 4096;

/// File extension appended to compressed payloads.
pub const EXTENSION: &str = "br";

/// Brotli decoder for standard Brotli streams.
pub struct BrotliDecoder<R: Read> {
    inner: Decompressor<R>,
}

impl<R: Read> std::fmt::Debug for BrotliDecoder<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrotliDecoder").finish_non_exhaustive()
    }
}

impl<R: Read> BrotliDecoder<R> {
    /// Creates a new Brotli decoder reading from `input`.
    pub fn new(input: R) -> Self {
        Self {
            inner: Decompressor::new(input, BUFFER_SIZE),
        }
    }
}

impl<R: Read> Read for BrotliDecoder<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

/// Brotli encoder options.
#[derive(Debug, Clone)]
pub struct BrotliEncoderOptions {
    /// Compression quality (0-11, default 11).
    pub quality: u32,
    /// LG window size (10-24, default 22).
    pub lg_window_size: u32,
}

impl Default for BrotliEncoderOptions {
    fn default() -> Self {
        Self {
            quality: super::DEFAULT_LEVEL,
            lg_window_size: 22,
        }
    }
}

/// Brotli encoder.
pub struct BrotliEncoder<W: Write> {
    inner: CompressorWriter<W>,
}

impl<W: Write> BrotliEncoder<W> {
    /// Creates a new Brotli encoder.
    pub fn new(output: W, options: &BrotliEncoderOptions) -> Self {
        let params = BrotliEncoderParams {
            quality: options.quality as i32,
            lgwin: options.lg_window_size as i32,
            ..Default::default()
        };
        Self {
            inner: CompressorWriter::with_params(output, BUFFER_SIZE, &params),
        }
    }

    /// Finishes encoding and returns the underlying writer.
    pub fn try_finish(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner.into_inner())
    }
}

impl<W: Write> Write for BrotliEncoder<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
