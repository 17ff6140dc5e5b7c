// Copyright 2024 Karpeles Lab Inc.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Raw deflate compression of block payloads

use std::io::{self, Write};
use std::mem;

use flate2::write::DeflateEncoder;
use flate2::Compression;

use crate::constants::{DEFAULT_COMPRESSION_LEVEL, MAX_BLOCK_SIZE};
use crate::error::{Error, Result};

/// Deflate compression level, 0 (store) to 9 (best)
///
/// Level 0 stores blocks uncompressed, which only fits the 16-bit size
/// field with a block size of at most [`SAFE_BLOCK_SIZE`](crate::SAFE_BLOCK_SIZE).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionLevel(u32);

impl CompressionLevel {
    /// Validate a compression level
    pub fn new(level: u32) -> Result<Self> {
        if level > 9 {
            return Err(Error::InvalidCompressionLevel(level));
        }
        Ok(CompressionLevel(level))
    }

    /// The numeric level
    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        CompressionLevel(DEFAULT_COMPRESSION_LEVEL)
    }
}

impl From<CompressionLevel> for Compression {
    fn from(level: CompressionLevel) -> Self {
        Compression::new(level.0)
    }
}

/// Produces raw deflate streams (no zlib or gzip framing)
///
/// The encoder state is kept between calls and reset after each stream,
/// so one compressor serves every block of a writer.
pub struct DeflateCompressor {
    encoder: DeflateEncoder<Vec<u8>>,
    spare: Vec<u8>,
    level: CompressionLevel,
}

impl DeflateCompressor {
    pub fn new(level: CompressionLevel) -> Self {
        DeflateCompressor {
            encoder: DeflateEncoder::new(Vec::with_capacity(MAX_BLOCK_SIZE), level.into()),
            spare: Vec::with_capacity(MAX_BLOCK_SIZE),
            level,
        }
    }

    pub fn level(&self) -> CompressionLevel {
        self.level
    }

    /// Compress `input` as one complete deflate stream and append it to `out`
    pub fn compress_into(&mut self, input: &[u8], out: &mut Vec<u8>) -> io::Result<()> {
        self.encoder.write_all(input)?;
        // Swap in the spare buffer; the returned one holds exactly this stream
        let mut compressed = self.encoder.reset(mem::take(&mut self.spare))?;
        out.extend_from_slice(&compressed);
        compressed.clear();
        self.spare = compressed;
        Ok(())
    }

    /// Compress `input` into a new buffer
    pub fn compress(&mut self, input: &[u8]) -> io::Result<Vec<u8>> {
        let mut out = Vec::new();
        self.compress_into(input, &mut out)?;
        Ok(out)
    }
}
