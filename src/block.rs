// Copyright 2024 Karpeles Lab Inc.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Encoding of a single BGZF block
//!
//! A block is one complete gzip member:
//!
//! ```text
//! +--------------------+-------+------------------+-------+-------+
//! | header (16 bytes)  | BSIZE | deflate payload  | CRC32 | ISIZE |
//! +--------------------+-------+------------------+-------+-------+
//! ```
//!
//! BSIZE is the total block size minus one, so a block never exceeds
//! 65535 bytes once serialized.

use crate::constants::*;
use crate::crc::crc32;
use crate::deflate::{CompressionLevel, DeflateCompressor};
use crate::error::{Error, Result};

/// Encode `raw` as one BGZF block at the given level
///
/// `raw` must be at most 65536 bytes. Fails with [`Error::BlockTooLarge`]
/// when the compressed block does not fit the 16-bit size field.
///
/// # Example
///
/// ```
/// use minbgzf::{encode_block, CompressionLevel};
///
/// let block = encode_block(b"Hello, BGZF!", CompressionLevel::default()).unwrap();
/// let bsize = u16::from_le_bytes([block[16], block[17]]) as usize;
/// assert_eq!(bsize + 1, block.len());
/// ```
pub fn encode_block(raw: &[u8], level: CompressionLevel) -> Result<Vec<u8>> {
    BlockEncoder::new(level).encode(raw)
}

/// Reusable block encoder
pub struct BlockEncoder {
    compressor: DeflateCompressor,
}

impl BlockEncoder {
    pub fn new(level: CompressionLevel) -> Self {
        BlockEncoder {
            compressor: DeflateCompressor::new(level),
        }
    }

    pub fn level(&self) -> CompressionLevel {
        self.compressor.level()
    }

    /// Encode `raw` into a new buffer
    pub fn encode(&mut self, raw: &[u8]) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.encode_into(raw, &mut out)?;
        Ok(out)
    }

    /// Encode `raw` into `out`, replacing its contents
    ///
    /// Returns the serialized block size. On error `out` is left empty.
    pub fn encode_into(&mut self, raw: &[u8], out: &mut Vec<u8>) -> Result<usize> {
        out.clear();
        if raw.len() > MAX_BLOCK_SIZE {
            return Err(Error::InvalidInput(format!(
                "block of {} bytes exceeds {} uncompressed bytes",
                raw.len(),
                MAX_BLOCK_SIZE
            )));
        }

        out.extend_from_slice(&BGZF_HEADER);
        // BSIZE placeholder, patched once the payload length is known
        out.resize(BGZF_HEADER_SIZE, 0);

        self.compressor.compress_into(raw, out)?;

        out.extend_from_slice(&crc32(raw).to_le_bytes());
        out.extend_from_slice(&(raw.len() as u32).to_le_bytes());

        let size = out.len();
        debug_assert!(size >= BGZF_HEADER_SIZE + BGZF_FOOTER_SIZE);
        if size > MAX_BGZF_BLOCK_SIZE {
            out.clear();
            return Err(Error::BlockTooLarge {
                size,
                max: MAX_BGZF_BLOCK_SIZE,
            });
        }

        let bsize = (size - 1) as u16;
        out[BSIZE_OFFSET..BSIZE_OFFSET + 2].copy_from_slice(&bsize.to_le_bytes());

        Ok(size)
    }
}
