// Copyright 2024 Karpeles Lab Inc.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! # BGZF Writer
//!
//! This library writes BGZF (Blocked GZip Format) streams, the container
//! used by BAM, BCF and tabix-indexed text files. A BGZF stream is a series
//! of independent gzip members ("blocks") holding at most 64KB of
//! uncompressed data each, followed by a fixed empty block that readers use
//! to detect truncation.
//!
//! The output is plain gzip, so any multi-member gzip decoder reads it.
//!
//! ## Example
//!
//! ```rust
//! use minbgzf::Writer;
//! use flate2::read::MultiGzDecoder;
//! use std::io::Read;
//!
//! let mut writer = Writer::new(Vec::new());
//! writer.write_text("@HD\tVN:1.6\n").unwrap();
//! let compressed = writer.finish().unwrap();
//!
//! let mut text = String::new();
//! MultiGzDecoder::new(&compressed[..]).read_to_string(&mut text).unwrap();
//! assert_eq!(text, "@HD\tVN:1.6\n");
//! ```

mod block;
mod builder;
mod constants;
mod crc;
mod deflate;
mod error;
mod mode;
mod sink;
mod writer;

pub use block::{encode_block, BlockEncoder};
pub use builder::WriterBuilder;
pub use constants::{
    BGZF_EOF, BGZF_FOOTER_SIZE, BGZF_HEADER, BGZF_HEADER_SIZE, DEFAULT_COMPRESSION_LEVEL,
    MAX_BGZF_BLOCK_SIZE, MAX_BLOCK_SIZE, SAFE_BLOCK_SIZE,
};
pub use crc::crc32;
pub use deflate::{CompressionLevel, DeflateCompressor};
pub use error::{Error, Result};
pub use mode::OpenMode;
pub use sink::Sink;
pub use writer::Writer;

#[cfg(test)]
mod tests;
