// Copyright 2024 Karpeles Lab Inc.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::constants::*;
use crate::deflate::CompressionLevel;
use crate::error::{Error, Result};
use crate::mode::OpenMode;
use crate::sink::Sink;
use crate::writer::Writer;

/// Configures and opens a [`Writer`]
///
/// The destination is either a path, opened according to the mode, or an
/// already open handle. Everything is validated in [`build`](Self::build)
/// before the path is touched.
///
/// # Example
///
/// ```no_run
/// use minbgzf::WriterBuilder;
///
/// let mut writer = WriterBuilder::new()
///     .path("regions.bed.gz")
///     .mode("wb")
///     .level(9)
///     .build()
///     .unwrap();
/// writer.write_bytes(b"chr1\t100\t200\n").unwrap();
/// writer.close().unwrap();
/// ```
#[derive(Debug)]
pub struct WriterBuilder<W = File> {
    path: Option<PathBuf>,
    handle: Option<W>,
    mode: String,
    level: u32,
    block_size: usize,
}

impl WriterBuilder<File> {
    pub fn new() -> Self {
        WriterBuilder {
            path: None,
            handle: None,
            mode: "w".to_string(),
            level: DEFAULT_COMPRESSION_LEVEL,
            block_size: MAX_BLOCK_SIZE,
        }
    }
}

impl Default for WriterBuilder<File> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> WriterBuilder<W> {
    /// Write to a file at `path`
    pub fn path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Write to an already open handle
    pub fn handle<H: Write>(self, handle: H) -> WriterBuilder<H> {
        WriterBuilder {
            path: self.path,
            handle: Some(handle),
            mode: self.mode,
            level: self.level,
            block_size: self.block_size,
        }
    }

    /// Mode string, see [`OpenMode`]. Defaults to `"w"`.
    pub fn mode(mut self, mode: &str) -> Self {
        self.mode = mode.to_string();
        self
    }

    /// Compression level 0-9. Defaults to 6.
    ///
    /// Level 0 needs a block size of at most [`SAFE_BLOCK_SIZE`]; full
    /// 64KB stored blocks fail with [`Error::BlockTooLarge`].
    pub fn level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    /// Uncompressed bytes per block, 1-65536. Defaults to 65536.
    ///
    /// Use [`SAFE_BLOCK_SIZE`] when the data may be incompressible.
    pub fn block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn build(self) -> Result<Writer<Sink<W>>> {
        let mode: OpenMode = self.mode.parse()?;
        let level = CompressionLevel::new(self.level)?;
        if !(1..=MAX_BLOCK_SIZE).contains(&self.block_size) {
            return Err(Error::InvalidBlockSize(self.block_size));
        }

        let (sink, offset) = match (self.path, self.handle) {
            (Some(_), Some(_)) => return Err(Error::ConflictingDestination),
            (None, None) => return Err(Error::MissingDestination),
            (None, Some(handle)) => (Sink::Handle(handle), 0),
            (Some(path), None) => {
                let file = open_file(&path, mode)?;
                // Virtual offsets of appended blocks count the existing data
                let offset = if mode.is_append() {
                    file.metadata()?.len()
                } else {
                    0
                };
                (Sink::File(file), offset)
            }
        };

        Ok(Writer::from_parts(
            sink,
            level,
            self.block_size,
            mode,
            offset,
        ))
    }
}

fn open_file(path: &Path, mode: OpenMode) -> Result<File> {
    let mut options = OpenOptions::new();
    if mode.is_append() {
        options.append(true).create(true);
    } else {
        options.write(true).create(true).truncate(true);
    }
    Ok(options.open(path)?)
}
