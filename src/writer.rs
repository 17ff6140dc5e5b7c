// Copyright 2024 Karpeles Lab Inc.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Buffered BGZF stream writer

use std::fmt;
use std::io::{self, Write};

use log::{debug, trace, warn};

use crate::block::BlockEncoder;
use crate::constants::*;
use crate::deflate::CompressionLevel;
use crate::error::{Error, Result};
use crate::mode::OpenMode;

/// Writer compresses data into a BGZF stream
///
/// Incoming bytes are buffered and emitted as independent gzip members of
/// at most `block_size` uncompressed bytes (65536 by default). Closing the
/// writer flushes the remainder and appends the 28-byte EOF marker.
///
/// The writer is closed exactly once: either explicitly through
/// [`close`](Writer::close) or [`finish`](Writer::finish), or when it is
/// dropped. A second explicit `close` fails with [`Error::AlreadyClosed`].
///
/// Any error from a write, flush or close leaves the writer poisoned: part
/// of the data may already be in the sink, so later calls fail with
/// [`Error::Poisoned`] and closing only releases the sink, without an EOF
/// marker.
///
/// # Example
///
/// ```
/// use minbgzf::{Writer, BGZF_EOF};
///
/// let mut compressed = Vec::new();
/// {
///     let mut writer = Writer::new(&mut compressed);
///     writer.write_text("chr1\t100\t200\n").unwrap();
///     writer.write_bytes(b"chr2\t300\t400\n").unwrap();
/// } // Writer is dropped and closed here
///
/// assert!(compressed.ends_with(&BGZF_EOF));
/// ```
pub struct Writer<W: Write> {
    inner: Option<W>,
    buf: Vec<u8>,
    block: Vec<u8>,
    encoder: BlockEncoder,
    block_size: usize,
    mode: OpenMode,
    offset: u64,
    blocks_written: u64,
    poisoned: bool,
}

impl<W: Write> Writer<W> {
    /// Create a new Writer with the default compression level (6)
    pub fn new(writer: W) -> Self {
        Self::with_level(writer, CompressionLevel::default())
    }

    /// Create a new Writer with a specific compression level
    pub fn with_level(writer: W, level: CompressionLevel) -> Self {
        Self::from_parts(writer, level, MAX_BLOCK_SIZE, OpenMode::WRITE, 0)
    }

    pub(crate) fn from_parts(
        writer: W,
        level: CompressionLevel,
        block_size: usize,
        mode: OpenMode,
        offset: u64,
    ) -> Self {
        debug_assert!((1..=MAX_BLOCK_SIZE).contains(&block_size));
        debug!(
            "bgzf: opening writer (mode {}, level {}, block size {})",
            mode,
            level.get(),
            block_size
        );

        Writer {
            inner: Some(writer),
            buf: Vec::with_capacity(block_size),
            block: Vec::with_capacity(MAX_BGZF_BLOCK_SIZE),
            encoder: BlockEncoder::new(level),
            block_size,
            mode,
            offset,
            blocks_written: 0,
            poisoned: false,
        }
    }

    fn ensure_open(&self) -> Result<()> {
        if self.inner.is_none() {
            return Err(Error::WriterClosed);
        }
        if self.poisoned {
            return Err(Error::Poisoned);
        }
        Ok(())
    }

    fn poison_on_error<T>(&mut self, result: Result<T>) -> Result<T> {
        if result.is_err() {
            self.poisoned = true;
        }
        result
    }

    /// Buffer `data`, emitting a block each time `block_size` bytes accumulate
    pub fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.ensure_open()?;
        let result = self.buffer_and_emit(data);
        self.poison_on_error(result)
    }

    fn buffer_and_emit(&mut self, data: &[u8]) -> Result<()> {
        let mut data = data;
        while !data.is_empty() {
            let space_in_buf = self.block_size - self.buf.len();
            let to_write = data.len().min(space_in_buf);
            self.buf.extend_from_slice(&data[..to_write]);
            data = &data[to_write..];

            if self.buf.len() == self.block_size {
                self.flush_block()?;
            }
        }

        Ok(())
    }

    /// Buffer `text` encoded as UTF-8
    pub fn write_text(&mut self, text: &str) -> Result<()> {
        self.write_bytes(text.as_bytes())
    }

    /// Compress the buffer as one block and write it to the sink
    ///
    /// An empty buffer still produces a (zero-length) block.
    fn flush_block(&mut self) -> Result<()> {
        let inner = self.inner.as_mut().ok_or(Error::WriterClosed)?;

        let size = self.encoder.encode_into(&self.buf, &mut self.block)?;
        inner.write_all(&self.block)?;
        trace!("bgzf: block {} bytes -> {} bytes", self.buf.len(), size);

        self.offset += size as u64;
        self.blocks_written += 1;
        self.buf.clear();

        Ok(())
    }

    /// Emit everything buffered as a final block and flush the sink
    ///
    /// A block is written even when nothing is buffered.
    pub fn flush(&mut self) -> Result<()> {
        self.ensure_open()?;
        let result = self.flush_block().and_then(|_| self.flush_sink());
        self.poison_on_error(result)
    }

    fn flush_sink(&mut self) -> Result<()> {
        if let Some(inner) = self.inner.as_mut() {
            inner.flush()?;
        }
        Ok(())
    }

    /// Emit any buffered bytes, write the EOF marker, flush the sink and
    /// release it
    ///
    /// No block is emitted for an empty buffer, so the EOF marker is the
    /// only empty block a close adds. The sink is released even when one
    /// of these steps fails.
    pub fn close(&mut self) -> Result<()> {
        if self.inner.is_none() {
            return Err(Error::AlreadyClosed);
        }

        let result = self.write_trailer();
        self.inner = None;
        self.buf.clear();
        result
    }

    /// Close the stream and return the sink instead of dropping it
    pub fn finish(mut self) -> Result<W> {
        if self.inner.is_none() {
            return Err(Error::AlreadyClosed);
        }

        let result = self.write_trailer();
        let inner = self.inner.take();
        self.buf.clear();
        result?;
        inner.ok_or(Error::AlreadyClosed)
    }

    fn write_trailer(&mut self) -> Result<()> {
        if self.poisoned {
            return Err(Error::Poisoned);
        }
        let result = self.emit_trailer();
        self.poison_on_error(result)
    }

    fn emit_trailer(&mut self) -> Result<()> {
        if !self.buf.is_empty() {
            self.flush_block()?;
        }

        let inner = self.inner.as_mut().ok_or(Error::AlreadyClosed)?;
        inner.write_all(&BGZF_EOF)?;
        inner.flush()?;
        self.offset += BGZF_EOF.len() as u64;

        debug!(
            "bgzf: closed after {} blocks, {} compressed bytes",
            self.blocks_written, self.offset
        );
        Ok(())
    }

    /// Virtual file offset of the next byte written
    ///
    /// The upper 48 bits hold the compressed offset of the block that will
    /// contain the byte, the lower 16 bits its position inside that block.
    /// The value is meaningless once the writer is poisoned.
    pub fn virtual_offset(&self) -> u64 {
        (self.offset << 16) | self.buf.len() as u64
    }

    /// Number of blocks written so far, excluding the EOF marker
    pub fn blocks_written(&self) -> u64 {
        self.blocks_written
    }

    /// Number of bytes waiting for the next block
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn level(&self) -> CompressionLevel {
        self.encoder.level()
    }

    pub fn mode(&self) -> OpenMode {
        self.mode
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_none()
    }

    /// Whether an earlier error left the writer unusable
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    /// Get a reference to the underlying writer, `None` once closed
    pub fn get_ref(&self) -> Option<&W> {
        self.inner.as_ref()
    }

    /// Get a mutable reference to the underlying writer, `None` once closed
    pub fn get_mut(&mut self) -> Option<&mut W> {
        self.inner.as_mut()
    }
}

impl<W: Write> fmt::Debug for Writer<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Writer")
            .field("block_size", &self.block_size)
            .field("level", &self.level().get())
            .field("mode", &self.mode)
            .field("offset", &self.offset)
            .field("buffered", &self.buf.len())
            .field("closed", &self.is_closed())
            .field("poisoned", &self.poisoned)
            .finish()
    }
}

impl<W: Write> Write for Writer<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_bytes(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Writer::flush(self).map_err(io::Error::from)
    }
}

impl<W: Write> Drop for Writer<W> {
    fn drop(&mut self) {
        if self.inner.is_some() {
            if let Err(e) = self.close() {
                warn!("bgzf: failed to close writer on drop: {}", e);
            }
        }
    }
}
