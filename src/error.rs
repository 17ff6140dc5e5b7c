// Copyright 2024 Karpeles Lab Inc.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::io;

use thiserror::Error;

/// Result type for BGZF operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for BGZF writing
#[derive(Debug, Error)]
pub enum Error {
    /// The mode string asks for neither write nor append
    #[error("bgzf: must use write or append mode, not {0:?}")]
    InvalidMode(String),

    /// Both a path and an open handle were given
    #[error("bgzf: a destination path and an open handle are mutually exclusive")]
    ConflictingDestination,

    /// Neither a path nor an open handle was given
    #[error("bgzf: no destination path or handle given")]
    MissingDestination,

    /// Compression level outside 0-9
    #[error("bgzf: invalid compression level {0}, expected 0-9")]
    InvalidCompressionLevel(u32),

    /// Block size outside 1..=65536
    #[error("bgzf: invalid block size {0}, expected 1-65536")]
    InvalidBlockSize(usize),

    /// Invalid input
    #[error("bgzf: invalid input: {0}")]
    InvalidInput(String),

    /// The compressed block does not fit in the 16-bit size field
    #[error("bgzf: compressed block of {size} bytes exceeds the {max} byte limit")]
    BlockTooLarge { size: usize, max: usize },

    /// Write or flush on a closed writer
    #[error("bgzf: writer is closed")]
    WriterClosed,

    /// An earlier error left the writer in an unknown state
    #[error("bgzf: writer is unusable after an earlier error")]
    Poisoned,

    /// Second explicit close
    #[error("bgzf: writer already closed")]
    AlreadyClosed,

    /// Error from the underlying sink
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Io(e) => e,
            Error::BlockTooLarge { .. } => io::Error::new(io::ErrorKind::InvalidData, err),
            other => io::Error::new(io::ErrorKind::InvalidInput, other),
        }
    }
}
