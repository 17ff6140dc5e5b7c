// Copyright 2024 Karpeles Lab Inc.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::fs::File;
use std::io::{self, Write};

/// Destination produced by [`WriterBuilder`](crate::WriterBuilder)
///
/// Either a file the builder opened from a path, or the handle the
/// caller passed in.
#[derive(Debug)]
pub enum Sink<W> {
    File(File),
    Handle(W),
}

impl<W> Sink<W> {
    pub fn is_file(&self) -> bool {
        matches!(self, Sink::File(_))
    }

    /// The caller's handle, if this sink wraps one
    pub fn into_handle(self) -> Option<W> {
        match self {
            Sink::Handle(w) => Some(w),
            Sink::File(_) => None,
        }
    }
}

impl<W: Write> Write for Sink<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Sink::File(f) => f.write(buf),
            Sink::Handle(w) => w.write(buf),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            Sink::File(f) => f.write_all(buf),
            Sink::Handle(w) => w.write_all(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::File(f) => f.flush(),
            Sink::Handle(w) => w.flush(),
        }
    }
}
