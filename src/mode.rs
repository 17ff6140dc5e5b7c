// Copyright 2024 Karpeles Lab Inc.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// How a destination path is opened and how written data is interpreted
///
/// Parsed from a mode string such as `"wb"` or `"at"`. A mode containing
/// `a` appends, otherwise one containing `w` truncates. Text mode is the
/// default unless the mode contains `b`; text written to the writer is
/// always encoded as UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenMode {
    append: bool,
    text: bool,
}

impl OpenMode {
    /// Truncate or create, binary
    pub const WRITE: OpenMode = OpenMode {
        append: false,
        text: false,
    };

    /// Append or create, binary
    pub const APPEND: OpenMode = OpenMode {
        append: true,
        text: false,
    };

    pub fn is_append(self) -> bool {
        self.append
    }

    pub fn is_text(self) -> bool {
        self.text
    }
}

impl Default for OpenMode {
    fn default() -> Self {
        OpenMode::WRITE
    }
}

impl FromStr for OpenMode {
    type Err = Error;

    fn from_str(mode: &str) -> Result<Self> {
        let lower = mode.to_ascii_lowercase();
        let append = lower.contains('a');
        if !append && !lower.contains('w') {
            return Err(Error::InvalidMode(mode.to_string()));
        }
        Ok(OpenMode {
            append,
            text: !lower.contains('b'),
        })
    }
}

impl fmt::Display for OpenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.append { 'a' } else { 'w' };
        let data = if self.text { 't' } else { 'b' };
        write!(f, "{}{}", kind, data)
    }
}
