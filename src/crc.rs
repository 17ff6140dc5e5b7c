// Copyright 2024 Karpeles Lab Inc.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! CRC32 checksum stored in each BGZF block footer

/// Calculate the gzip CRC32 (IEEE polynomial) of `data`
pub fn crc32(data: &[u8]) -> u32 {
    crc32fast::hash(data)
}
