// Copyright 2024 Karpeles Lab Inc.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

/// Fixed part of every BGZF block header
///
/// gzip magic, deflate method, FEXTRA flag, zero mtime, no extra flags,
/// unknown OS, XLEN=6, then the `BC` subfield id and its length (2).
/// The two bytes that follow hold the total block size minus one.
pub const BGZF_HEADER: [u8; 16] = [
    0x1f, 0x8b, // magic
    0x08, // CM = deflate
    0x04, // FLG = FEXTRA
    0x00, 0x00, 0x00, 0x00, // MTIME
    0x00, // XFL
    0xff, // OS = unknown
    0x06, 0x00, // XLEN
    0x42, 0x43, // SI1, SI2 = "BC"
    0x02, 0x00, // SLEN
];

/// Empty BGZF block written once at the end of every stream
pub const BGZF_EOF: [u8; 28] = [
    0x1f, 0x8b, 0x08, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0xff, 0x06, 0x00, 0x42, 0x43, 0x02,
    0x00, 0x1b, 0x00, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// Header size including the BSIZE slot
pub const BGZF_HEADER_SIZE: usize = BGZF_HEADER.len() + 2;

/// CRC32 + ISIZE
pub const BGZF_FOOTER_SIZE: usize = 8;

/// Offset of the BSIZE field inside a block
pub const BSIZE_OFFSET: usize = BGZF_HEADER.len();

/// Maximum uncompressed bytes in one block (64KB)
pub const MAX_BLOCK_SIZE: usize = 1 << 16;

/// Maximum serialized size of one block
pub const MAX_BGZF_BLOCK_SIZE: usize = u16::MAX as usize;

/// Block size used by htslib and bgzip; incompressible input still fits
pub const SAFE_BLOCK_SIZE: usize = 0xff00;

/// Default deflate level
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 6;
