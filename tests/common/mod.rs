// Copyright 2024 Karpeles Lab Inc.
// Shared helpers for walking BGZF output in tests

#![allow(dead_code)]

use flate2::read::MultiGzDecoder;
use minbgzf::{BGZF_FOOTER_SIZE, BGZF_HEADER_SIZE};
use std::io::Read;

/// One block as found in a BGZF stream
pub struct RawBlock<'a> {
    pub bytes: &'a [u8],
}

impl RawBlock<'_> {
    pub fn crc(&self) -> u32 {
        let footer = self.bytes.len() - BGZF_FOOTER_SIZE;
        u32::from_le_bytes(self.bytes[footer..footer + 4].try_into().unwrap())
    }

    pub fn isize(&self) -> u32 {
        let n = self.bytes.len();
        u32::from_le_bytes(self.bytes[n - 4..].try_into().unwrap())
    }

    pub fn payload(&self) -> &[u8] {
        &self.bytes[BGZF_HEADER_SIZE..self.bytes.len() - BGZF_FOOTER_SIZE]
    }
}

/// Split a stream into blocks using each block's BSIZE field
pub fn split_blocks(stream: &[u8]) -> Vec<RawBlock<'_>> {
    let mut blocks = Vec::new();
    let mut pos = 0;
    while pos < stream.len() {
        assert!(pos + BGZF_HEADER_SIZE <= stream.len(), "truncated header at {}", pos);
        assert_eq!(&stream[pos..pos + 2], &[0x1f, 0x8b], "bad magic at {}", pos);
        let bsize = u16::from_le_bytes([stream[pos + 16], stream[pos + 17]]) as usize + 1;
        assert!(pos + bsize <= stream.len(), "truncated block at {}", pos);
        blocks.push(RawBlock {
            bytes: &stream[pos..pos + bsize],
        });
        pos += bsize;
    }
    blocks
}

/// Decompress a whole multi-member gzip stream
pub fn gunzip(stream: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    MultiGzDecoder::new(stream)
        .read_to_end(&mut out)
        .expect("multi-member gzip decode failed");
    out
}

/// Deterministic pseudo-random bytes that deflate cannot shrink
pub fn noise(len: usize, seed: u64) -> Vec<u8> {
    let mut state = seed | 1;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state >> 24) as u8
        })
        .collect()
}

/// Tab-separated text resembling a BED file
pub fn bed_lines(count: usize) -> Vec<u8> {
    let mut out = Vec::new();
    for i in 0..count {
        out.extend_from_slice(
            format!("chr{}\t{}\t{}\tfeature_{}\n", i % 22 + 1, i * 100, i * 100 + 50, i)
                .as_bytes(),
        );
    }
    out
}
