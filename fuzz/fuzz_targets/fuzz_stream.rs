#![no_main]

use flate2::read::MultiGzDecoder;
use libfuzzer_sys::fuzz_target;
use minbgzf::{WriterBuilder, BGZF_EOF};
use std::io::Read;

fuzz_target!(|data: &[u8]| {
    // Skip very large inputs
    if data.len() > 1_000_000 || data.len() < 2 {
        return;
    }

    // First two bytes pick the block size and the write chunk size
    let block_size = (u16::from(data[0]) << 8 | 1) as usize;
    let chunk = usize::from(data[1]).max(1) * 97;
    let payload = &data[2..];

    let mut writer = WriterBuilder::new()
        .handle(Vec::new())
        .block_size(block_size)
        .build()
        .expect("valid builder");
    for piece in payload.chunks(chunk) {
        writer.write_bytes(piece).expect("write failed");
    }
    let compressed = writer
        .finish()
        .expect("finish failed")
        .into_handle()
        .expect("handle sink");

    assert!(compressed.ends_with(&BGZF_EOF));

    let mut decompressed = Vec::new();
    MultiGzDecoder::new(&compressed[..])
        .read_to_end(&mut decompressed)
        .expect("gzip decode failed");
    assert_eq!(decompressed, payload);
});
