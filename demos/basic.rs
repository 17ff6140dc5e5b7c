// Copyright 2024 Karpeles Lab Inc.
// Example of basic BGZF compression

use flate2::read::MultiGzDecoder;
use minbgzf::{encode_block, CompressionLevel, Writer, BGZF_EOF};
use std::io::Read;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let original_data = b"chr1\t11873\t14409\tDDX11L1\n\
                          chr1\t14361\t29370\tWASH7P\n\
                          chr1\t17368\t17436\tMIR6859-1\n";

    println!("Original data: {} bytes", original_data.len());

    // A single block
    let block = encode_block(original_data, CompressionLevel::default())?;
    println!("Single block: {} bytes", block.len());
    println!(
        "  BSIZE field: {}",
        u16::from_le_bytes([block[16], block[17]])
    );

    // A full stream
    let mut writer = Writer::new(Vec::new());
    writer.write_bytes(original_data)?;
    let compressed = writer.finish()?;
    println!("Stream: {} bytes", compressed.len());
    println!(
        "  Ends with EOF marker: {}",
        compressed.ends_with(&BGZF_EOF)
    );

    // Any gzip decoder reads it back
    let mut decompressed = Vec::new();
    MultiGzDecoder::new(&compressed[..]).read_to_end(&mut decompressed)?;
    if decompressed == original_data {
        println!("✓ Data matches original!");
    } else {
        println!("✗ Data mismatch!");
    }

    Ok(())
}
