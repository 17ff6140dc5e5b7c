// Copyright 2024 Karpeles Lab Inc.
// Example demonstrating BGZF file output and virtual offsets

use minbgzf::WriterBuilder;
use std::fs;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("BGZF File Compression Example\n");

    let dir = std::env::temp_dir();
    let path = dir.join("minbgzf_demo.bed.gz");

    // Write records and remember where each one starts
    let mut writer = WriterBuilder::new()
        .path(&path)
        .mode("wb")
        .level(9)
        .build()?;

    let mut offsets = Vec::new();
    for i in 0..100_000u64 {
        offsets.push(writer.virtual_offset());
        let line = format!("chr{}\t{}\t{}\tregion_{}\n", i % 22 + 1, i * 10, i * 10 + 5, i);
        writer.write_text(&line)?;
    }
    writer.close()?;

    let size = fs::metadata(&path)?.len();
    println!("  Wrote {} ({} bytes)", path.display(), size);
    println!("  Blocks: {}", writer.blocks_written());
    for i in [0usize, 50_000, 99_999] {
        let voffset = offsets[i];
        println!(
            "  record {:>6}: block at {:>8}, offset {:>5}",
            i,
            voffset >> 16,
            voffset & 0xffff
        );
    }

    // Append a second batch to the same file
    {
        let mut writer = WriterBuilder::new().path(&path).mode("ab").build()?;
        writer.write_text("chrX\t1\t2\tappended\n")?;
    }
    println!(
        "  After append: {} bytes",
        fs::metadata(&path)?.len()
    );

    fs::remove_file(&path)?;
    println!("\nDone!");
    Ok(())
}
