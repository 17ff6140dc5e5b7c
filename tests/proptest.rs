// Copyright 2024 Karpeles Lab Inc.
// Property-based tests using proptest

mod common;

use common::{gunzip, split_blocks};
use minbgzf::{encode_block, CompressionLevel, Writer, WriterBuilder, BGZF_EOF, SAFE_BLOCK_SIZE};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_roundtrip(data in prop::collection::vec(any::<u8>(), 0..60_000)) {
        // Under one block, so even incompressible input fits
        let mut writer = Writer::new(Vec::new());
        writer.write_bytes(&data).expect("write failed");
        let compressed = writer.finish().expect("finish failed");
        prop_assert_eq!(gunzip(&compressed), data);
    }

    #[test]
    fn prop_roundtrip_chunked(
        chunks in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..5000), 0..60),
        block_size in 1usize..=SAFE_BLOCK_SIZE,
    ) {
        let mut writer = WriterBuilder::new()
            .handle(Vec::new())
            .block_size(block_size)
            .build()
            .unwrap();
        for chunk in &chunks {
            writer.write_bytes(chunk).expect("write failed");
        }
        let compressed = writer.finish().unwrap().into_handle().unwrap();
        prop_assert_eq!(gunzip(&compressed), chunks.concat());
    }

    #[test]
    fn prop_blocks_respect_limits(
        // Low-entropy bytes so full blocks compress even at level 1
        data in prop::collection::vec(0u8..4, 0..300_000),
        level in 1u32..=9,
    ) {
        let mut writer = WriterBuilder::new()
            .handle(Vec::new())
            .level(level)
            .build()
            .unwrap();
        writer.write_bytes(&data).unwrap();
        let compressed = writer.finish().unwrap().into_handle().unwrap();

        let blocks = split_blocks(&compressed);
        let mut total = 0usize;
        for block in &blocks {
            prop_assert!(block.bytes.len() <= 65535);
            prop_assert!(block.isize() <= 65536);
            total += block.isize() as usize;
        }
        prop_assert_eq!(total, data.len());
        prop_assert_eq!(blocks.last().unwrap().bytes, &BGZF_EOF[..]);
    }

    #[test]
    fn prop_block_footer_matches_input(data in prop::collection::vec(any::<u8>(), 0..20_000)) {
        let block = encode_block(&data, CompressionLevel::default()).unwrap();
        let blocks = split_blocks(&block);
        prop_assert_eq!(blocks.len(), 1);
        prop_assert_eq!(blocks[0].crc(), crc32fast::hash(&data));
        prop_assert_eq!(blocks[0].isize() as usize, data.len());
        prop_assert_eq!(gunzip(&block), data);
    }

    #[test]
    fn prop_virtual_offset_tracks_buffer(sizes in prop::collection::vec(0usize..40_000, 0..10)) {
        let mut writer = Writer::new(Vec::new());
        let mut total = 0usize;
        for size in sizes {
            writer.write_bytes(&vec![b'n'; size]).unwrap();
            total += size;
            prop_assert_eq!((writer.virtual_offset() & 0xffff) as usize, total % 65536);
            prop_assert_eq!(writer.blocks_written() as usize, total / 65536);
        }
    }
}
