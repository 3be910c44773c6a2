#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use recordio_decoder::{RecordDecoder, RecordReader};

#[derive(Arbitrary, Debug)]
struct Input {
    stream: Vec<u8>,
    chunk_sizes: Vec<u8>,
}

// Fuzz target: incremental reader over arbitrary chunkings.
//
// Input format: an arbitrary byte stream plus a list of chunk sizes
// (cycled; zero means an empty chunk). The reader must emit exactly
// what the one-shot decoder produces, and fail whenever it fails.
fuzz_target!(|input: Input| {
    let one_shot = RecordDecoder::decode(&input.stream);

    let sizes: Vec<usize> = if input.chunk_sizes.iter().any(|&s| s > 0) {
        input.chunk_sizes.iter().map(|&s| usize::from(s)).collect()
    } else {
        vec![input.stream.len().max(1)]
    };

    let mut reader = RecordReader::new();
    let mut records = Vec::new();
    let mut cursor = 0;
    let mut failed = false;
    for &size in sizes.iter().cycle() {
        if cursor >= input.stream.len() {
            break;
        }
        let end = (cursor + size).min(input.stream.len());
        if reader
            .consume_with(&input.stream[cursor..end], |r| records.push(r))
            .is_err()
        {
            failed = true;
            break;
        }
        cursor = end;
    }
    if !failed {
        failed = reader.finish().is_err();
    }

    match one_shot {
        Ok(expected) => {
            assert!(!failed);
            assert_eq!(records, expected);
        }
        Err(_) => assert!(failed),
    }
});
