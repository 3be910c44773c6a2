#![no_main]

use libfuzzer_sys::fuzz_target;
use recordio_decoder::{RecordDecoder, RecordReader};
use recordio_encoder::RecordEncoder;

// Fuzz target: encode arbitrary payloads, decode them back.
//
// The first byte picks the chunk size for the incremental pass.
fuzz_target!(|payloads: Vec<Vec<u8>>| {
    let stream = RecordEncoder::new().add_records(&payloads).encode().unwrap();

    assert_eq!(RecordDecoder::decode(&stream).unwrap(), payloads);

    let chunk_size = stream.first().map_or(1, |&b| usize::from(b).max(1));
    let mut reader = RecordReader::new();
    let mut records = Vec::new();
    for chunk in stream.chunks(chunk_size) {
        records.extend(reader.consume(chunk).unwrap());
    }
    reader.finish().unwrap();
    assert_eq!(records, payloads);
});
