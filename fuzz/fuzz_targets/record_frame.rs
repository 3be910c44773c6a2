#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: RecordFrame::read_from on arbitrary bytes.
//
// Catches bugs in:
// - Digit accumulation overflow
// - Lengths larger than the remaining input
// - Missing or misplaced newline terminators
fuzz_target!(|data: &[u8]| {
    if let Ok((frame, consumed)) = recordio_wire::RecordFrame::read_from(data) {
        assert!(consumed <= data.len());
        assert!(frame.encoded_len() <= consumed);
    }
});
