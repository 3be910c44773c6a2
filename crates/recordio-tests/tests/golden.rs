//! Golden-file tests against the checked-in event stream.
//!
//! `tests/golden/events.recordio` holds 42 JSON scheduler events. Each
//! test decodes it through a different driver and checks the resulting
//! event types. Regenerate with `cargo run -p recordio-tests --bin
//! generate_golden`.

use std::fs::File;
use std::path::Path;

use recordio_decoder::{
    ChunkedReader, DecodeError, ReaderConfig, RecordDecoder, Records, StreamingDecoder, Truncation,
};
use recordio_tests::fixture::{EVENT_TYPES, GOLDEN_EVENTS, event_payloads, events_stream};

fn golden_path(subpath: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(subpath)
}

fn golden(subpath: &str) -> Vec<u8> {
    let path = golden_path(subpath);
    std::fs::read(&path)
        .unwrap_or_else(|e| panic!("failed to read golden fixture {}: {e}", path.display()))
}

/// Extract the `"type"` field of a JSON event payload.
fn event_type(payload: &[u8]) -> String {
    let value: serde_json::Value = serde_json::from_slice(payload).expect("payload is JSON");
    value["type"].as_str().expect("type is a string").to_string()
}

#[test]
fn golden_matches_fixture_generator() {
    assert_eq!(
        golden(GOLDEN_EVENTS),
        events_stream(),
        "golden file is stale; run generate_golden"
    );
}

#[test]
fn events_file_read_in_100_byte_chunks() {
    let file = File::open(golden_path(GOLDEN_EVENTS)).unwrap();
    let records: Vec<Vec<u8>> = Records::new(ChunkedReader::with_chunk_size(file, 100))
        .collect::<Result<_, _>>()
        .unwrap();

    let types: Vec<String> = records.iter().map(|r| event_type(r)).collect();
    assert_eq!(types, EVENT_TYPES);
}

#[test]
fn events_file_one_shot() {
    let records = RecordDecoder::decode(&golden(GOLDEN_EVENTS)).unwrap();
    assert_eq!(records, event_payloads());
}

#[tokio::test]
async fn events_file_streaming() {
    let file = tokio::fs::File::open(golden_path(GOLDEN_EVENTS)).await.unwrap();
    let mut decoder = StreamingDecoder::with_options(file, 100, ReaderConfig::default());
    let records = decoder.collect_all().await.unwrap();

    assert_eq!(records.len(), EVENT_TYPES.len());
    assert_eq!(event_type(&records[0]), "SUBSCRIBED");
    assert!(decoder.reader().is_clean());
}

#[test]
fn truncated_file_reports_payload_truncation() {
    let file = File::open(golden_path("tests/golden/truncated.recordio")).unwrap();
    let results: Vec<_> = Records::new(ChunkedReader::with_chunk_size(file, 100)).collect();

    let (last, complete) = results.split_last().unwrap();
    assert_eq!(complete.len(), EVENT_TYPES.len() - 1);
    assert!(complete.iter().all(Result::is_ok));
    assert!(matches!(
        last,
        Err(DecodeError::TruncatedStream(Truncation::Payload {
            expected: 20,
            received: 10
        }))
    ));
}

#[test]
fn record_limit_rejects_offers() {
    // HEARTBEAT and SUBSCRIBED fit; the first OFFERS event does not.
    let config = ReaderConfig::default().with_max_record_size(200);
    let results: Vec<_> = Records::with_config(
        ChunkedReader::with_chunk_size(File::open(golden_path(GOLDEN_EVENTS)).unwrap(), 100),
        config,
    )
    .collect();

    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert!(results[1].is_ok());
    assert!(matches!(
        results[2],
        Err(DecodeError::RecordTooLarge { limit: 200, .. })
    ));
}
