//! Deterministic event-stream fixture.
//!
//! Models the JSON event feed of a scheduler subscription: one
//! `SUBSCRIBED` event followed by a mix of `HEARTBEAT` and `OFFERS`
//! events. Payload sizes vary so that records straddle any fixed chunk
//! size at different positions.

use recordio_encoder::RecordEncoder;

/// Path of the golden stream relative to the crate root.
pub const GOLDEN_EVENTS: &str = "tests/golden/events.recordio";

const SUBSCRIBED: &str = r#"{"type":"SUBSCRIBED","subscribed":{"framework_id":{"value":"a7c2f1e4-0000-4000-8000-000000000001"},"heartbeat_interval_seconds":15.0}}"#;

const HEARTBEAT: &str = r#"{"type":"HEARTBEAT"}"#;

const OFFERS: &str = r#"{"type":"OFFERS","offers":{"offers":[{"id":{"value":"offer-{N}"},"hostname":"agent-{H}.example.com","resources":[{"name":"cpus","type":"SCALAR","scalar":{"value":4.0}},{"name":"mem","type":"SCALAR","scalar":{"value":8192.0}}]}]}}"#;

/// Event types of the golden stream, in order.
pub const EVENT_TYPES: [&str; 42] = [
    "SUBSCRIBED", "HEARTBEAT", "OFFERS", "OFFERS", "OFFERS", "HEARTBEAT", "OFFERS",
    "OFFERS", "OFFERS", "HEARTBEAT", "OFFERS", "OFFERS", "HEARTBEAT", "OFFERS",
    "OFFERS", "HEARTBEAT", "OFFERS", "OFFERS", "OFFERS", "HEARTBEAT", "OFFERS",
    "OFFERS", "HEARTBEAT", "OFFERS", "OFFERS", "OFFERS", "HEARTBEAT", "OFFERS",
    "OFFERS", "OFFERS", "HEARTBEAT", "OFFERS", "OFFERS", "HEARTBEAT", "OFFERS",
    "OFFERS", "OFFERS", "HEARTBEAT", "OFFERS", "HEARTBEAT", "HEARTBEAT", "HEARTBEAT",
];

/// Payload for the event at `index` of [`EVENT_TYPES`].
///
/// # Panics
///
/// Panics if `index` is out of range.
#[must_use]
pub fn event_payload(index: usize) -> Vec<u8> {
    match EVENT_TYPES[index] {
        "SUBSCRIBED" => SUBSCRIBED.as_bytes().to_vec(),
        "HEARTBEAT" => HEARTBEAT.as_bytes().to_vec(),
        _ => OFFERS
            .replace("{N}", &index.to_string())
            .replace("{H}", &(index % 3).to_string())
            .into_bytes(),
    }
}

/// All payloads of the golden stream, in order.
#[must_use]
pub fn event_payloads() -> Vec<Vec<u8>> {
    (0..EVENT_TYPES.len()).map(event_payload).collect()
}

/// The golden stream, encoded.
///
/// # Panics
///
/// Panics if encoding fails, which cannot happen without a size limit.
#[must_use]
pub fn events_stream() -> Vec<u8> {
    RecordEncoder::new()
        .add_records(event_payloads())
        .encode()
        .expect("unlimited encoder cannot fail")
}

/// A SUBSCRIBED-shaped payload of exactly 57 bytes, so that with its
/// `"57\n"` prefix the record is 60 bytes on the wire.
#[must_use]
pub fn sixty_byte_record() -> (Vec<u8>, Vec<u8>) {
    let payload = br#"{"type":"SUBSCRIBED","subscribed":{"framework_id":"f12"}}"#.to_vec();
    let mut wire = Vec::new();
    wire.extend_from_slice(format!("{}\n", payload.len()).as_bytes());
    wire.extend_from_slice(&payload);
    (payload, wire)
}

/// Split `bytes` into consecutive chunks at the given sizes, cycling
/// through `sizes` until the input is exhausted. Zero sizes produce
/// empty chunks.
///
/// # Panics
///
/// Panics if every size is zero.
#[must_use]
pub fn split_by_sizes(bytes: &[u8], sizes: &[usize]) -> Vec<Vec<u8>> {
    assert!(sizes.iter().any(|&s| s > 0), "at least one size must be non-zero");
    let mut out = Vec::new();
    let mut cursor = 0;
    for &size in sizes.iter().cycle() {
        if cursor >= bytes.len() {
            break;
        }
        let end = (cursor + size).min(bytes.len());
        out.push(bytes[cursor..end].to_vec());
        cursor = end;
    }
    out
}
