//! Regenerates the golden RecordIO fixtures under `tests/golden/`.
//!
//! Run from the workspace root:
//!
//! ```text
//! cargo run -p recordio-tests --bin generate_golden
//! ```
//!
//! Fixtures:
//!
//! ```text
//! ┌─────────────────────┬────────────────────────────────────────────────┐
//! │ File                │ Contents                                       │
//! ├─────────────────────┼────────────────────────────────────────────────┤
//! │ events.recordio     │ 42 JSON events (SUBSCRIBED, HEARTBEAT, OFFERS) │
//! │ truncated.recordio  │ events.recordio minus its last 10 bytes        │
//! └─────────────────────┴────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::path::Path;

use recordio_tests::fixture::{GOLDEN_EVENTS, events_stream};

/// Bytes cut from the end of the events stream for the truncated fixture.
const TRUNCATE_BY: usize = 10;

fn main() -> std::io::Result<()> {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let events_path = manifest_dir.join(GOLDEN_EVENTS);
    fs::create_dir_all(events_path.parent().unwrap_or(manifest_dir))?;

    let stream = events_stream();
    fs::write(&events_path, &stream)?;
    println!("wrote {} ({} bytes)", events_path.display(), stream.len());

    let truncated_path = manifest_dir.join("tests/golden/truncated.recordio");
    let truncated = &stream[..stream.len() - TRUNCATE_BY];
    fs::write(&truncated_path, truncated)?;
    println!("wrote {} ({} bytes)", truncated_path.display(), truncated.len());

    Ok(())
}
