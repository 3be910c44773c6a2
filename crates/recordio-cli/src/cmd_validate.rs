/// Implementation of `recordio validate`.
///
/// Streams the input through the incremental reader and reports either
/// a success line or a diagnostic failure line. The process exits with
/// code 0 on a clean stream and code 1 otherwise.
///
/// # Success output
///
/// ```text
/// ✓ Records: 42 records framed successfully
/// ✓ Termination: stream ends on a record boundary
/// ```
///
/// # Failure output
///
/// ```text
/// ✓ Records: 3 records framed before the error
/// ✗ Error: truncated stream — payload has 10 of 57 bytes
/// ```
use anyhow::{Result, anyhow};
use recordio_decoder::{ChunkedReader, DecodeError, ReaderConfig, Records};

use crate::ValidateArgs;

/// Run the `recordio validate` command.
///
/// # Errors
///
/// Returns an error if the input cannot be opened or the stream fails
/// validation.
pub fn run(args: &ValidateArgs, config: &ReaderConfig) -> Result<()> {
    let source = crate::open_input(&args.file)?;
    let chunks = ChunkedReader::with_chunk_size(source, args.chunk_size);

    let mut count = 0usize;
    let mut bytes = 0usize;
    for result in Records::with_config(chunks, *config) {
        match result {
            Ok(payload) => {
                count += 1;
                bytes += payload.len();
            }
            Err(e) => {
                println!("✓ Records: {count} record{} framed before the error", plural(count));
                println!("✗ Error: {}", decode_error_diagnostic(&e));
                return Err(anyhow!("validation failed"));
            }
        }
    }

    println!(
        "✓ Records: {count} record{} framed successfully ({bytes} payload bytes)",
        plural(count)
    );
    println!("✓ Termination: stream ends on a record boundary");
    Ok(())
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

// ── Error formatting ──────────────────────────────────────────────────────────

/// Converts a `DecodeError` into a human-readable diagnostic string.
///
/// ```text
/// ┌──────────────────┬──────────────────────────────────────────────┐
/// │ DecodeError      │ Diagnostic message prefix                    │
/// ├──────────────────┼──────────────────────────────────────────────┤
/// │ MalformedLength  │ "bad length byte 0x.. at offset N"           │
/// │ EmptyLength      │ "empty length prefix at offset N"            │
/// │ TruncatedStream  │ "truncated stream — <where>"                 │
/// │ Upstream         │ "read failed — <io error>"                   │
/// │ other            │ "<error Display>"                            │
/// └──────────────────┴──────────────────────────────────────────────┘
/// ```
fn decode_error_diagnostic(e: &DecodeError) -> String {
    match e {
        DecodeError::MalformedLength { byte, offset } => {
            format!("bad length byte {byte:#04X} at offset {offset}")
        }
        DecodeError::EmptyLength { offset } => format!("empty length prefix at offset {offset}"),
        DecodeError::TruncatedStream(truncation) => format!("truncated stream — {truncation}"),
        DecodeError::Upstream(inner) => format!("read failed — {inner}"),
        other => other.to_string(),
    }
}
