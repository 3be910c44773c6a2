/// Implementation of `recordio inspect`.
///
/// Reads the whole stream, decodes every record, and prints a summary
/// line per record with its wire offset and payload size.
///
/// # Output format
///
/// ```text
/// Stream: 3 records, 85 bytes
/// Record 0 @0: 57 bytes
///          Body: "{\"type\":\"SUBSCRIBED\",\"subscribed\":{...
/// Record 1 @60: 20 bytes
/// Record 2 @83: 0 bytes
/// ```
use std::fmt::Write as _;
use std::io::Read;

use anyhow::{Context, Result};
use recordio_decoder::{ReaderConfig, RecordDecoder};
use recordio_wire::RecordFrame;

use crate::InspectArgs;

/// Characters of payload shown by `--show-body`.
const BODY_PREVIEW_CHARS: usize = 80;

/// Run the `recordio inspect` command.
///
/// # Errors
///
/// Returns an error if the input cannot be read or the stream is
/// malformed or truncated.
pub fn run(args: &InspectArgs, config: &ReaderConfig) -> Result<()> {
    let mut bytes = Vec::new();
    crate::open_input(&args.file)?
        .read_to_end(&mut bytes)
        .with_context(|| format!("cannot read {}", args.file.display()))?;

    let records = RecordDecoder::decode_with_config(&bytes, config)
        .with_context(|| format!("failed to decode {}", args.file.display()))?;

    println!(
        "Stream: {} record{}, {} bytes",
        records.len(),
        if records.len() == 1 { "" } else { "s" },
        bytes.len()
    );

    let mut offset = 0;
    for (idx, payload) in records.into_iter().enumerate() {
        let frame = RecordFrame::new(payload);
        let frame_offset = offset;
        offset += frame.encoded_len();

        if let Some(target) = args.record
            && idx != target
        {
            continue;
        }

        println!("Record {idx} @{frame_offset}: {} bytes", frame.payload.len());
        if args.show_body {
            println!("         Body: {:?}", body_preview(&frame.payload));
        }
        if args.show_hex {
            print!("{}", hex_dump(&frame.payload));
        }
    }

    Ok(())
}

/// First [`BODY_PREVIEW_CHARS`] characters of the payload, UTF-8 lossy.
fn body_preview(payload: &[u8]) -> String {
    let text = String::from_utf8_lossy(payload);
    let mut preview: String = text.chars().take(BODY_PREVIEW_CHARS).collect();
    if text.chars().count() > BODY_PREVIEW_CHARS {
        preview.push('…');
    }
    preview
}

/// 16 bytes per line, indented under the record line.
fn hex_dump(payload: &[u8]) -> String {
    let mut out = String::new();
    for (line, chunk) in payload.chunks(16).enumerate() {
        let _ = writeln!(out, "         {:08x}  {}", line * 16, hex::encode(chunk));
    }
    out
}
