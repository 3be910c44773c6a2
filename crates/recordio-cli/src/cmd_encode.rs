/// Implementation of `recordio encode`.
///
/// Builds a RecordIO stream from input files. By default each file is
/// one record; with `--lines` each line (newline stripped, a trailing
/// `\r` kept) is one record.
use std::fs;

use anyhow::{Context, Result};
use recordio_encoder::RecordEncoder;

use crate::EncodeArgs;

/// Run the `recordio encode` command.
///
/// # Errors
///
/// Returns an error if an input cannot be read, a record exceeds
/// `max_record_size`, or the output cannot be written.
pub fn run(args: &EncodeArgs, max_record_size: Option<usize>) -> Result<()> {
    let mut encoder = RecordEncoder::new();
    if let Some(limit) = max_record_size {
        encoder.with_max_record_size(limit);
    }

    for path in &args.inputs {
        let bytes = fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
        if args.lines {
            encoder.add_records(split_lines(&bytes));
        } else {
            encoder.add_record(&bytes);
        }
    }

    let stream = encoder.encode().context("failed to encode records")?;
    fs::write(&args.output, &stream)
        .with_context(|| format!("cannot write {}", args.output.display()))?;

    println!(
        "Wrote {} record{} ({} bytes) to {}",
        encoder.len(),
        if encoder.len() == 1 { "" } else { "s" },
        stream.len(),
        args.output.display()
    );
    Ok(())
}

/// Split on `\n`, dropping the empty tail after a final newline.
fn split_lines(bytes: &[u8]) -> impl Iterator<Item = &[u8]> {
    let body = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    let empty = bytes.is_empty();
    body.split(|&b| b == b'\n').filter(move |_| !empty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_lines_drops_final_newline() {
        let lines: Vec<&[u8]> = split_lines(b"a\nbb\n").collect();
        assert_eq!(lines, vec![b"a".as_slice(), b"bb".as_slice()]);
    }

    #[test]
    fn split_lines_keeps_blank_lines() {
        let lines: Vec<&[u8]> = split_lines(b"a\n\nb").collect();
        assert_eq!(lines, vec![b"a".as_slice(), b"".as_slice(), b"b".as_slice()]);
    }

    #[test]
    fn split_lines_empty_input() {
        assert_eq!(split_lines(b"").count(), 0);
    }
}
