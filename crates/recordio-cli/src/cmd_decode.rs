/// Implementation of `recordio decode`.
///
/// Streams the input through the incremental reader and writes each
/// payload as soon as it completes, in the selected format. Output goes
/// to stdout or to `-o <file>`.
///
/// Payloads already written stay written if the stream later turns out
/// to be malformed or truncated; the error is still reported and the
/// exit code is 1.
use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result, anyhow};
use recordio_decoder::{ChunkedReader, ReaderConfig, Records};

use crate::DecodeArgs;

/// Output encodings for `--format`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Raw,
    Lines,
    Hex,
    Json,
}

/// Run the `recordio decode` command.
///
/// # Errors
///
/// Returns an error if the format is unknown, the input or output cannot
/// be opened, writing fails, or the stream is invalid.
pub fn run(args: &DecodeArgs, config: &ReaderConfig) -> Result<()> {
    let format = parse_output_format(&args.format)?;
    let source = crate::open_input(&args.file)?;
    let chunks = ChunkedReader::with_chunk_size(source, args.chunk_size);

    let sink: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("cannot write {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    let mut out = BufWriter::new(sink);

    let mut count = 0usize;
    for result in Records::with_config(chunks, *config) {
        let payload =
            result.with_context(|| format!("failed to decode {}", args.file.display()))?;
        write_record(&mut out, format, count, &payload).context("cannot write output")?;
        count += 1;
    }

    out.flush().context("cannot write output")?;
    log::debug!("decoded {count} records from {}", args.file.display());
    Ok(())
}

/// Parses the `--format` string to an [`OutputFormat`].
fn parse_output_format(s: &str) -> Result<OutputFormat> {
    match s.to_lowercase().as_str() {
        "raw" => Ok(OutputFormat::Raw),
        "lines" => Ok(OutputFormat::Lines),
        "hex" => Ok(OutputFormat::Hex),
        "json" => Ok(OutputFormat::Json),
        _ => Err(anyhow!("unknown format {s:?} — expected raw|lines|hex|json")),
    }
}

fn write_record(
    out: &mut impl Write,
    format: OutputFormat,
    index: usize,
    payload: &[u8],
) -> io::Result<()> {
    match format {
        OutputFormat::Raw => out.write_all(payload),
        OutputFormat::Lines => {
            out.write_all(payload)?;
            out.write_all(b"\n")
        }
        OutputFormat::Hex => writeln!(out, "{}", hex::encode(payload)),
        OutputFormat::Json => writeln!(out, "{}", json_record(index, payload)),
    }
}

/// Wrap a payload as a JSON object.
///
/// Payloads that are themselves valid JSON are embedded as structured
/// values; anything else is embedded as a UTF-8 lossy string.
fn json_record(index: usize, payload: &[u8]) -> serde_json::Value {
    let body = serde_json::from_slice::<serde_json::Value>(payload)
        .unwrap_or_else(|_| serde_json::Value::String(String::from_utf8_lossy(payload).into_owned()));
    serde_json::json!({
        "index": index,
        "length": payload.len(),
        "payload": body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_formats() {
        assert_eq!(parse_output_format("RAW").unwrap(), OutputFormat::Raw);
        assert_eq!(parse_output_format("json").unwrap(), OutputFormat::Json);
        assert!(parse_output_format("yaml").is_err());
    }

    #[test]
    fn json_embeds_structured_payloads() {
        let value = json_record(3, br#"{"type":"HEARTBEAT"}"#);
        assert_eq!(value["index"], 3);
        assert_eq!(value["length"], 20);
        assert_eq!(value["payload"]["type"], "HEARTBEAT");
    }

    #[test]
    fn json_falls_back_to_string() {
        let value = json_record(0, b"not json");
        assert_eq!(value["payload"], "not json");
    }

    #[test]
    fn lines_and_hex_output() {
        let mut out = Vec::new();
        write_record(&mut out, OutputFormat::Lines, 0, b"ab").unwrap();
        write_record(&mut out, OutputFormat::Hex, 1, b"ab").unwrap();
        write_record(&mut out, OutputFormat::Raw, 2, b"ab").unwrap();
        assert_eq!(out, b"ab\n6162\nab");
    }
}
