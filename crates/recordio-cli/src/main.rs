/// RecordIO command-line tool — inspect, validate, decode, and build
/// length-prefixed RecordIO streams.
///
/// # Command overview
///
/// ```text
/// recordio <COMMAND> [OPTIONS]
///
/// Commands:
///   inspect    Print one summary line per record
///   validate   Check that a stream frames cleanly to the end
///   decode     Extract payloads as raw bytes, hex, lines, or JSON
///   encode     Build a stream from files or lines
///   help       Print help information
///
/// Global options:
///   -v, --verbose              Enable debug logging (RUST_LOG overrides)
///   --max-record-size <BYTES>  Reject records larger than this
///   -h, --help                 Print help
///   -V, --version              Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                     |
/// |------|---------------------------------------------|
/// | 0    | Success                                     |
/// | 1    | Error (I/O failure, malformed stream, etc.) |
///
/// All error details are written to stderr so stdout can be piped cleanly.
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use recordio_decoder::ReaderConfig;

mod cmd_decode;
mod cmd_encode;
mod cmd_inspect;
mod cmd_validate;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// The RecordIO command-line tool.
#[derive(Parser)]
#[command(name = "recordio", version, about = "RecordIO stream tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Reject records whose declared length exceeds this many bytes.
    #[arg(long, global = true)]
    max_record_size: Option<usize>,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Print a summary line for each record in a stream.
    Inspect(InspectArgs),
    /// Check that a stream decodes cleanly to the end.
    Validate(ValidateArgs),
    /// Extract record payloads.
    Decode(DecodeArgs),
    /// Build a stream from input files.
    Encode(EncodeArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `recordio inspect`.
///
/// ```text
/// ┌─────────────┬────────────────────────────────────────────────────────┐
/// │ Flag        │ Effect                                                 │
/// ├─────────────┼────────────────────────────────────────────────────────┤
/// │ --show-body │ Include first 80 chars of the payload (UTF-8 lossy)   │
/// │ --show-hex  │ Include 16-byte-per-line hex dump of the payload      │
/// │ --record N  │ Show only the record at index N                       │
/// └─────────────┴────────────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct InspectArgs {
    /// Path to the stream, or `-` for stdin.
    pub file: PathBuf,

    /// Show payload content (first 80 characters, UTF-8 lossy).
    #[arg(long)]
    pub show_body: bool,

    /// Show a hex dump of each payload.
    #[arg(long)]
    pub show_hex: bool,

    /// Inspect only the record at this zero-based index.
    #[arg(long)]
    pub record: Option<usize>,
}

/// Arguments for `recordio validate`.
///
/// Streams the input through the incremental reader in `--chunk-size`
/// reads, so arbitrarily large inputs validate in constant memory
/// (apart from the largest single record).
#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Path to the stream, or `-` for stdin.
    pub file: PathBuf,

    /// Bytes per read.
    #[arg(long, default_value_t = 8192)]
    pub chunk_size: usize,
}

/// Arguments for `recordio decode`.
///
/// ```text
/// ┌──────────┬──────────────────────────────────────────────────────────┐
/// │ Format   │ Output per record                                        │
/// ├──────────┼──────────────────────────────────────────────────────────┤
/// │ raw      │ payload bytes, no separator                              │
/// │ lines    │ payload bytes followed by '\n'                           │
/// │ hex      │ lowercase hex of the payload followed by '\n'            │
/// │ json     │ {"index":N,"length":N,"payload":...} followed by '\n'    │
/// └──────────┴──────────────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct DecodeArgs {
    /// Path to the stream, or `-` for stdin.
    pub file: PathBuf,

    /// Output format: `raw`, `lines`, `hex`, or `json`.
    #[arg(long, default_value = "lines")]
    pub format: String,

    /// Write output to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Bytes per read.
    #[arg(long, default_value_t = 8192)]
    pub chunk_size: usize,
}

/// Arguments for `recordio encode`.
///
/// Each input file becomes one record. With `--lines`, each line of each
/// input (without its trailing newline) becomes one record instead.
#[derive(clap::Args)]
pub struct EncodeArgs {
    /// Input files, in record order.
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output stream path.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Treat each input line as a separate record.
    #[arg(long)]
    pub lines: bool,
}

// ── Shared helpers ────────────────────────────────────────────────────────────

/// Open `path` for reading, treating `-` as stdin.
///
/// # Errors
///
/// Returns an error if the file cannot be opened.
pub fn open_input(path: &Path) -> Result<Box<dyn Read>> {
    if path == Path::new("-") {
        return Ok(Box::new(io::stdin()));
    }
    let file = File::open(path).with_context(|| format!("cannot read {}", path.display()))?;
    Ok(Box::new(file))
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = ReaderConfig::default();
    if let Some(limit) = cli.max_record_size {
        config = config.with_max_record_size(limit);
    }

    let result = match cli.command {
        Commands::Inspect(args) => cmd_inspect::run(&args, &config),
        Commands::Validate(args) => cmd_validate::run(&args, &config),
        Commands::Decode(args) => cmd_decode::run(&args, &config),
        Commands::Encode(args) => cmd_encode::run(&args, cli.max_record_size),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
