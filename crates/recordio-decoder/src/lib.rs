#![warn(clippy::pedantic)]

pub mod config;
pub mod decoder;
pub mod error;
pub mod reader;
pub mod records;
pub mod streaming;

pub use config::ReaderConfig;
pub use decoder::RecordDecoder;
pub use error::{ConsumeError, DecodeError, Truncation};
pub use reader::RecordReader;
pub use records::{ChunkedReader, Records};
pub use streaming::StreamingDecoder;
