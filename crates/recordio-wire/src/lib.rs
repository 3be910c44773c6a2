#![warn(clippy::pedantic)]

pub mod error;
pub mod length;
pub mod record_frame;

pub use error::WireError;
pub use length::{
    MAX_LENGTH_DIGITS, NEWLINE, decode_length_prefix, parse_length_digits, write_length_prefix,
};
pub use record_frame::RecordFrame;
