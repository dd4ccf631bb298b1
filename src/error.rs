//! Error types shared by the compressor, the decompressor and the command line tool.

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Compression needs at least one byte.
    #[error("input is empty")]
    EmptyInput,

    /// Back-reference addresses are 16 bits and decoding is bounded at 64k.
    #[error("input is {size} bytes, the maximum is {max}")]
    InputTooLarge { size: usize, max: usize },

    #[error("negative value {value} at index {index}")]
    NegativeValue { index: usize, value: i64 },

    #[error("value {value} at index {index} does not fit in a byte")]
    ValueOutOfRange { index: usize, value: i64 },

    #[error("element {index} ('{token}') is not an integer")]
    NotAnInteger { index: usize, token: String },

    #[error("invalid command length {0}: must be 1..=1024")]
    InvalidLength(usize),

    /// Command type 7 is only used by the terminator byte.
    #[error("reserved command type 7 at stream offset {offset}")]
    ReservedCommand { offset: usize },

    #[error("unexpected end of stream at offset {offset}")]
    UnexpectedEof { offset: usize },

    #[error("writing {len} bytes at {pos} overflows the {capacity}-byte output")]
    OutputOverflow {
        pos: usize,
        len: usize,
        capacity: usize,
    },

    #[error("back-reference to {address:#06x} of {len} bytes is outside the {capacity}-byte output")]
    AddressOutOfRange {
        address: usize,
        len: usize,
        capacity: usize,
    },

    #[error("backward copy of {len} bytes from {address:#06x} runs past the start of the output")]
    BackwardUnderflow { address: usize, len: usize },

    #[error("start offset {offset:#x} is beyond the end of the {size}-byte source")]
    OffsetOutOfRange { offset: usize, size: usize },

    #[error("output capacity {capacity} exceeds the maximum of {max}")]
    CapacityTooLarge { capacity: usize, max: usize },

    #[error("{0} already exists (use --force to overwrite)")]
    OutputExists(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
