//! The token module forms the wire format layer shared by the compressor and the decompressor.
//!
//! A compressed block is a sequence of commands followed by the terminator byte `0xFF`.
//! Each command is a 1 or 2 byte header holding its type and length, then a type-specific
//! payload:
//! - Literal: `length` raw bytes.
//! - Fill: the byte to repeat.
//! - WordFill: the two bytes to repeat.
//! - Sequence: the starting byte of an incrementing run.
//! - CopyForward, CopyBitReversed, CopyBackward: a big-endian absolute address into the
//!   decoded output.
//!
//! Header bytes never equal `0xFF`, so the terminator is unambiguous.
//!
pub mod command;
pub mod header;
pub mod reader;
pub mod writer;
