//! The tools module provides the helpers around the codec proper.
//!
//! The tools are:
//! - adapter: Conversion between integer lists and byte buffers, with validation.
//! - bitrev: Bit-reversal lookup table used by the bit-reversed copy command.
//! - cli: Command line interface.
//! - files: File level compress, decompress, test and list operations.
//! - rom: A ROM image holding compressed blocks at known offsets.
//!
pub mod adapter;
pub mod bitrev;
pub mod cli;
pub mod files;
pub mod rom;
