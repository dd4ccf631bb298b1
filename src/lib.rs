//! Rust version of the EarthBound ROM block compressor.
//!
//! Version 0.1.0
//!
//! Packs byte blocks (graphics, maps, palettes, ...) into the compact token stream the game
//! expects and unpacks them again. The format is a sequence of commands: literal runs,
//! byte and word fills, incrementing sequences, and copies of earlier output (forward,
//! bit-reversed, or backward), ending with the byte `0xFF`. Decoded blocks are at most
//! 64k.
//!
//! The compressor is a greedy first-fit matcher with a 1024 byte look-ahead window. The
//! decompressor checks every write and back-reference and fails with an explicit error
//! instead of returning a partial block.
//!
//! Basic usage to compress a file is as follows:
//!
//! `$> ebcomp compress town_map.bin`
//!
//! This will create the file town_map.bin.ebc. To unpack a block stored in a ROM image:
//!
//! `$> ebcomp decompress earthbound.sfc --offset 0x2F0C00 -o town_map.bin`
//!
pub mod compression;
pub mod error;
pub mod token;
pub mod tools;

pub use compression::compress::compress;
pub use compression::decompress::{
    decompress, decompress_block, decompress_with_capacity, DecodedBlock, MAX_OUTPUT,
};
pub use error::{Error, Result};
pub use tools::bitrev::bit_reverse;
