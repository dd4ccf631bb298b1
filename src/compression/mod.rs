//! The compression module holds both directions of the codec.
//!
//! Compression is a greedy single pass over the input:
//! - Look ahead from the current position for the first place where a match strategy applies
//!   (byte run, word run, incrementing run, or a copy of earlier input).
//! - Emit the bytes skipped over as a literal, then the match.
//! - Give up after 1024 bytes without a match and emit those bytes as a literal.
//!
//! Decompression is a small state machine reading one command at a time into a fixed 64k
//! output buffer. Copies address the output absolutely and may overlap the bytes being
//! written, and every write is bounds checked first. Anything out of bounds aborts the
//! decode; there is no partial result.
//!
//! The search order in `search` is part of the format in practice: data already stored in
//! ROMs was packed with it, so changing it would change the output.
//!

pub mod compress;
pub mod decompress;
pub mod output;
pub mod search;
