//! Match strategies used by the compressor.
//!
//! At every candidate position the strategies are tried in a fixed order and the first one
//! that qualifies is taken:
//! 1. Byte run of 3 or more: Fill.
//! 2. Byte pair repeated 3 or more times: WordFill.
//! 3. Incrementing run of 4 or more: Sequence.
//! 4. An earlier copy of 5 or more bytes: for each earlier start position, lowest first, try a
//!    forward copy, then a bit-reversed copy, then a backward copy.
//!
//! The back-reference search is first fit, not longest match. Existing compressed data was
//! produced this way, so the choice has to stay bit-exact.

use crate::token::command::Command;
use crate::token::header::MAX_LEN;
use crate::tools::bitrev::bit_reverse;

const MIN_FILL: usize = 3;
const MIN_WORD_REPEATS: usize = 3;
const MIN_SEQUENCE: usize = 4;
const MIN_COPY: usize = 5;

/// Length of the run of `data[pos]` starting at `pos`, at most 1024.
pub fn byte_run(data: &[u8], pos: usize) -> usize {
    let value = data[pos];
    data[pos..]
        .iter()
        .take(MAX_LEN)
        .take_while(|&&b| b == value)
        .count()
}

/// Number of times the pair `data[pos], data[pos + 1]` repeats starting at `pos`, at most
/// 1024. Only whole pairs count.
pub fn word_run(data: &[u8], pos: usize) -> usize {
    if pos + 1 >= data.len() {
        return 0;
    }
    let pair = &data[pos..pos + 2];
    data[pos..]
        .chunks_exact(2)
        .take(MAX_LEN)
        .take_while(|&chunk| chunk == pair)
        .count()
}

/// Length of the run `data[pos], data[pos] + 1, ...` (mod 256) starting at `pos`, at most 1024.
pub fn sequence_run(data: &[u8], pos: usize) -> usize {
    let start = data[pos];
    data[pos..]
        .iter()
        .take(MAX_LEN)
        .enumerate()
        .take_while(|&(k, &b)| b == start.wrapping_add(k as u8))
        .count()
}

/// Length of the match between `data[src..]` and `data[pos..]`, where `map` is applied to the
/// bytes at `pos`. The source has to end before `pos`.
fn forward_match(data: &[u8], src: usize, pos: usize, map: impl Fn(u8) -> u8) -> usize {
    data[src..pos]
        .iter()
        .zip(&data[pos..])
        .take(MAX_LEN)
        .take_while(|&(&a, &b)| a == map(b))
        .count()
}

/// Length of the match reading `data` backward from `src` while reading forward from `pos`.
pub fn backward_match(data: &[u8], src: usize, pos: usize) -> usize {
    data[..=src]
        .iter()
        .rev()
        .zip(&data[pos..])
        .take(MAX_LEN)
        .take_while(|&(a, b)| a == b)
        .count()
}

/// Search `data[..pos]` for a copy of the bytes at `pos`. Returns the first start position
/// with a qualifying forward, bit-reversed or backward match, in that order of preference.
pub fn find_back_reference<'a>(data: &[u8], pos: usize) -> Option<Command<'a>> {
    for src in 0..pos {
        // Addresses are 16 bits; the compressor rejects inputs that could need more.
        let address = src as u16;

        let len = forward_match(data, src, pos, |b| b);
        if len >= MIN_COPY {
            return Some(Command::CopyForward { address, len });
        }
        let len = forward_match(data, src, pos, bit_reverse);
        if len >= MIN_COPY {
            return Some(Command::CopyBitReversed { address, len });
        }
        let len = backward_match(data, src, pos);
        if len >= MIN_COPY {
            return Some(Command::CopyBackward { address, len });
        }
    }
    None
}

/// Try every strategy at `pos` in priority order. Returns the first qualifying command.
pub fn find_match<'a>(data: &[u8], pos: usize) -> Option<Command<'a>> {
    let len = byte_run(data, pos);
    if len >= MIN_FILL {
        return Some(Command::Fill {
            value: data[pos],
            len,
        });
    }

    let len = word_run(data, pos);
    if len >= MIN_WORD_REPEATS {
        return Some(Command::WordFill {
            pair: [data[pos], data[pos + 1]],
            len,
        });
    }

    let len = sequence_run(data, pos);
    if len >= MIN_SEQUENCE {
        return Some(Command::Sequence {
            start: data[pos],
            len,
        });
    }

    find_back_reference(data, pos)
}
