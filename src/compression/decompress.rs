use log::{debug, error, trace};

use super::output::OutputBuffer;
use crate::error::{Error, Result};
use crate::token::command::TERMINATOR;
use crate::token::header::{CommandKind, Header};
use crate::token::reader::TokenReader;

/// Largest decoded block, and the default output capacity.
pub const MAX_OUTPUT: usize = 65536;

/// A decoded block together with the size of the stream it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedBlock {
    pub data: Vec<u8>,
    /// Stream bytes read, including the terminator.
    pub consumed: usize,
}

/// Decode the token stream starting at `offset` within `source`, into at most 64k bytes.
pub fn decompress(source: &[u8], offset: usize) -> Result<Vec<u8>> {
    decompress_with_capacity(source, offset, MAX_OUTPUT)
}

/// As `decompress`, with a smaller output capacity.
pub fn decompress_with_capacity(source: &[u8], offset: usize, capacity: usize) -> Result<Vec<u8>> {
    decompress_block(source, offset, capacity).map(|block| block.data)
}

/// Decode the token stream starting at `offset`. Any write past `capacity`, bad
/// back-reference or reserved command aborts the whole decode.
pub fn decompress_block(source: &[u8], offset: usize, capacity: usize) -> Result<DecodedBlock> {
    if capacity > MAX_OUTPUT {
        return Err(Error::CapacityTooLarge {
            capacity,
            max: MAX_OUTPUT,
        });
    }
    if offset >= source.len() {
        return Err(Error::OffsetOutOfRange {
            offset,
            size: source.len(),
        });
    }

    let mut tr = TokenReader::new(source, offset);
    let mut out = OutputBuffer::new(capacity);

    let result = run(&mut tr, &mut out);
    if let Err(e) = &result {
        error!(
            "Decoding the block at {:#x} failed at stream {} with {} bytes written: {}",
            offset,
            tr.loc(),
            out.pos(),
            e
        );
    }
    result?;

    let consumed = tr.position() - offset;
    debug!(
        "Decoded {} bytes from {} stream bytes at {:#x}.",
        out.pos(),
        consumed,
        offset
    );
    Ok(DecodedBlock {
        data: out.into_vec(),
        consumed,
    })
}

/// The decoding loop. Returns once the terminator has been consumed.
fn run(tr: &mut TokenReader<'_>, out: &mut OutputBuffer) -> Result<()> {
    loop {
        if tr.peek()? == TERMINATOR {
            tr.byte()?;
            return Ok(());
        }

        let Header { kind, len } = tr.header()?;
        trace!("{} {:?} x{} -> {:#06x}", tr.loc(), kind, len, out.pos());

        // Check the length before touching the payload
        out.ensure_room(len)?;

        let address = if kind.is_back_reference() {
            let address = tr.word_be()? as usize;
            if address >= out.capacity() {
                return Err(Error::AddressOutOfRange {
                    address,
                    len,
                    capacity: out.capacity(),
                });
            }
            address
        } else {
            0
        };

        match kind {
            CommandKind::Literal => out.literal(tr.bytes(len)?)?,
            CommandKind::Fill => out.fill(tr.byte()?, len)?,
            CommandKind::WordFill => {
                let pair = tr.bytes(2)?;
                out.word_fill([pair[0], pair[1]], len)?
            }
            CommandKind::Sequence => out.sequence(tr.byte()?, len)?,
            CommandKind::CopyForward => out.copy_forward(address, len)?,
            CommandKind::CopyBitReversed => out.copy_bit_reversed(address, len)?,
            CommandKind::CopyBackward => out.copy_backward(address, len)?,
        }
    }
}
