use super::header::{CommandKind, Header};

/// Byte that ends every token stream.
pub const TERMINATOR: u8 = 0xFF;

/// One unit of the token stream. Literal payloads borrow from the buffer they were read from
/// (or, when compressing, the input being compressed).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command<'a> {
    /// Raw bytes copied straight to the output.
    Literal(&'a [u8]),
    /// One byte repeated `len` times.
    Fill { value: u8, len: usize },
    /// A byte pair repeated `len` times (2 * `len` output bytes).
    WordFill { pair: [u8; 2], len: usize },
    /// `start`, `start + 1`, ... wrapping at 256.
    Sequence { start: u8, len: usize },
    /// Copy from an absolute offset of the output already written.
    CopyForward { address: u16, len: usize },
    /// As `CopyForward`, bit-reversing every byte.
    CopyBitReversed { address: u16, len: usize },
    /// Copy reading backward from `address`, writing forward.
    CopyBackward { address: u16, len: usize },
    Terminator,
}

impl<'a> Command<'a> {
    /// The command type, or None for the terminator.
    pub fn kind(&self) -> Option<CommandKind> {
        Some(match self {
            Command::Literal(_) => CommandKind::Literal,
            Command::Fill { .. } => CommandKind::Fill,
            Command::WordFill { .. } => CommandKind::WordFill,
            Command::Sequence { .. } => CommandKind::Sequence,
            Command::CopyForward { .. } => CommandKind::CopyForward,
            Command::CopyBitReversed { .. } => CommandKind::CopyBitReversed,
            Command::CopyBackward { .. } => CommandKind::CopyBackward,
            Command::Terminator => return None,
        })
    }

    /// The length stored in the header.
    pub fn len(&self) -> usize {
        match *self {
            Command::Literal(bytes) => bytes.len(),
            Command::Fill { len, .. }
            | Command::WordFill { len, .. }
            | Command::Sequence { len, .. }
            | Command::CopyForward { len, .. }
            | Command::CopyBitReversed { len, .. }
            | Command::CopyBackward { len, .. } => len,
            Command::Terminator => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of bytes this command produces when decoded.
    pub fn decoded_len(&self) -> usize {
        match self {
            Command::WordFill { len, .. } => 2 * len,
            _ => self.len(),
        }
    }

    fn header(&self) -> Option<Header> {
        self.kind().map(|kind| Header {
            kind,
            len: self.len(),
        })
    }

    /// Number of stream bytes `encode` writes.
    pub fn encoded_len(&self) -> usize {
        let header = match self.header() {
            Some(header) => header.encoded_len(),
            None => return 1,
        };
        let payload = match self {
            Command::Literal(bytes) => bytes.len(),
            Command::Fill { .. } | Command::Sequence { .. } => 1,
            Command::WordFill { .. }
            | Command::CopyForward { .. }
            | Command::CopyBitReversed { .. }
            | Command::CopyBackward { .. } => 2,
            Command::Terminator => 0,
        };
        header + payload
    }

    /// Append the header and payload to `out`. The length must already be in 1..=1024;
    /// the compressor never builds anything else.
    pub fn encode(&self, out: &mut Vec<u8>) {
        if let Some(header) = self.header() {
            debug_assert!((1..=super::header::MAX_LEN).contains(&header.len));
            header.encode(out);
        }
        match *self {
            Command::Literal(bytes) => out.extend_from_slice(bytes),
            Command::Fill { value, .. } => out.push(value),
            Command::WordFill { pair, .. } => out.extend_from_slice(&pair),
            Command::Sequence { start, .. } => out.push(start),
            Command::CopyForward { address, .. }
            | Command::CopyBitReversed { address, .. }
            | Command::CopyBackward { address, .. } => out.extend_from_slice(&address.to_be_bytes()),
            Command::Terminator => out.push(TERMINATOR),
        }
    }
}
