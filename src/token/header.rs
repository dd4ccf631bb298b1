//! Header: the 1 or 2 byte encoding of a command's (type, length) pair.
//!
//! Short form, lengths 1-32:    `TTTLLLLL`
//! Long form, lengths 1-1024:   `111TTTLL LLLLLLLL`
//!
//! The long form is flagged by the top three bits being set, which the short form can never
//! produce because real command types only go up to 6.

use crate::error::{Error, Result};

/// Longest run a single command can describe.
pub const MAX_LEN: usize = 1024;
/// Longest run that fits in a one byte header.
pub const SHORT_MAX_LEN: usize = 32;

const LONG_FLAG: u8 = 0xE0;

/// The seven command types. Type 7 is reserved: the byte `0xFF` that ends every stream
/// would decode as a long header of type 7.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum CommandKind {
    Literal = 0,
    Fill = 1,
    WordFill = 2,
    Sequence = 3,
    CopyForward = 4,
    CopyBitReversed = 5,
    CopyBackward = 6,
}

impl CommandKind {
    /// Back-references carry a two byte address into the output after the header.
    pub fn is_back_reference(self) -> bool {
        matches!(
            self,
            CommandKind::CopyForward | CommandKind::CopyBitReversed | CommandKind::CopyBackward
        )
    }
}

impl TryFrom<u8> for CommandKind {
    type Error = u8;

    fn try_from(value: u8) -> std::result::Result<Self, u8> {
        match value {
            0 => Ok(CommandKind::Literal),
            1 => Ok(CommandKind::Fill),
            2 => Ok(CommandKind::WordFill),
            3 => Ok(CommandKind::Sequence),
            4 => Ok(CommandKind::CopyForward),
            5 => Ok(CommandKind::CopyBitReversed),
            6 => Ok(CommandKind::CopyBackward),
            other => Err(other),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    pub kind: CommandKind,
    pub len: usize,
}

impl Header {
    /// Creates a header, checking that the length is representable.
    pub fn new(kind: CommandKind, len: usize) -> Result<Self> {
        if !(1..=MAX_LEN).contains(&len) {
            return Err(Error::InvalidLength(len));
        }
        Ok(Self { kind, len })
    }

    /// Number of bytes `encode` will write.
    pub fn encoded_len(&self) -> usize {
        if self.len > SHORT_MAX_LEN {
            2
        } else {
            1
        }
    }

    /// Append the header bytes to `out`.
    pub fn encode(&self, out: &mut Vec<u8>) {
        let kind = self.kind as u8;
        let n = self.len - 1;
        if self.len > SHORT_MAX_LEN {
            out.push(LONG_FLAG + 4 * kind + (n >> 8) as u8);
            out.push((n & 0xFF) as u8);
        } else {
            out.push(kind * 32 + n as u8);
        }
    }

    /// Decode the header starting at `cursor`. Returns the header and the number of bytes
    /// it used. Callers must check for the terminator first: `0xFF` decodes as type 7 and
    /// is rejected here.
    pub fn decode(stream: &[u8], cursor: usize) -> Result<(Header, usize)> {
        let first = *stream
            .get(cursor)
            .ok_or(Error::UnexpectedEof { offset: cursor })?;

        if first & LONG_FLAG != LONG_FLAG {
            let header = Header {
                // Top bits are not 111, so this is 0..=6
                kind: CommandKind::try_from(first >> 5)
                    .map_err(|_| Error::ReservedCommand { offset: cursor })?,
                len: (first & 0x1F) as usize + 1,
            };
            return Ok((header, 1));
        }

        let second = *stream
            .get(cursor + 1)
            .ok_or(Error::UnexpectedEof { offset: cursor + 1 })?;
        let kind = CommandKind::try_from((first & 0x1C) >> 2)
            .map_err(|_| Error::ReservedCommand { offset: cursor })?;
        let len = (((first & 0x03) as usize) << 8 | second as usize) + 1;
        Ok((Header { kind, len }, 2))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const KINDS: [CommandKind; 7] = [
        CommandKind::Literal,
        CommandKind::Fill,
        CommandKind::WordFill,
        CommandKind::Sequence,
        CommandKind::CopyForward,
        CommandKind::CopyBitReversed,
        CommandKind::CopyBackward,
    ];

    fn encode(kind: CommandKind, len: usize) -> Vec<u8> {
        let mut out = vec![];
        Header::new(kind, len).unwrap().encode(&mut out);
        out
    }

    #[test]
    fn short_form_test() {
        assert_eq!(encode(CommandKind::Literal, 1), [0x00]);
        assert_eq!(encode(CommandKind::Literal, 2), [0x01]);
        assert_eq!(encode(CommandKind::Fill, 4), [0x23]);
        assert_eq!(encode(CommandKind::CopyBackward, 32), [0xDF]);
    }

    #[test]
    fn long_form_test() {
        assert_eq!(encode(CommandKind::Literal, 33), [0xE0, 0x20]);
        assert_eq!(encode(CommandKind::Fill, 300), [0xE5, 0x2B]);
        assert_eq!(encode(CommandKind::CopyBackward, 1024), [0xFB, 0xFF]);
    }

    #[test]
    fn never_emits_terminator_test() {
        for kind in KINDS {
            for len in 1..=MAX_LEN {
                assert_ne!(encode(kind, len)[0], 0xFF);
            }
        }
    }

    #[test]
    fn round_trip_all_lengths_test() {
        for kind in KINDS {
            for len in 1..=MAX_LEN {
                let bytes = encode(kind, len);
                let expected_size = if len <= SHORT_MAX_LEN { 1 } else { 2 };
                assert_eq!(bytes.len(), expected_size);
                let (header, used) = Header::decode(&bytes, 0).unwrap();
                assert_eq!(header, Header { kind, len });
                assert_eq!(used, expected_size);
            }
        }
    }

    #[test]
    fn invalid_length_test() {
        assert!(matches!(
            Header::new(CommandKind::Literal, 0),
            Err(Error::InvalidLength(0))
        ));
        assert!(matches!(
            Header::new(CommandKind::Fill, 1025),
            Err(Error::InvalidLength(1025))
        ));
    }

    #[test]
    fn reserved_type_test() {
        assert!(matches!(
            Header::decode(&[0xFF, 0x00], 0),
            Err(Error::ReservedCommand { offset: 0 })
        ));
        // 111 111 00: long form with type 7
        assert!(matches!(
            Header::decode(&[0x00, 0xFC, 0x10], 1),
            Err(Error::ReservedCommand { offset: 1 })
        ));
    }

    #[test]
    fn truncated_long_header_test() {
        assert!(matches!(
            Header::decode(&[0xE4], 0),
            Err(Error::UnexpectedEof { offset: 1 })
        ));
        assert!(matches!(
            Header::decode(&[], 0),
            Err(Error::UnexpectedEof { offset: 0 })
        ));
    }
}
