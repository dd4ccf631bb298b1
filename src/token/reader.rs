//! TokenReader: a byte cursor over a token stream.
//!
//! The stream usually lives inside a larger buffer (a ROM image), so the reader starts at an
//! arbitrary offset and never assumes it owns the rest of the buffer. Every read is bounds
//! checked and running off the end is reported as `Error::UnexpectedEof`.

use super::command::{Command, TERMINATOR};
use super::header::{CommandKind, Header};
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct TokenReader<'a> {
    data: &'a [u8],
    cursor: usize,
}

impl<'a> TokenReader<'a> {
    /// Creates a reader positioned at `offset` within `data`.
    pub fn new(data: &'a [u8], offset: usize) -> Self {
        Self {
            data,
            cursor: offset,
        }
    }

    /// Current position within the underlying buffer.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Return the next byte without consuming it.
    pub fn peek(&self) -> Result<u8> {
        self.data
            .get(self.cursor)
            .copied()
            .ok_or(Error::UnexpectedEof {
                offset: self.cursor,
            })
    }

    pub fn byte(&mut self) -> Result<u8> {
        let byte = self.peek()?;
        self.cursor += 1;
        Ok(byte)
    }

    /// Returns the next `n` bytes as a slice of the underlying buffer.
    pub fn bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self.cursor + n;
        if end > self.data.len() {
            return Err(Error::UnexpectedEof {
                offset: self.data.len(),
            });
        }
        let slice = &self.data[self.cursor..end];
        self.cursor = end;
        Ok(slice)
    }

    /// Big-endian 16 bit value (back-reference addresses).
    pub fn word_be(&mut self) -> Result<u16> {
        let b = self.bytes(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    pub fn header(&mut self) -> Result<Header> {
        let (header, used) = Header::decode(self.data, self.cursor)?;
        self.cursor += used;
        Ok(header)
    }

    /// Read one whole command, header and payload. Returns `Command::Terminator` when the
    /// next byte is the terminator.
    pub fn command(&mut self) -> Result<Command<'a>> {
        if self.peek()? == TERMINATOR {
            self.cursor += 1;
            return Ok(Command::Terminator);
        }
        let Header { kind, len } = self.header()?;
        let cmd = match kind {
            CommandKind::Literal => Command::Literal(self.bytes(len)?),
            CommandKind::Fill => Command::Fill {
                value: self.byte()?,
                len,
            },
            CommandKind::WordFill => Command::WordFill {
                pair: [self.byte()?, self.byte()?],
                len,
            },
            CommandKind::Sequence => Command::Sequence {
                start: self.byte()?,
                len,
            },
            CommandKind::CopyForward => Command::CopyForward {
                address: self.word_be()?,
                len,
            },
            CommandKind::CopyBitReversed => Command::CopyBitReversed {
                address: self.word_be()?,
                len,
            },
            CommandKind::CopyBackward => Command::CopyBackward {
                address: self.word_be()?,
                len,
            },
        };
        Ok(cmd)
    }

    /// Iterate over the remaining commands, ending after the terminator (which is yielded)
    /// or the first error.
    pub fn commands(self) -> Tokens<'a> {
        Tokens {
            reader: self,
            done: false,
        }
    }

    /// Debugging function. Report current position in the buffer.
    pub fn loc(&self) -> String {
        format!("[{:#06x}]", self.cursor)
    }
}

/// Iterator over the commands of a stream, see [`TokenReader::commands`].
pub struct Tokens<'a> {
    reader: TokenReader<'a>,
    done: bool,
}

impl<'a> Tokens<'a> {
    /// Position of the next unread byte.
    pub fn position(&self) -> usize {
        self.reader.position()
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Result<Command<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.reader.command();
        if matches!(result, Ok(Command::Terminator) | Err(_)) {
            self.done = true;
        }
        Some(result)
    }
}
