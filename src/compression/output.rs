//! OutputBuffer: the fixed-capacity destination of the decompressor.
//!
//! The buffer is allocated (zeroed) at its full capacity up front and never grows. Every
//! operation checks its bounds before writing anything, so a failed command leaves the
//! bytes already written untouched. Copies move one byte at a time: a copy whose source
//! overlaps its destination reads back bytes it wrote earlier in the same copy.

use crate::error::{Error, Result};
use crate::tools::bitrev::bit_reverse;

#[derive(Debug)]
pub struct OutputBuffer {
    buf: Vec<u8>,
    pos: usize,
}

impl OutputBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: vec![0; capacity],
            pos: 0,
        }
    }

    /// Bytes written so far.
    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Fail unless `len` more bytes fit.
    pub fn ensure_room(&self, len: usize) -> Result<()> {
        if self.pos + len > self.buf.len() {
            return Err(Error::OutputOverflow {
                pos: self.pos,
                len,
                capacity: self.buf.len(),
            });
        }
        Ok(())
    }

    /// Fail unless `len` bytes starting at `address` lie inside the buffer.
    fn ensure_source(&self, address: usize, len: usize) -> Result<()> {
        if address + len > self.buf.len() {
            return Err(Error::AddressOutOfRange {
                address,
                len,
                capacity: self.buf.len(),
            });
        }
        Ok(())
    }

    pub fn literal(&mut self, bytes: &[u8]) -> Result<()> {
        self.ensure_room(bytes.len())?;
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
        Ok(())
    }

    pub fn fill(&mut self, value: u8, len: usize) -> Result<()> {
        self.ensure_room(len)?;
        self.buf[self.pos..self.pos + len].fill(value);
        self.pos += len;
        Ok(())
    }

    /// Write `pair` `len` times.
    pub fn word_fill(&mut self, pair: [u8; 2], len: usize) -> Result<()> {
        self.ensure_room(2 * len)?;
        for chunk in self.buf[self.pos..self.pos + 2 * len].chunks_exact_mut(2) {
            chunk.copy_from_slice(&pair);
        }
        self.pos += 2 * len;
        Ok(())
    }

    /// Write `start`, `start + 1`, ... wrapping at 256.
    pub fn sequence(&mut self, start: u8, len: usize) -> Result<()> {
        self.ensure_room(len)?;
        let mut value = start;
        for b in &mut self.buf[self.pos..self.pos + len] {
            *b = value;
            value = value.wrapping_add(1);
        }
        self.pos += len;
        Ok(())
    }

    /// Copy `len` bytes from `address` onward.
    pub fn copy_forward(&mut self, address: usize, len: usize) -> Result<()> {
        self.copy_mapped(address, len, |b| b)
    }

    /// Copy `len` bytes from `address` onward, bit-reversing each one.
    pub fn copy_bit_reversed(&mut self, address: usize, len: usize) -> Result<()> {
        self.copy_mapped(address, len, bit_reverse)
    }

    fn copy_mapped(&mut self, address: usize, len: usize, map: impl Fn(u8) -> u8) -> Result<()> {
        self.ensure_room(len)?;
        self.ensure_source(address, len)?;
        for i in 0..len {
            self.buf[self.pos + i] = map(self.buf[address + i]);
        }
        self.pos += len;
        Ok(())
    }

    /// Copy `len` bytes reading backward from `address` down to `address - len + 1`.
    pub fn copy_backward(&mut self, address: usize, len: usize) -> Result<()> {
        self.ensure_room(len)?;
        self.ensure_source(address, 1)?;
        if address + 1 < len {
            return Err(Error::BackwardUnderflow { address, len });
        }
        for i in 0..len {
            self.buf[self.pos + i] = self.buf[address - i];
        }
        self.pos += len;
        Ok(())
    }

    /// The bytes written, as an owned vec.
    pub fn into_vec(mut self) -> Vec<u8> {
        self.buf.truncate(self.pos);
        self.buf
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn literal_overflow_test() {
        let mut out = OutputBuffer::new(3);
        out.literal(&[1]).unwrap();
        assert!(matches!(
            out.literal(&[2, 3, 4]),
            Err(Error::OutputOverflow {
                pos: 1,
                len: 3,
                capacity: 3
            })
        ));
        // Nothing was written by the failed call
        assert_eq!(out.pos(), 1);
        out.literal(&[2, 3]).unwrap();
        assert_eq!(out.into_vec(), [1, 2, 3]);
    }

    #[test]
    fn fills_test() {
        let mut out = OutputBuffer::new(16);
        out.fill(7, 3).unwrap();
        out.word_fill([1, 2], 2).unwrap();
        out.sequence(0xFE, 4).unwrap();
        assert_eq!(out.into_vec(), [7, 7, 7, 1, 2, 1, 2, 0xFE, 0xFF, 0x00, 0x01]);
    }

    #[test]
    fn word_fill_overflow_test() {
        let mut out = OutputBuffer::new(5);
        assert!(out.word_fill([1, 2], 3).is_err());
        out.word_fill([1, 2], 2).unwrap();
        assert_eq!(out.pos(), 4);
    }

    #[test]
    fn overlapping_copy_test() {
        let mut out = OutputBuffer::new(16);
        out.literal(&[0xA, 0xB, 0xC]).unwrap();
        out.copy_forward(0, 5).unwrap();
        assert_eq!(out.into_vec(), [0xA, 0xB, 0xC, 0xA, 0xB, 0xC, 0xA, 0xB]);
    }

    #[test]
    fn run_from_one_byte_test() {
        let mut out = OutputBuffer::new(16);
        out.literal(&[9]).unwrap();
        out.copy_forward(0, 6).unwrap();
        assert_eq!(out.into_vec(), [9; 7]);
    }

    #[test]
    fn bit_reversed_copy_test() {
        let mut out = OutputBuffer::new(16);
        out.literal(&[0x01, 0x0F, 0xC0]).unwrap();
        out.copy_bit_reversed(0, 3).unwrap();
        // Reversing the reversed bytes gives the originals back
        out.copy_bit_reversed(3, 3).unwrap();
        assert_eq!(
            out.into_vec(),
            [0x01, 0x0F, 0xC0, 0x80, 0xF0, 0x03, 0x01, 0x0F, 0xC0]
        );
    }

    #[test]
    fn copy_source_out_of_range_test() {
        let mut out = OutputBuffer::new(8);
        out.literal(&[1, 2]).unwrap();
        assert!(matches!(
            out.copy_forward(6, 3),
            Err(Error::AddressOutOfRange {
                address: 6,
                len: 3,
                capacity: 8
            })
        ));
    }

    #[test]
    fn backward_copy_test() {
        let mut out = OutputBuffer::new(8);
        out.literal(&[1, 2, 3]).unwrap();
        out.copy_backward(2, 3).unwrap();
        assert_eq!(out.into_vec(), [1, 2, 3, 3, 2, 1]);
    }

    #[test]
    fn backward_underflow_test() {
        let mut out = OutputBuffer::new(8);
        out.literal(&[1, 2, 3]).unwrap();
        assert!(matches!(
            out.copy_backward(1, 3),
            Err(Error::BackwardUnderflow { address: 1, len: 3 })
        ));
        assert_eq!(out.pos(), 3);
    }
}
