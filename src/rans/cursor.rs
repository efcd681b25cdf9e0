//! Byte cursor over a compressed rANS block.
//!
//! Reads forward, in the order the encoder's flipped output buffer holds the
//! bytes.

use super::RANS_LOW;

/// Signals that the source ran dry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exhausted;

/// Forward reader over an in-memory compressed block.
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Read the next byte.
    #[inline(always)]
    pub fn pull_byte(&mut self) -> Result<u8, Exhausted> {
        let byte = *self.data.get(self.pos).ok_or(Exhausted)?;
        self.pos += 1;
        Ok(byte)
    }

    /// Read the little-endian initial state word.
    pub fn read_state(&mut self) -> Result<u32, Exhausted> {
        let bytes = self.data.get(self.pos..self.pos + 4).ok_or(Exhausted)?;
        self.pos += 4;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Shift bytes into `state` until it is back above [`RANS_LOW`].
    #[inline(always)]
    pub fn renormalize(&mut self, mut state: u32) -> Result<u32, Exhausted> {
        while state < RANS_LOW {
            state = (state << 8) | u32::from(self.pull_byte()?);
        }
        Ok(state)
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left unread.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Rewind to the start of the block.
    pub fn rewind(&mut self) {
        self.pos = 0;
    }
}
