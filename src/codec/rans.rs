//! Adaptive order-0 rANS as an external codec.
//!
//! Each value is one compressed block. Blocks carry no length prefix: the
//! decoded length comes from the block header, so the caller supplies it
//! before each read, and the compressed length is whatever the decoder
//! consumed. Bytes after that stay pending for the next read.

use std::io::{Read, Write};

use super::ExternalCodec;
use crate::error::Result;
use crate::rans::{ModelParams, Rans0Decoder, Rans0Encoder};

/// Codec reading and writing whole adaptive order-0 rANS blocks.
pub struct Rans0Codec<R, W> {
    input: R,
    output: W,
    expected_len: usize,
    decoder: Rans0Decoder,
    encoder: Rans0Encoder,
    /// Compressed bytes drained from `input` but not yet decoded.
    pending: Vec<u8>,
    /// Start of the next block within `pending`.
    pos: usize,
}

impl<R: Read, W: Write> Rans0Codec<R, W> {
    pub fn new(input: R, output: W, params: ModelParams, expected_len: usize) -> Self {
        Self {
            input,
            output,
            expected_len,
            decoder: Rans0Decoder::new(params.clone()),
            encoder: Rans0Encoder::new(params),
            pending: Vec::new(),
            pos: 0,
        }
    }

    /// Decoded length for the next [`read`](ExternalCodec::read).
    pub fn set_expected_len(&mut self, expected_len: usize) {
        self.expected_len = expected_len;
    }

    pub fn expected_len(&self) -> usize {
        self.expected_len
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    /// Consume the codec and return its streams.
    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl<R: Read, W: Write> ExternalCodec for Rans0Codec<R, W> {
    type Value = Vec<u8>;

    /// Decode the next block of `expected_len` symbols.
    ///
    /// On error nothing is consumed.
    fn read(&mut self) -> Result<Vec<u8>> {
        if self.pos == self.pending.len() {
            self.pending.clear();
            self.pos = 0;
        }
        self.input.read_to_end(&mut self.pending)?;

        self.decoder.reset()?;
        let decoded = self
            .decoder
            .decode_block(&self.pending[self.pos..], self.expected_len)?;
        self.pos += self.decoder.bytes_consumed();
        Ok(decoded)
    }

    /// Encode `value` as one block and append it to the output stream.
    fn write(&mut self, value: &Vec<u8>) -> Result<()> {
        let block = self.encoder.encode_block(value)?;
        self.output.write_all(&block)?;
        Ok(())
    }
}
