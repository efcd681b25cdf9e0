//! Byte arrays delimited by a stop byte.
//!
//! The stop byte must never occur inside a value. Reading scans the
//! buffered input for it; whatever follows the stop byte stays in the
//! reader's buffer for the next call, which is all the pushback this needs.

use std::io::{BufRead, ErrorKind, Write};

use memchr::memchr;

use super::ExternalCodec;
use crate::error::{CodecError, Result};

/// Initial capacity for values read from the stream.
const VALUE_CAPACITY: usize = 152;

/// Codec for byte arrays terminated by a stop byte.
pub struct ByteArrayStopCodec<R, W> {
    input: R,
    output: W,
    stop: u8,
}

impl<R: BufRead, W: Write> ByteArrayStopCodec<R, W> {
    pub fn new(input: R, output: W, stop: u8) -> Self {
        Self {
            input,
            output,
            stop,
        }
    }

    pub fn stop_byte(&self) -> u8 {
        self.stop
    }

    /// Consume the codec and return its streams.
    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    pub fn output(&self) -> &W {
        &self.output
    }
}

impl<R: BufRead, W: Write> ExternalCodec for ByteArrayStopCodec<R, W> {
    type Value = Vec<u8>;

    /// Read up to the next stop byte. At end of input, returns whatever was
    /// gathered, which may be empty.
    fn read(&mut self) -> Result<Vec<u8>> {
        let mut value = Vec::with_capacity(VALUE_CAPACITY);
        loop {
            let buf = match self.input.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            if buf.is_empty() {
                return Ok(value);
            }
            match memchr(self.stop, buf) {
                Some(i) => {
                    value.extend_from_slice(&buf[..i]);
                    self.input.consume(i + 1);
                    return Ok(value);
                }
                None => {
                    let n = buf.len();
                    value.extend_from_slice(buf);
                    self.input.consume(n);
                }
            }
        }
    }

    fn write(&mut self, value: &Vec<u8>) -> Result<()> {
        if let Some(offset) = memchr(self.stop, value) {
            return Err(CodecError::StopByteInValue {
                stop: self.stop,
                offset,
            });
        }
        self.output.write_all(value)?;
        self.output.write_all(&[self.stop])?;
        Ok(())
    }
}
