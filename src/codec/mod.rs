//! External data-series codecs.
//!
//! Each data series in a container block is read and written through one
//! codec. A codec wraps the series' input and output byte streams and moves
//! one value per call.
//!
//! | Codec | Value | Encoding |
//! |-------|-------|----------|
//! | [`ByteArrayStopCodec`] | `Vec<u8>` | Raw bytes followed by a stop byte |
//! | [`Rans0Codec`] | `Vec<u8>` | One adaptive order-0 rANS block |

mod rans;
mod stop;

pub use rans::Rans0Codec;
pub use stop::ByteArrayStopCodec;

use crate::error::Result;

/// Read/write one value at a time over a pair of byte streams.
pub trait ExternalCodec {
    type Value;

    /// Read the next value from the input stream.
    fn read(&mut self) -> Result<Self::Value>;

    /// Append `value` to the output stream.
    fn write(&mut self, value: &Self::Value) -> Result<()>;
}
