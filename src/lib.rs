//! Entropy and external codecs for CRAM data series.
//!
//! Alignment data is split into data series that are compressed
//! independently, block by block. This crate provides the codecs that move
//! values in and out of those blocks.
//!
//! - [`rans`]: adaptive order-0 rANS, a byte-alphabet entropy coder whose
//!   frequency model evolves while decoding
//! - [`codec`]: the one-value-at-a-time [`ExternalCodec`] abstraction, with a
//!   stop-byte delimited byte-array codec and an rANS block codec
//!
//! ## Features
//! - `parallel` - Decode independent rANS blocks on a rayon pool
//!
//! Container framing, header parsing and codec selection belong to the
//! caller. Everything here works on in-memory or already-buffered streams.

pub mod codec;
pub mod error;
pub mod rans;

pub use codec::{ByteArrayStopCodec, ExternalCodec, Rans0Codec};
pub use error::CodecError;
pub use rans::{
    FrequencyModel, InitialDistribution, ModelError, ModelParams, Rans0Decoder, Rans0Encoder,
    RansError, ReverseLookup,
};
