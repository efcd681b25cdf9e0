//! Error types for the external codecs.
//!
//! [`CodecError`] is what [`ExternalCodec`](crate::codec::ExternalCodec)
//! implementations return. Entropy decoding failures keep their
//! [`RansError`] detail so callers can still tell a malformed model from a
//! truncated stream.
//!
//! | Category | Errors | Description |
//! |----------|--------|-------------|
//! | Entropy | [`Rans`] | Model inconsistency or truncated/corrupt rANS block |
//! | Framing | [`StopByteInValue`] | Value cannot be written with the configured stop byte |
//! | I/O | [`Io`] | Underlying reader or writer failed |
//!
//! [`Rans`]: CodecError::Rans
//! [`StopByteInValue`]: CodecError::StopByteInValue
//! [`Io`]: CodecError::Io

use std::io;

use thiserror::Error;

use crate::rans::{ErrorKind, RansError};

/// Error type for codec reads and writes.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The entropy decoder or encoder rejected the block.
    #[error("rANS: {0}")]
    Rans(#[from] RansError),

    /// A value passed to a stop-byte codec contains the stop byte itself.
    #[error("value contains stop byte {stop:#04x} at offset {offset}")]
    StopByteInValue { stop: u8, offset: usize },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl CodecError {
    /// The entropy error kind, if this is an entropy coding failure.
    pub fn rans_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Rans(e) => Some(e.kind()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;
