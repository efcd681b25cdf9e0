//! Adaptive order-0 rANS entropy coding.
//!
//! This module implements the byte-alphabet range asymmetric numeral system
//! used for CRAM data series, with an order-0 frequency model that adapts as
//! symbols are coded.
//!
//! ## Components
//!
//! | Type | Role |
//! |------|------|
//! | [`FrequencyModel`] | Per-symbol frequency and cumulative offset, adaptive increment, rescale |
//! | [`ReverseLookup`] | Dense slot → symbol table, kept in lockstep with the model |
//! | [`ByteCursor`] | Compressed byte source, state renormalization |
//! | [`Rans0Decoder`] | Per-block decode loop |
//! | [`Rans0Encoder`] | Reference encoder producing streams the decoder accepts |
//!
//! ## Stream Layout
//!
//! ```text
//! ┌────────────────────┬──────────────────────────────────────┐
//! │ state: u32 LE (4)  │ renormalization bytes, decode order  │
//! └────────────────────┴──────────────────────────────────────┘
//! ```
//!
//! The state word stays in `[RANS_LOW, RANS_LOW << 8)` between symbols, and
//! decoding a well-formed block leaves it at exactly [`RANS_LOW`].
//!
//! ## Example
//!
//! ```rust
//! use cram_entropy::rans::{ModelParams, Rans0Decoder, Rans0Encoder};
//!
//! let params = ModelParams::default();
//! let data = b"ACGTACGTNNNNACGT";
//!
//! let compressed = Rans0Encoder::new(params.clone()).encode_block(data).unwrap();
//!
//! let mut decoder = Rans0Decoder::new(params);
//! decoder.reset().unwrap();
//! let decoded = decoder.decode_block(&compressed, data.len()).unwrap();
//! assert_eq!(decoded, data);
//! ```

mod cursor;
mod decoder;
mod encoder;
mod model;
#[cfg(feature = "parallel")]
mod parallel;
mod params;
mod reverse;


pub use cursor::{ByteCursor, Exhausted};
pub use decoder::{Phase, Rans0Decoder};
pub use encoder::Rans0Encoder;
pub use model::{FrequencyModel, Update};
#[cfg(feature = "parallel")]
pub use parallel::{decode_blocks, BlockRef};
pub use params::{InitialDistribution, ModelParams};
pub use reverse::ReverseLookup;

use thiserror::Error;

/// Number of symbols in the byte alphabet.
pub const ALPHABET_SIZE: usize = 256;

/// Lower bound of the normalized decoder state.
pub const RANS_LOW: u32 = 1 << 23;

/// Largest supported `total_bits`; `RANS_LOW` must stay a multiple of the total.
pub const MAX_TOTAL_BITS: u32 = 16;

/// Frequency model errors.
///
/// Any of these means the block cannot be decoded: either the stream is
/// malformed or the model parameters disagree with the encoder's.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("total_bits {0} out of range 1..=16")]
    InvalidTotalBits(u32),

    #[error("frequency total {total} exceeds budget {budget}")]
    BudgetExceeded { total: u32, budget: u32 },

    #[error("increment step {step} leaves no room after rescale ({live} live symbols, budget {budget})")]
    InvalidStep { step: u32, live: u32, budget: u32 },

    #[error("no symbol has a non-zero frequency")]
    EmptyModel,

    #[error("symbol {0} has zero frequency")]
    ZeroFrequency(u8),

    #[error("slot {slot} is not owned by any symbol (live total {total})")]
    UnownedSlot { slot: u32, total: u32 },

    #[error("cumulative table is not monotonic at symbol {0}")]
    NonMonotonic(usize),
}

/// rANS block coding errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RansError {
    #[error(transparent)]
    Model(#[from] ModelError),

    /// The source ran out before `expected` symbols were produced.
    #[error("compressed stream truncated after {decoded} of {expected} symbols")]
    TruncatedStream { decoded: usize, expected: usize },

    /// All symbols were produced but the state did not return to [`RANS_LOW`].
    #[error("final decoder state {state:#010x} does not match terminal state 0x00800000")]
    TerminalState { state: u32 },
}

/// Coarse classification of a [`RansError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Model parameters or frequency totals are inconsistent.
    Model,
    /// The stream ended early or did not finish in the terminal state.
    TruncatedStream,
}

impl RansError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Model(_) => ErrorKind::Model,
            Self::TruncatedStream { .. } | Self::TerminalState { .. } => ErrorKind::TruncatedStream,
        }
    }
}

pub type Result<T> = std::result::Result<T, RansError>;
