//! Per-block model parameters.
//!
//! These are the values a block header carries for an adaptive order-0
//! stream. Parsing the header itself is the container's job; the codec only
//! sees the already-decoded parameters.

use super::{ALPHABET_SIZE, MAX_TOTAL_BITS};

/// Default precision: total frequency budget of 4096.
pub const DEFAULT_TOTAL_BITS: u32 = 12;

/// Default adaptive increment.
pub const DEFAULT_STEP: u32 = 16;

/// Starting frequency distribution for a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitialDistribution {
    /// Every byte value gets `total / 256` slots.
    Uniform,
    /// Explicit per-symbol frequencies. Zero entries can never be coded.
    Explicit(Box<[u32; ALPHABET_SIZE]>),
}

impl InitialDistribution {
    /// Build an explicit distribution from `(symbol, frequency)` pairs.
    /// Symbols not listed get zero.
    pub fn from_pairs(pairs: &[(u8, u32)]) -> Self {
        let mut table = Box::new([0u32; ALPHABET_SIZE]);
        for &(symbol, freq) in pairs {
            table[symbol as usize] = freq;
        }
        Self::Explicit(table)
    }

    /// Only `symbol` is live, holding the whole budget of `total_bits`.
    ///
    /// An out-of-range `total_bits` yields a table that fails to load with
    /// `InvalidTotalBits`.
    pub fn single(symbol: u8, total_bits: u32) -> Self {
        Self::from_pairs(&[(symbol, 1u32.checked_shl(total_bits).unwrap_or(0))])
    }

    /// Write the starting frequencies for a budget of `total` into `freq`.
    pub(crate) fn fill(&self, total: u32, freq: &mut [u32; ALPHABET_SIZE]) {
        match self {
            Self::Uniform => freq.fill(total / ALPHABET_SIZE as u32),
            Self::Explicit(table) => freq.copy_from_slice(&table[..]),
        }
    }
}

/// Adaptive model configuration for one block.
///
/// # Example
///
/// ```rust
/// use cram_entropy::rans::{InitialDistribution, ModelParams};
///
/// let params = ModelParams::default()
///     .with_total_bits(10)
///     .with_step(8)
///     .with_initial(InitialDistribution::from_pairs(&[(b'A', 256), (b'C', 256)]));
/// assert_eq!(params.total(), Some(1024));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelParams {
    /// Frequency budget is `1 << total_bits`.
    pub total_bits: u32,
    /// Added to a symbol's frequency each time it is coded.
    pub step: u32,
    /// Distribution the model starts from on every reset.
    pub initial: InitialDistribution,
}

impl ModelParams {
    pub fn with_total_bits(mut self, total_bits: u32) -> Self {
        self.total_bits = total_bits;
        self
    }

    pub fn with_step(mut self, step: u32) -> Self {
        self.step = step;
        self
    }

    pub fn with_initial(mut self, initial: InitialDistribution) -> Self {
        self.initial = initial;
        self
    }

    /// Total frequency budget, or `None` if `total_bits` is outside
    /// `1..=16`.
    #[inline]
    pub fn total(&self) -> Option<u32> {
        (1..=MAX_TOTAL_BITS)
            .contains(&self.total_bits)
            .then(|| 1 << self.total_bits)
    }
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            total_bits: DEFAULT_TOTAL_BITS,
            step: DEFAULT_STEP,
            initial: InitialDistribution::Uniform,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = ModelParams::default();
        assert_eq!(params.total(), Some(4096));
        assert_eq!(params.step, 16);
        assert_eq!(params.initial, InitialDistribution::Uniform);
    }

    #[test]
    fn test_from_pairs() {
        let InitialDistribution::Explicit(table) =
            InitialDistribution::from_pairs(&[(0, 2), (1, 2), (200, 7)])
        else {
            panic!("expected explicit table");
        };
        assert_eq!(table[0], 2);
        assert_eq!(table[1], 2);
        assert_eq!(table[200], 7);
        assert_eq!(table.iter().sum::<u32>(), 11);
    }

    #[test]
    fn test_uniform_fill() {
        let mut freq = [0u32; ALPHABET_SIZE];
        InitialDistribution::Uniform.fill(4096, &mut freq);
        assert!(freq.iter().all(|&f| f == 16));
    }

    #[test]
    fn test_total_out_of_range() {
        assert_eq!(ModelParams::default().with_total_bits(1).total(), Some(2));
        assert_eq!(ModelParams::default().with_total_bits(16).total(), Some(65536));
        assert_eq!(ModelParams::default().with_total_bits(0).total(), None);
        assert_eq!(ModelParams::default().with_total_bits(17).total(), None);
        assert_eq!(ModelParams::default().with_total_bits(32).total(), None);
        assert_eq!(ModelParams::default().with_total_bits(u32::MAX).total(), None);
    }

    #[test]
    fn test_single_out_of_range() {
        let InitialDistribution::Explicit(table) = InitialDistribution::single(b'N', 40) else {
            panic!("expected explicit table");
        };
        assert!(table.iter().all(|&f| f == 0));
    }
}
