//! Adaptive order-0 frequency model.
//!
//! Holds one frequency and one cumulative offset per byte value. Frequencies
//! grow by a fixed step as symbols are coded and are halved whenever the next
//! increment would overflow the budget. Encoder and decoder drive identical
//! copies of this model, so every rounding rule here is part of the format.

use super::params::ModelParams;
use super::{ModelError, ALPHABET_SIZE};

/// What an increment did to the cumulative layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Update {
    /// Only the coded symbol's run grew; every later run shifted by `delta`.
    Grew,
    /// The model was rescaled before the increment; the whole layout changed.
    Rescaled,
}

/// Order-0 frequency table with cumulative offsets.
#[derive(Debug, Clone)]
pub struct FrequencyModel {
    freq: [u32; ALPHABET_SIZE],
    /// `cum[s]` = sum of `freq[..s]`; `cum[256]` is the live total.
    cum: [u32; ALPHABET_SIZE + 1],
    params: ModelParams,
    rescales: u64,
}

impl FrequencyModel {
    /// Create a model and load the starting distribution.
    pub fn new(params: &ModelParams) -> Result<Self, ModelError> {
        let mut model = Self::unloaded(params);
        model.initialize()?;
        Ok(model)
    }

    /// Create a model with every frequency at zero. Call
    /// [`initialize`](Self::initialize) before coding with it.
    pub fn unloaded(params: &ModelParams) -> Self {
        Self {
            freq: [0; ALPHABET_SIZE],
            cum: [0; ALPHABET_SIZE + 1],
            params: params.clone(),
            rescales: 0,
        }
    }

    /// Reload the starting distribution and recompute cumulative offsets.
    pub fn initialize(&mut self) -> Result<(), ModelError> {
        let budget = self
            .params
            .total()
            .ok_or(ModelError::InvalidTotalBits(self.params.total_bits))?;

        self.params.initial.fill(budget, &mut self.freq);
        self.rescales = 0;

        let total: u64 = self.freq.iter().map(|&f| u64::from(f)).sum();
        if total > u64::from(budget) {
            return Err(ModelError::BudgetExceeded {
                total: total.min(u64::from(u32::MAX)) as u32,
                budget,
            });
        }

        let live = self.live_symbols();
        if live == 0 {
            return Err(ModelError::EmptyModel);
        }

        // One rescale must always free enough room for one increment:
        // after halving, total <= (budget + live) / 2.
        let step = self.params.step;
        if u64::from(live) + 2 * u64::from(step) > u64::from(budget) {
            return Err(ModelError::InvalidStep { step, live, budget });
        }

        self.recompute()
    }

    /// Add `delta` to `symbol`, rescaling first if the budget would overflow.
    pub fn increment(&mut self, symbol: u8, delta: u32) -> Result<Update, ModelError> {
        let budget = self.budget();
        let mut update = Update::Grew;

        if u64::from(self.total()) + u64::from(delta) > u64::from(budget) {
            self.rescale()?;
            update = Update::Rescaled;
            let total = self.total();
            if u64::from(total) + u64::from(delta) > u64::from(budget) {
                return Err(ModelError::BudgetExceeded {
                    total: total.saturating_add(delta),
                    budget,
                });
            }
        }

        let s = symbol as usize;
        self.freq[s] += delta;
        for c in &mut self.cum[s + 1..] {
            *c += delta;
        }
        Ok(update)
    }

    /// Apply the configured adaptive step to `symbol`.
    #[inline]
    pub fn update(&mut self, symbol: u8) -> Result<Update, ModelError> {
        self.increment(symbol, self.params.step)
    }

    /// Halve every frequency, rounding up so live symbols stay live.
    pub fn rescale(&mut self) -> Result<(), ModelError> {
        let before = self.total();
        for f in &mut self.freq {
            *f = (*f + 1) >> 1;
        }
        self.recompute()?;
        self.rescales += 1;
        log::trace!(
            "rescaled order-0 model: total {} -> {} (rescale #{})",
            before,
            self.total(),
            self.rescales
        );
        Ok(())
    }

    /// `(cumulative, frequency)` of `symbol`.
    #[inline]
    pub fn symbol_range(&self, symbol: u8) -> (u32, u32) {
        let s = symbol as usize;
        (self.cum[s], self.freq[s])
    }

    #[inline]
    pub fn frequency(&self, symbol: u8) -> u32 {
        self.freq[symbol as usize]
    }

    /// Cumulative offset for `index` in `0..=256`.
    #[inline]
    pub fn cumulative(&self, index: usize) -> u32 {
        self.cum[index]
    }

    /// Live total (`cumulative(256)`), never above [`budget`](Self::budget).
    #[inline]
    pub fn total(&self) -> u32 {
        self.cum[ALPHABET_SIZE]
    }

    /// `1 << total_bits`, or 0 when `total_bits` is out of range. Such a
    /// model never loads.
    #[inline]
    pub fn budget(&self) -> u32 {
        self.params.total().unwrap_or(0)
    }

    #[inline]
    pub fn total_bits(&self) -> u32 {
        self.params.total_bits
    }

    #[inline]
    pub fn step(&self) -> u32 {
        self.params.step
    }

    pub fn params(&self) -> &ModelParams {
        &self.params
    }

    /// Number of rescales since the last [`initialize`](Self::initialize).
    pub fn rescale_count(&self) -> u64 {
        self.rescales
    }

    /// Number of symbols with non-zero frequency.
    pub fn live_symbols(&self) -> u32 {
        self.freq.iter().filter(|&&f| f > 0).count() as u32
    }

    /// The only live symbol, if exactly one symbol has non-zero frequency.
    pub fn sole_symbol(&self) -> Option<u8> {
        let mut live = self.freq.iter().enumerate().filter(|(_, &f)| f > 0);
        match (live.next(), live.next()) {
            (Some((s, _)), None) => Some(s as u8),
            _ => None,
        }
    }

    /// Frequencies of all 256 symbols.
    pub fn frequencies(&self) -> &[u32; ALPHABET_SIZE] {
        &self.freq
    }

    /// Verify the prefix-sum layout and the budget.
    pub fn check_invariants(&self) -> Result<(), ModelError> {
        if self.cum[0] != 0 {
            return Err(ModelError::NonMonotonic(0));
        }
        for s in 0..ALPHABET_SIZE {
            if self.cum[s + 1].checked_sub(self.cum[s]) != Some(self.freq[s]) {
                return Err(ModelError::NonMonotonic(s));
            }
        }
        if self.total() > self.budget() {
            return Err(ModelError::BudgetExceeded {
                total: self.total(),
                budget: self.budget(),
            });
        }
        Ok(())
    }

    fn recompute(&mut self) -> Result<(), ModelError> {
        let mut acc = 0u32;
        self.cum[0] = 0;
        for s in 0..ALPHABET_SIZE {
            acc = acc
                .checked_add(self.freq[s])
                .ok_or(ModelError::NonMonotonic(s))?;
            self.cum[s + 1] = acc;
        }
        Ok(())
    }
}
