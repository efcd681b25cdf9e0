//! Reference encoder for adaptive order-0 rANS blocks.
//!
//! rANS encodes last symbol first, but the adaptive model has to evolve
//! first symbol first. The encoder therefore runs the model forward once to
//! record each symbol's `(cumulative, frequency)` pair, then pushes those
//! ranges into the state in reverse.

use super::model::FrequencyModel;
use super::params::ModelParams;
use super::{ModelError, Result, RANS_LOW};

/// Adaptive order-0 rANS encoder.
pub struct Rans0Encoder {
    params: ModelParams,
    /// Scratch for the forward pass, reused between blocks.
    ranges: Vec<(u32, u32)>,
}

impl Rans0Encoder {
    pub fn new(params: ModelParams) -> Self {
        Self {
            params,
            ranges: Vec::new(),
        }
    }

    pub fn params(&self) -> &ModelParams {
        &self.params
    }

    /// Encode one block. Every block starts from a fresh model.
    pub fn encode_block(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        let mut model = FrequencyModel::new(&self.params)?;

        if data.is_empty() {
            return Ok(Vec::new());
        }

        if let Some(sole) = model.sole_symbol() {
            if let Some(&other) = data.iter().find(|&&b| b != sole) {
                return Err(ModelError::ZeroFrequency(other).into());
            }
            log::debug!("degenerate model: {} copies of {:#04x} need no output", data.len(), sole);
            return Ok(Vec::new());
        }

        self.ranges.clear();
        self.ranges.reserve(data.len());
        for &symbol in data {
            let range = model.symbol_range(symbol);
            if range.1 == 0 {
                return Err(ModelError::ZeroFrequency(symbol).into());
            }
            self.ranges.push(range);
            model.update(symbol)?;
        }

        let bits = model.total_bits();
        // Largest pre-encode state per unit of frequency that still lands
        // inside [RANS_LOW, RANS_LOW << 8) after the transform.
        let bound = (RANS_LOW >> bits) << 8;

        let mut state = RANS_LOW;
        let mut tail = Vec::with_capacity(data.len() / 2 + 8);
        for &(cum, freq) in self.ranges.iter().rev() {
            let x_max = bound * freq;
            while state >= x_max {
                tail.push(state as u8);
                state >>= 8;
            }
            state = ((state / freq) << bits) + (state % freq) + cum;
        }

        let mut output = Vec::with_capacity(4 + tail.len());
        output.extend_from_slice(&state.to_le_bytes());
        output.extend(tail.iter().rev());

        log::debug!(
            "encoded order-0 block: {} symbols -> {} bytes, {} rescales",
            data.len(),
            output.len(),
            model.rescale_count()
        );
        Ok(output)
    }
}

impl Default for Rans0Encoder {
    fn default() -> Self {
        Self::new(ModelParams::default())
    }
}
