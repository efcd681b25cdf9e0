//! Adaptive order-0 rANS block decoder.
//!
//! A decoder owns its frequency model and reverse lookup table, so separate
//! instances can run on separate threads without sharing anything. One
//! instance is reused across blocks through [`Rans0Decoder::reset`].

use super::cursor::ByteCursor;
use super::model::{FrequencyModel, Update};
use super::params::ModelParams;
use super::reverse::ReverseLookup;
use super::{ModelError, RansError, Result, RANS_LOW};

/// Lifecycle of a [`Rans0Decoder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Tables allocated but not loaded, or a previous decode failed.
    Uninitialized,
    /// Model and lookup table agree; a block may be decoded.
    Ready,
    /// Inside the per-symbol loop.
    Decoding,
    /// A block was decoded; the model holds its adapted end state until the
    /// next reset.
    Finished,
}

/// Order-0 adaptive rANS decoder for one block at a time.
pub struct Rans0Decoder {
    model: FrequencyModel,
    lookup: ReverseLookup,
    phase: Phase,
    /// Compressed bytes read by the last block.
    consumed: usize,
    /// Rescales performed by the last block.
    block_rescales: u64,
}

impl Rans0Decoder {
    /// Create a decoder for `params`. Call [`reset`](Self::reset) before
    /// decoding.
    pub fn new(params: ModelParams) -> Self {
        let model = FrequencyModel::unloaded(&params);
        Self {
            model,
            lookup: ReverseLookup::new(0),
            phase: Phase::Uninitialized,
            consumed: 0,
            block_rescales: 0,
        }
    }

    /// Reload the starting distribution and rebuild the lookup table.
    ///
    /// Reuses existing allocations. Calling it twice in a row is the same as
    /// calling it once.
    pub fn reset(&mut self) -> Result<()> {
        self.phase = Phase::Uninitialized;
        self.consumed = 0;
        self.block_rescales = 0;
        self.model.initialize()?;
        self.lookup.rebuild(&self.model);
        self.phase = Phase::Ready;
        Ok(())
    }

    /// Decode exactly `expected_len` bytes from `input`.
    ///
    /// Each block needs its own [`reset`](Self::reset).
    ///
    /// # Panics
    ///
    /// If the decoder is not [`Phase::Ready`].
    pub fn decode_block(&mut self, input: &[u8], expected_len: usize) -> Result<Vec<u8>> {
        let mut output = vec![0u8; expected_len];
        self.decode_into(input, &mut output)?;
        Ok(output)
    }

    /// Decode `output.len()` bytes from `input` into `output`.
    ///
    /// On success the decoder moves to [`Phase::Finished`], keeping the
    /// adapted model for inspection. On error the output contents are
    /// unspecified and the decoder drops back to [`Phase::Uninitialized`].
    ///
    /// # Panics
    ///
    /// If the decoder is not [`Phase::Ready`].
    pub fn decode_into(&mut self, input: &[u8], output: &mut [u8]) -> Result<()> {
        assert_eq!(
            self.phase,
            Phase::Ready,
            "rANS decoder used while {:?}; call reset() first",
            self.phase
        );
        self.phase = Phase::Decoding;
        self.block_rescales = 0;

        let result = self.run(input, output);
        self.phase = match result {
            Ok(()) => Phase::Finished,
            Err(_) => Phase::Uninitialized,
        };
        result
    }

    fn run(&mut self, input: &[u8], output: &mut [u8]) -> Result<()> {
        let expected = output.len();
        log::debug!(
            "decoding order-0 block: {} compressed bytes -> {} symbols",
            input.len(),
            expected
        );

        if expected == 0 {
            self.consumed = 0;
            return Ok(());
        }

        // A single live symbol leaves nothing to code; the stream is ignored.
        if let Some(symbol) = self.model.sole_symbol() {
            for out in output.iter_mut() {
                *out = symbol;
                self.advance_model(symbol)?;
            }
            self.consumed = 0;
            log::debug!("degenerate model: emitted {} copies of {:#04x}", expected, symbol);
            return Ok(());
        }

        let mut cursor = ByteCursor::new(input);
        let mut state = cursor
            .read_state()
            .map_err(|_| RansError::TruncatedStream { decoded: 0, expected })?;

        let bits = self.model.total_bits();
        let mask = self.model.budget() - 1;

        for i in 0..expected {
            let slot = state & mask;
            let total = self.model.total();
            if slot >= total {
                return Err(ModelError::UnownedSlot { slot, total }.into());
            }

            let symbol = self.lookup.lookup(slot);
            let (cum, freq) = self.model.symbol_range(symbol);
            state = freq * (state >> bits) + slot - cum;
            output[i] = symbol;

            self.advance_model(symbol)?;

            state = cursor
                .renormalize(state)
                .map_err(|_| RansError::TruncatedStream { decoded: i + 1, expected })?;
        }

        self.consumed = cursor.position();

        if state != RANS_LOW {
            return Err(RansError::TerminalState { state });
        }
        if !cursor.is_eof() {
            log::debug!(
                "{} trailing bytes after order-0 block of {} symbols",
                cursor.remaining(),
                expected
            );
        }

        log::debug!(
            "decoded order-0 block: {} symbols from {} bytes, {} rescales",
            expected,
            self.consumed,
            self.block_rescales
        );
        Ok(())
    }

    /// Apply the adaptive update for `symbol` and bring the lookup table
    /// back in line with the model.
    #[inline(always)]
    fn advance_model(&mut self, symbol: u8) -> Result<()> {
        match self.model.update(symbol)? {
            Update::Grew => self.lookup.grow(&self.model, symbol, self.model.step()),
            Update::Rescaled => {
                self.lookup.rebuild(&self.model);
                self.block_rescales += 1;
            }
        }
        Ok(())
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn model(&self) -> &FrequencyModel {
        &self.model
    }

    pub fn lookup(&self) -> &ReverseLookup {
        &self.lookup
    }

    pub fn params(&self) -> &ModelParams {
        self.model.params()
    }

    /// Compressed bytes read by the last decoded block.
    pub fn bytes_consumed(&self) -> usize {
        self.consumed
    }

    /// Rescales triggered while decoding the last block.
    pub fn block_rescales(&self) -> u64 {
        self.block_rescales
    }
}

impl Default for Rans0Decoder {
    fn default() -> Self {
        Self::new(ModelParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rans::{ErrorKind, InitialDistribution, Rans0Encoder};

    fn ready(params: ModelParams) -> Rans0Decoder {
        let mut decoder = Rans0Decoder::new(params);
        decoder.reset().unwrap();
        decoder
    }

    #[test]
    fn test_new_is_uninitialized() {
        let decoder = Rans0Decoder::default();
        assert_eq!(decoder.phase(), Phase::Uninitialized);
    }

    #[test]
    #[should_panic(expected = "call reset() first")]
    fn test_decode_before_reset_panics() {
        let mut decoder = Rans0Decoder::default();
        let _ = decoder.decode_block(&[0, 0, 128, 0], 1);
    }

    #[test]
    fn test_reset_rejects_bad_params() {
        let mut decoder = Rans0Decoder::new(ModelParams::default().with_total_bits(20));
        assert_eq!(
            decoder.reset().unwrap_err(),
            RansError::Model(ModelError::InvalidTotalBits(20))
        );
        assert_eq!(decoder.phase(), Phase::Uninitialized);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut once = ready(ModelParams::default());
        let mut twice = ready(ModelParams::default());
        twice.reset().unwrap();

        assert_eq!(once.phase(), twice.phase());
        assert_eq!(once.model().frequencies(), twice.model().frequencies());
        assert_eq!(once.model().rescale_count(), twice.model().rescale_count());
        for slot in 0..4096 {
            assert_eq!(once.lookup().lookup(slot), twice.lookup().lookup(slot));
        }

        // Both behave identically on the same block afterwards
        let data = b"GATTACA";
        let compressed = Rans0Encoder::new(ModelParams::default())
            .encode_block(data)
            .unwrap();
        assert_eq!(
            once.decode_block(&compressed, data.len()).unwrap(),
            twice.decode_block(&compressed, data.len()).unwrap()
        );
    }

    #[test]
    fn test_empty_block_reads_nothing() {
        let mut decoder = ready(ModelParams::default());
        assert!(decoder.decode_block(&[], 0).unwrap().is_empty());
        assert_eq!(decoder.phase(), Phase::Finished);
        assert_eq!(decoder.bytes_consumed(), 0);
    }

    #[test]
    fn test_truncated_header() {
        let mut decoder = ready(ModelParams::default());
        let err = decoder.decode_block(&[0x00, 0x00, 0x80], 3).unwrap_err();
        assert_eq!(err, RansError::TruncatedStream { decoded: 0, expected: 3 });
        assert_eq!(err.kind(), ErrorKind::TruncatedStream);
        assert_eq!(decoder.phase(), Phase::Uninitialized);
    }

    #[test]
    fn test_unowned_slot_is_model_error() {
        // Two live symbols own slots 0..2 of 16; slot 15 belongs to nobody
        let params = ModelParams::default()
            .with_total_bits(4)
            .with_step(1)
            .with_initial(InitialDistribution::from_pairs(&[(0, 1), (1, 1)]));
        let mut decoder = ready(params);
        let state = RANS_LOW | 15;
        let err = decoder.decode_block(&state.to_le_bytes(), 1).unwrap_err();
        assert_eq!(err, RansError::Model(ModelError::UnownedSlot { slot: 15, total: 2 }));
        assert_eq!(err.kind(), ErrorKind::Model);
    }

    #[test]
    fn test_terminal_state_mismatch() {
        // State 2^24 decodes symbol 0 to 2^16, one byte brings it back to
        // 2^24 rather than the terminal 2^23
        let mut decoder = ready(ModelParams::default());
        let err = decoder.decode_block(&[0x00, 0x00, 0x00, 0x01, 0x00], 1).unwrap_err();
        assert_eq!(err, RansError::TerminalState { state: 0x0100_0000 });
        assert_eq!(err.kind(), ErrorKind::TruncatedStream);
    }

    #[test]
    #[should_panic(expected = "call reset() first")]
    fn test_second_block_without_reset_panics() {
        let params = ModelParams::default()
            .with_total_bits(2)
            .with_step(1)
            .with_initial(InitialDistribution::from_pairs(&[(0, 2), (1, 2)]));
        let mut encoder = Rans0Encoder::new(params.clone());
        let first = encoder.encode_block(&[0, 1, 1, 0, 1, 0, 0, 1]).unwrap();
        let second = encoder.encode_block(&[1, 1, 1, 1, 0, 0, 0, 0]).unwrap();

        let mut decoder = ready(params);
        decoder.decode_block(&first, 8).unwrap();
        assert_eq!(decoder.phase(), Phase::Finished);
        let _ = decoder.decode_block(&second, 8);
    }

    #[test]
    fn test_each_block_decodes_from_fresh_model() {
        let params = ModelParams::default()
            .with_total_bits(2)
            .with_step(1)
            .with_initial(InitialDistribution::from_pairs(&[(0, 2), (1, 2)]));
        let blocks: [&[u8]; 3] = [&[0, 1, 1, 0, 1, 0, 0, 1], &[1, 1, 1, 1, 0, 0, 0, 0], &[0; 8]];
        let mut encoder = Rans0Encoder::new(params.clone());

        let mut decoder = Rans0Decoder::new(params);
        for block in blocks {
            let compressed = encoder.encode_block(block).unwrap();
            decoder.reset().unwrap();
            assert_eq!(decoder.model().symbol_range(1), (2, 2));
            assert_eq!(decoder.decode_block(&compressed, block.len()).unwrap(), block);
            assert_eq!(decoder.phase(), Phase::Finished);
        }
    }

    #[test]
    fn test_reuse_after_error_requires_reset() {
        let mut decoder = ready(ModelParams::default());
        assert!(decoder.decode_block(&[1], 2).is_err());
        assert_eq!(decoder.phase(), Phase::Uninitialized);

        decoder.reset().unwrap();
        let compressed = Rans0Encoder::new(ModelParams::default())
            .encode_block(b"NN")
            .unwrap();
        assert_eq!(decoder.decode_block(&compressed, 2).unwrap(), b"NN");
    }
}
