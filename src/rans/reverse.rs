//! Slot → symbol reverse lookup table.
//!
//! One byte per slot of the frequency budget. Decoding reads it once per
//! symbol, so it must always agree with the model's cumulative layout.

use super::model::FrequencyModel;
use super::ALPHABET_SIZE;

/// Dense reverse lookup over `[0, budget)`.
///
/// Slots at or above the model's live total belong to no symbol; their
/// contents are unspecified and callers must range-check against
/// [`FrequencyModel::total`] first.
#[derive(Debug, Clone)]
pub struct ReverseLookup {
    table: Vec<u8>,
}

impl ReverseLookup {
    /// Allocate a zeroed table for a budget of `budget` slots.
    pub fn new(budget: u32) -> Self {
        Self {
            table: vec![0; budget as usize],
        }
    }

    /// Allocate and fill from `model`.
    pub fn from_model(model: &FrequencyModel) -> Self {
        let mut lookup = Self::new(model.budget());
        lookup.rebuild(model);
        lookup
    }

    /// Refill every owned slot from the model's cumulative layout. O(budget).
    pub fn rebuild(&mut self, model: &FrequencyModel) {
        let budget = model.budget() as usize;
        if self.table.len() != budget {
            self.table.resize(budget, 0);
        }
        for s in 0..ALPHABET_SIZE {
            let start = model.cumulative(s) as usize;
            let end = model.cumulative(s + 1) as usize;
            self.table[start..end].fill(s as u8);
        }
        let total = model.total() as usize;
        self.table[total..].fill(0);
    }

    /// Track a plain increment of `symbol` by `delta`.
    ///
    /// `model` must already include the increment. The symbol's run gains
    /// `delta` slots at its end and every later run moves up by `delta`,
    /// which leaves the table identical to a full [`rebuild`](Self::rebuild).
    pub fn grow(&mut self, model: &FrequencyModel, symbol: u8, delta: u32) {
        let delta = delta as usize;
        if delta == 0 {
            return;
        }
        let (cum, freq) = model.symbol_range(symbol);
        let end = (cum + freq) as usize;
        let old_end = end - delta;
        let new_total = model.total() as usize;
        let old_total = new_total - delta;

        self.table.copy_within(old_end..old_total, end);
        self.table[old_end..end].fill(symbol);
    }

    /// Symbol owning `slot`. `slot` must be below the budget.
    #[inline(always)]
    pub fn lookup(&self, slot: u32) -> u8 {
        debug_assert!(
            (slot as usize) < self.table.len(),
            "slot {slot} outside reverse lookup of {} entries",
            self.table.len()
        );
        self.table[slot as usize]
    }

    /// Number of slots (the frequency budget).
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Zero every slot.
    pub fn clear(&mut self) {
        self.table.fill(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rans::{InitialDistribution, ModelParams, Update};
    use proptest::prelude::*;

    fn assert_consistent(lookup: &ReverseLookup, model: &FrequencyModel) {
        for slot in 0..model.total() {
            let s = lookup.lookup(slot);
            let (cum, freq) = model.symbol_range(s);
            assert!(
                cum <= slot && slot < cum + freq,
                "slot {slot} maps to {s} with range [{cum}, {})",
                cum + freq
            );
        }
    }

    #[test]
    fn test_rebuild_small_layout() {
        let params = ModelParams::default()
            .with_total_bits(3)
            .with_step(1)
            .with_initial(InitialDistribution::from_pairs(&[(2, 3), (7, 1), (200, 2)]));
        let model = FrequencyModel::new(&params).unwrap();
        let lookup = ReverseLookup::from_model(&model);

        assert_eq!(lookup.len(), 8);
        let owned: Vec<u8> = (0..model.total()).map(|i| lookup.lookup(i)).collect();
        assert_eq!(owned, vec![2, 2, 2, 7, 200, 200]);
    }

    #[test]
    fn test_grow_matches_rebuild() {
        let params = ModelParams::default()
            .with_total_bits(6)
            .with_step(3)
            .with_initial(InitialDistribution::from_pairs(&[(1, 4), (3, 4), (9, 4), (12, 4)]));
        let mut model = FrequencyModel::new(&params).unwrap();
        let mut lookup = ReverseLookup::from_model(&model);

        for s in [3, 3, 12, 1, 9, 9, 9, 3] {
            match model.update(s).unwrap() {
                Update::Grew => lookup.grow(&model, s, model.step()),
                Update::Rescaled => lookup.rebuild(&model),
            }
            let fresh = ReverseLookup::from_model(&model);
            let total = model.total() as usize;
            assert_eq!(lookup.table[..total], fresh.table[..total]);
        }
    }

    #[test]
    fn test_single_symbol_owns_everything() {
        let params =
            ModelParams::default().with_initial(InitialDistribution::single(42, 12));
        let model = FrequencyModel::new(&params).unwrap();
        let lookup = ReverseLookup::from_model(&model);
        assert!((0..4096).all(|slot| lookup.lookup(slot) == 42));
    }

    #[test]
    fn test_clear() {
        let model = FrequencyModel::new(&ModelParams::default()).unwrap();
        let mut lookup = ReverseLookup::from_model(&model);
        assert_eq!(lookup.lookup(4095), 255);
        lookup.clear();
        assert_eq!(lookup.lookup(4095), 0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn prop_lookup_consistent_after_updates(
            step in 1u32..40,
            symbols in prop::collection::vec(0u8..8, 1..200),
        ) {
            let params = ModelParams::default()
                .with_total_bits(10)
                .with_step(step)
                .with_initial(InitialDistribution::from_pairs(
                    &(0u8..8).map(|s| (s, 16)).collect::<Vec<_>>(),
                ));
            let mut model = FrequencyModel::new(&params).unwrap();
            let mut lookup = ReverseLookup::from_model(&model);

            for &s in &symbols {
                match model.update(s).unwrap() {
                    Update::Grew => lookup.grow(&model, s, step),
                    Update::Rescaled => lookup.rebuild(&model),
                }
                assert_consistent(&lookup, &model);
            }
        }
    }
}
