use crate::{BranchPredictor, SaturatingCounter, TableSnapshot};
use std::collections::HashMap;

/// One 2-bit saturating counter per branch address
///
/// Unseen addresses behave as a weakly taken counter, and are inserted in that
/// state on their first update before the transition is applied.
#[derive(Debug, Clone, Default)]
pub struct TwoBitPredictor {
    bht: HashMap<u64, SaturatingCounter>,
}

impl TwoBitPredictor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current counter value of an address, if it has been updated before
    pub fn counter(&self, address: u64) -> Option<u8> {
        self.bht.get(&address).map(|counter| counter.value())
    }

    pub fn len(&self) -> usize {
        self.bht.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bht.is_empty()
    }
}

impl BranchPredictor for TwoBitPredictor {
    fn predict(&self, address: u64) -> bool {
        self.bht
            .get(&address)
            .copied()
            .unwrap_or_default()
            .is_taken()
    }

    fn update(&mut self, address: u64, taken: bool) {
        self.bht.entry(address).or_default().update(taken);
    }

    fn snapshot(&self) -> TableSnapshot {
        TableSnapshot::PerAddress(
            self.bht
                .iter()
                .map(|(address, counter)| (*address, counter.value()))
                .collect(),
        )
    }
}
