use crate::{
    BranchPredictor, ConfigError, GShareConfig, GlobalHistory, SaturatingCounter, TableSnapshot,
};
use log::debug;

/// Fixed-size table of 2-bit counters indexed by the hashed branch address
/// xor the global history of recent outcomes
#[derive(Debug, Clone)]
pub struct GSharePredictor {
    config: GShareConfig,
    history: GlobalHistory,
    bht: Vec<SaturatingCounter>,
}

impl GSharePredictor {
    pub fn new(config: GShareConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        debug!(
            "Creating gshare predictor with {} entries, {} history bits, {:?} hash",
            config.size, config.history_bits, config.hash
        );
        Ok(Self {
            config,
            history: GlobalHistory::new(config.history_bits)?,
            bht: vec![SaturatingCounter::default(); config.size],
        })
    }

    pub fn config(&self) -> &GShareConfig {
        &self.config
    }

    pub fn history(&self) -> u64 {
        self.history.value()
    }

    /// Index under the current history
    pub fn index(&self, address: u64) -> usize {
        self.config
            .hash
            .folded_index(address, self.history.value(), self.config.size)
    }

    pub fn counters(&self) -> &[SaturatingCounter] {
        &self.bht
    }
}

impl BranchPredictor for GSharePredictor {
    fn predict(&self, address: u64) -> bool {
        self.bht[self.index(address)].is_taken()
    }

    fn update(&mut self, address: u64, taken: bool) {
        // train the counter that made the prediction, then advance history
        let index = self.index(address);
        self.bht[index].update(taken);
        self.history.push(taken);
    }

    fn snapshot(&self) -> TableSnapshot {
        TableSnapshot::Indexed(self.bht.iter().map(|counter| counter.value()).collect())
    }
}
