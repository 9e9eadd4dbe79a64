use crate::{
    BimodalPredictor, BranchPredictor, ConfigError, GSharePredictor, HybridConfig, TableSnapshot,
};
use log::debug;

/// Tournament predictor arbitrating between a private gshare and a private
/// bimodal predictor
///
/// A choice table of single bits, indexed by the hashed address, records which
/// sub-predictor was last right when the two disagreed: `true` selects gshare,
/// `false` selects bimodal. All bits start out selecting gshare.
#[derive(Debug, Clone)]
pub struct HybridPredictor {
    config: HybridConfig,
    choice_table: Vec<bool>,
    bimodal: BimodalPredictor,
    gshare: GSharePredictor,
}

impl HybridPredictor {
    pub fn new(config: HybridConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        debug!("Creating hybrid predictor with {} choice bits", config.size);
        Ok(Self {
            config,
            choice_table: vec![true; config.size],
            bimodal: BimodalPredictor::new(config.bimodal())?,
            gshare: GSharePredictor::new(config.gshare())?,
        })
    }

    pub fn config(&self) -> &HybridConfig {
        &self.config
    }

    pub fn index(&self, address: u64) -> usize {
        self.config.hash.index(address, self.config.size)
    }

    /// `true` if gshare is currently trusted for this address
    pub fn uses_gshare(&self, address: u64) -> bool {
        self.choice_table[self.index(address)]
    }

    pub fn choice_table(&self) -> &[bool] {
        &self.choice_table
    }

    pub fn bimodal(&self) -> &BimodalPredictor {
        &self.bimodal
    }

    pub fn gshare(&self) -> &GSharePredictor {
        &self.gshare
    }
}

impl BranchPredictor for HybridPredictor {
    fn predict(&self, address: u64) -> bool {
        if self.uses_gshare(address) {
            self.gshare.predict(address)
        } else {
            self.bimodal.predict(address)
        }
    }

    fn update(&mut self, address: u64, taken: bool) {
        let gshare_correct = self.gshare.predict(address) == taken;
        let bimodal_correct = self.bimodal.predict(address) == taken;

        self.gshare.update(address, taken);
        self.bimodal.update(address, taken);

        // only a disagreement says anything about which one to trust
        if gshare_correct != bimodal_correct {
            let index = self.index(address);
            self.choice_table[index] = gshare_correct;
        }
    }

    /// The choice table, 1 for gshare and 0 for bimodal
    fn snapshot(&self) -> TableSnapshot {
        TableSnapshot::Indexed(self.choice_table.iter().map(|c| *c as u8).collect())
    }
}
