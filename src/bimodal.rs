use crate::{BimodalConfig, BranchPredictor, ConfigError, SaturatingCounter, TableSnapshot};
use log::debug;

/// Fixed-size table of 2-bit counters indexed by the hashed branch address
///
/// Distinct addresses may alias to the same counter and share its state.
#[derive(Debug, Clone)]
pub struct BimodalPredictor {
    config: BimodalConfig,
    bht: Vec<SaturatingCounter>,
}

impl BimodalPredictor {
    pub fn new(config: BimodalConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        debug!(
            "Creating bimodal predictor with {} entries, {:?} hash",
            config.size, config.hash
        );
        Ok(Self {
            config,
            bht: vec![SaturatingCounter::default(); config.size],
        })
    }

    pub fn config(&self) -> &BimodalConfig {
        &self.config
    }

    pub fn index(&self, address: u64) -> usize {
        self.config.hash.index(address, self.config.size)
    }

    pub fn counters(&self) -> &[SaturatingCounter] {
        &self.bht
    }
}

impl BranchPredictor for BimodalPredictor {
    fn predict(&self, address: u64) -> bool {
        self.bht[self.index(address)].is_taken()
    }

    fn update(&mut self, address: u64, taken: bool) {
        let index = self.index(address);
        self.bht[index].update(taken);
    }

    fn snapshot(&self) -> TableSnapshot {
        TableSnapshot::Indexed(self.bht.iter().map(|counter| counter.value()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AddressHash;

    fn bimodal(size: usize) -> BimodalPredictor {
        BimodalPredictor::new(BimodalConfig {
            size,
            hash: AddressHash::Identity,
        })
        .unwrap()
    }

    #[test]
    fn test_initial_state() {
        let predictor = bimodal(16);
        assert_eq!(predictor.snapshot(), TableSnapshot::Indexed(vec![2; 16]));
        assert!((0..100).all(|address| predictor.predict(address)));
    }

    #[test]
    fn test_learns_not_taken() {
        let mut predictor = bimodal(16);
        predictor.update(3, false);
        assert!(!predictor.predict(3));
        assert!(predictor.predict(4));
        predictor.update(3, true);
        assert!(predictor.predict(3));
    }

    #[test]
    fn test_aliasing() {
        let mut predictor = bimodal(16);
        // 5 and 21 share a slot
        predictor.update(5, false);
        predictor.update(5, false);
        assert!(!predictor.predict(21));
        assert_eq!(predictor.index(5), predictor.index(21));
        for _ in 0..10 {
            predictor.update(21, true);
        }
        assert!(predictor.predict(5));
        assert_eq!(predictor.counters()[5].value(), 3);
    }

    #[test]
    fn test_rejects_zero_size() {
        assert!(matches!(
            BimodalPredictor::new(BimodalConfig {
                size: 0,
                hash: AddressHash::Identity
            }),
            Err(ConfigError::ZeroTableSize { .. })
        ));
    }
}
