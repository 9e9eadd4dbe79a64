use crate::{BranchPredictor, TableSnapshot};
use std::collections::HashMap;

/// Remembers the last outcome of every branch address
///
/// Unseen addresses predict not taken. The table grows with every new address.
#[derive(Debug, Clone, Default)]
pub struct OneBitPredictor {
    bht: HashMap<u64, bool>,
}

impl OneBitPredictor {
    pub fn new() -> Self {
        Self::default()
    }

    /// number of distinct addresses seen
    pub fn len(&self) -> usize {
        self.bht.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bht.is_empty()
    }
}

impl BranchPredictor for OneBitPredictor {
    fn predict(&self, address: u64) -> bool {
        self.bht.get(&address).copied().unwrap_or(false)
    }

    fn update(&mut self, address: u64, taken: bool) {
        self.bht.insert(address, taken);
    }

    fn snapshot(&self) -> TableSnapshot {
        TableSnapshot::PerAddress(
            self.bht
                .iter()
                .map(|(address, taken)| (*address, *taken as u8))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_default_not_taken() {
        let predictor = OneBitPredictor::new();
        assert!(!predictor.predict(0x1000));
        assert!(predictor.is_empty());
    }

    #[test]
    fn test_overwrite() {
        let mut predictor = OneBitPredictor::new();
        predictor.update(100, true);
        assert!(predictor.predict(100));
        predictor.update(100, false);
        assert!(!predictor.predict(100));
        predictor.update(100, true);
        assert!(predictor.predict(100));
        // other addresses are untouched
        assert!(!predictor.predict(200));
    }

    #[test]
    fn test_grows_per_address() {
        let mut predictor = OneBitPredictor::new();
        for address in 0..50 {
            predictor.update(address * 4, address % 2 == 0);
        }
        predictor.update(0, false);
        assert_eq!(predictor.len(), 50);
        match predictor.snapshot() {
            TableSnapshot::PerAddress(table) => {
                assert_eq!(table.len(), 50);
                assert_eq!(table[&0], 0);
                assert_eq!(table[&8], 1);
                assert_eq!(table[&4], 0);
            }
            other => panic!("unexpected snapshot {:?}", other),
        }
    }

    #[test]
    fn test_snapshot_empty() {
        assert_eq!(
            OneBitPredictor::new().snapshot(),
            TableSnapshot::PerAddress(BTreeMap::new())
        );
    }
}
