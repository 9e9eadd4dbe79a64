use crate::{BranchPredictor, TableSnapshot};

/// Always predicts the same direction and never learns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticPredictor {
    taken: bool,
}

impl StaticPredictor {
    pub fn new(always_taken: bool) -> Self {
        Self {
            taken: always_taken,
        }
    }
}

impl BranchPredictor for StaticPredictor {
    fn predict(&self, _address: u64) -> bool {
        self.taken
    }

    fn update(&mut self, _address: u64, _taken: bool) {}

    fn snapshot(&self) -> TableSnapshot {
        TableSnapshot::Stateless
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static() {
        let mut taken = StaticPredictor::new(true);
        let mut not_taken = StaticPredictor::new(false);
        for (address, outcome) in [(0, false), (100, true), (u64::MAX, false)] {
            assert!(taken.predict(address));
            assert!(!not_taken.predict(address));
            taken.update(address, outcome);
            not_taken.update(address, outcome);
        }
        assert!(taken.predict(100));
        assert!(!not_taken.predict(100));
    }
}
