use serde::{Deserialize, Serialize};

/// Largest value of a 2-bit counter, "strongly taken"
pub const STRONGLY_TAKEN: u8 = 3;
/// Initial value of every counter in a fixed table, "weakly taken"
pub const WEAKLY_TAKEN: u8 = 2;

/// 2-bit saturating counter
///
/// Values 0 and 1 predict not taken, 2 and 3 predict taken. The value can only
/// be changed through [`SaturatingCounter::update`], which clamps to [0, 3].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SaturatingCounter(u8);

impl Default for SaturatingCounter {
    fn default() -> Self {
        Self(WEAKLY_TAKEN)
    }
}

impl SaturatingCounter {
    /// Build a counter, clamping out-of-range values to the nearest bound
    pub fn new(value: u8) -> Self {
        Self(value.min(STRONGLY_TAKEN))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn is_taken(&self) -> bool {
        self.0 >= WEAKLY_TAKEN
    }

    /// Move one step towards the real outcome
    pub fn update(&mut self, taken: bool) {
        self.0 = if taken {
            (self.0 + 1).min(STRONGLY_TAKEN)
        } else {
            self.0.saturating_sub(1)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_weakly_taken() {
        let counter = SaturatingCounter::default();
        assert_eq!(counter.value(), 2);
        assert!(counter.is_taken());
    }

    #[test]
    fn test_threshold() {
        let predictions: Vec<bool> = (0..=3)
            .map(|v| SaturatingCounter::new(v).is_taken())
            .collect();
        assert_eq!(predictions, vec![false, false, true, true]);
    }

    #[test]
    fn test_saturates_upwards() {
        for start in 0..=3u8 {
            for k in 0..6u8 {
                let mut counter = SaturatingCounter::new(start);
                for _ in 0..k {
                    counter.update(true);
                }
                assert_eq!(counter.value(), (start + k).min(3));
            }
        }
    }

    #[test]
    fn test_saturates_downwards() {
        for start in 0..=3u8 {
            for k in 0..6u8 {
                let mut counter = SaturatingCounter::new(start);
                for _ in 0..k {
                    counter.update(false);
                }
                assert_eq!(counter.value(), start.saturating_sub(k));
            }
        }
    }

    #[test]
    fn test_stays_in_range() {
        // pseudo random walk
        let mut counter = SaturatingCounter::default();
        let mut seed = 0x2545_f491_4f6c_dd1du64;
        for _ in 0..10000 {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            counter.update(seed & 1 == 1);
            assert!(counter.value() <= 3);
        }
    }

    #[test]
    fn test_new_clamps() {
        assert_eq!(SaturatingCounter::new(200).value(), 3);
    }
}
