use crate::ConfigError;

/// Widest supported global history register
pub const MAX_HISTORY_BITS: u32 = 63;

/// Global history shift register of recent branch outcomes
///
/// The newest outcome lives in bit 0. Only the low `bits` bits are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalHistory {
    value: u64,
    bits: u32,
}

impl GlobalHistory {
    pub fn new(bits: u32) -> Result<Self, ConfigError> {
        if bits == 0 {
            return Err(ConfigError::ZeroHistoryBits);
        }
        if bits > MAX_HISTORY_BITS {
            return Err(ConfigError::HistoryTooWide(bits));
        }
        Ok(Self { value: 0, bits })
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    pub fn mask(&self) -> u64 {
        (1 << self.bits) - 1
    }

    /// Shift in the latest outcome
    pub fn push(&mut self, taken: bool) {
        self.value = ((self.value << 1) | taken as u64) & self.mask();
    }
}
