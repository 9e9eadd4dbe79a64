use thiserror::Error;

/// Rejected predictor or simulator configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// a table must hold at least one entry
    #[error("{table} table size must be positive")]
    ZeroTableSize { table: &'static str },
    /// a global history register must be at least one bit wide
    #[error("history register must be at least 1 bit wide")]
    ZeroHistoryBits,
    /// the history register is stored in a u64
    #[error("history register width {0} exceeds the maximum of 63 bits")]
    HistoryTooWide(u32),
    /// reporting interval must be positive
    #[error("reporting interval must be positive")]
    ZeroInterval,
    #[error("unknown predictor {0:?}")]
    UnknownPredictor(String),
}
