//! Predictor and simulator configuration
//!
//! Every struct deserializes from TOML with all fields optional, falling back
//! to the classic defaults: 1024 entry tables and an 8 bit global history.
use crate::{AddressHash, ConfigError, MAX_HISTORY_BITS};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_TABLE_SIZE: usize = 1024;
pub const DEFAULT_HISTORY_BITS: u32 = 8;
pub const DEFAULT_INTERVAL: u64 = 10;

fn check_size(table: &'static str, size: usize) -> Result<(), ConfigError> {
    if size == 0 {
        Err(ConfigError::ZeroTableSize { table })
    } else {
        Ok(())
    }
}

fn check_history_bits(bits: u32) -> Result<(), ConfigError> {
    if bits == 0 {
        Err(ConfigError::ZeroHistoryBits)
    } else if bits > MAX_HISTORY_BITS {
        Err(ConfigError::HistoryTooWide(bits))
    } else {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BimodalConfig {
    /// number of counters
    pub size: usize,
    pub hash: AddressHash,
}

impl Default for BimodalConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_TABLE_SIZE,
            hash: AddressHash::default(),
        }
    }
}

impl BimodalConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_size("bimodal", self.size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GShareConfig {
    /// number of counters
    pub size: usize,
    /// width of the global history register
    pub history_bits: u32,
    pub hash: AddressHash,
}

impl Default for GShareConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_TABLE_SIZE,
            history_bits: DEFAULT_HISTORY_BITS,
            hash: AddressHash::default(),
        }
    }
}

impl GShareConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_size("gshare", self.size)?;
        check_history_bits(self.history_bits)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HybridConfig {
    /// number of choice bits
    pub size: usize,
    pub bimodal_size: usize,
    pub gshare_size: usize,
    pub history_bits: u32,
    pub hash: AddressHash,
}

impl Default for HybridConfig {
    fn default() -> Self {
        Self::with_size(DEFAULT_TABLE_SIZE)
    }
}

impl HybridConfig {
    /// Choice table and both sub-predictors share one size
    pub fn with_size(size: usize) -> Self {
        Self {
            size,
            bimodal_size: size,
            gshare_size: size,
            history_bits: DEFAULT_HISTORY_BITS,
            hash: AddressHash::default(),
        }
    }

    pub fn bimodal(&self) -> BimodalConfig {
        BimodalConfig {
            size: self.bimodal_size,
            hash: self.hash,
        }
    }

    pub fn gshare(&self) -> GShareConfig {
        GShareConfig {
            size: self.gshare_size,
            history_bits: self.history_bits,
            hash: self.hash,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_size("choice", self.size)?;
        self.bimodal().validate()?;
        self.gshare().validate()
    }
}

/// Configuration of a whole simulation run, loaded from a TOML file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulatorConfig {
    /// report accuracy every `interval` records
    pub interval: u64,
    pub bimodal: BimodalConfig,
    pub gshare: GShareConfig,
    pub hybrid: HybridConfig,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            bimodal: BimodalConfig::default(),
            gshare: GShareConfig::default(),
            hybrid: HybridConfig::default(),
        }
    }
}

impl SimulatorConfig {
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config: SimulatorConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Self::from_toml(&std::fs::read_to_string(path)?)
    }

    /// Apply one hash function to every table
    pub fn set_hash(&mut self, hash: AddressHash) {
        self.bimodal.hash = hash;
        self.gshare.hash = hash;
        self.hybrid.hash = hash;
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        self.bimodal.validate()?;
        self.gshare.validate()?;
        self.hybrid.validate()
    }
}
