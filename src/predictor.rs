use crate::{
    BimodalPredictor, ConfigError, GSharePredictor, HybridPredictor, OneBitPredictor,
    SimulatorConfig, StaticPredictor, TableSnapshot, TwoBitPredictor,
};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Conditional branch direction predictor
///
/// For every branch record:
/// 1. call `predict` to get the prediction from the current state
/// 2. call `update` with the real outcome
///
/// `predict` never changes state, so calling it twice without an `update` in
/// between gives the same answer.
pub trait BranchPredictor {
    fn predict(&self, address: u64) -> bool;
    fn update(&mut self, address: u64, taken: bool);
    /// Copy of the internal table for reporting
    fn snapshot(&self) -> TableSnapshot;
}

/// All predictor kinds known to the simulator, in reporting order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum PredictorKind {
    StaticTaken,
    StaticNotTaken,
    OneBit,
    TwoBit,
    Bimodal,
    #[clap(name = "gshare")]
    GShare,
    Hybrid,
}

impl PredictorKind {
    pub const ALL: [PredictorKind; 7] = [
        PredictorKind::StaticTaken,
        PredictorKind::StaticNotTaken,
        PredictorKind::OneBit,
        PredictorKind::TwoBit,
        PredictorKind::Bimodal,
        PredictorKind::GShare,
        PredictorKind::Hybrid,
    ];

    /// Human readable name, also used for log and table dump file names
    pub fn name(&self) -> &'static str {
        match self {
            PredictorKind::StaticTaken => "Static Taken",
            PredictorKind::StaticNotTaken => "Static Not Taken",
            PredictorKind::OneBit => "One Bit",
            PredictorKind::TwoBit => "Two Bit",
            PredictorKind::Bimodal => "Bimodal",
            PredictorKind::GShare => "GShare",
            PredictorKind::Hybrid => "Hybrid",
        }
    }

    pub fn from_name(name: &str) -> Option<PredictorKind> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

/// Closed set of predictor implementations
#[derive(Debug, Clone)]
pub enum Predictor {
    Static(StaticPredictor),
    OneBit(OneBitPredictor),
    TwoBit(TwoBitPredictor),
    Bimodal(BimodalPredictor),
    GShare(GSharePredictor),
    Hybrid(HybridPredictor),
}

impl Predictor {
    pub fn new(kind: PredictorKind, config: &SimulatorConfig) -> Result<Predictor, ConfigError> {
        Ok(match kind {
            PredictorKind::StaticTaken => Predictor::Static(StaticPredictor::new(true)),
            PredictorKind::StaticNotTaken => Predictor::Static(StaticPredictor::new(false)),
            PredictorKind::OneBit => Predictor::OneBit(OneBitPredictor::new()),
            PredictorKind::TwoBit => Predictor::TwoBit(TwoBitPredictor::new()),
            PredictorKind::Bimodal => Predictor::Bimodal(BimodalPredictor::new(config.bimodal)?),
            PredictorKind::GShare => Predictor::GShare(GSharePredictor::new(config.gshare)?),
            PredictorKind::Hybrid => Predictor::Hybrid(HybridPredictor::new(config.hybrid)?),
        })
    }
}

impl BranchPredictor for Predictor {
    fn predict(&self, address: u64) -> bool {
        match self {
            Predictor::Static(p) => p.predict(address),
            Predictor::OneBit(p) => p.predict(address),
            Predictor::TwoBit(p) => p.predict(address),
            Predictor::Bimodal(p) => p.predict(address),
            Predictor::GShare(p) => p.predict(address),
            Predictor::Hybrid(p) => p.predict(address),
        }
    }

    fn update(&mut self, address: u64, taken: bool) {
        match self {
            Predictor::Static(p) => p.update(address, taken),
            Predictor::OneBit(p) => p.update(address, taken),
            Predictor::TwoBit(p) => p.update(address, taken),
            Predictor::Bimodal(p) => p.update(address, taken),
            Predictor::GShare(p) => p.update(address, taken),
            Predictor::Hybrid(p) => p.update(address, taken),
        }
    }

    fn snapshot(&self) -> TableSnapshot {
        match self {
            Predictor::Static(p) => p.snapshot(),
            Predictor::OneBit(p) => p.snapshot(),
            Predictor::TwoBit(p) => p.snapshot(),
            Predictor::Bimodal(p) => p.snapshot(),
            Predictor::GShare(p) => p.snapshot(),
            Predictor::Hybrid(p) => p.snapshot(),
        }
    }
}

pub fn list_branch_predictors() -> Vec<String> {
    PredictorKind::ALL
        .iter()
        .map(|kind| kind.name().to_string())
        .collect()
}

pub fn new_branch_predictor(name: &str, config: &SimulatorConfig) -> Result<Predictor, ConfigError> {
    match PredictorKind::from_name(name) {
        Some(kind) => Predictor::new(kind, config),
        None => Err(ConfigError::UnknownPredictor(name.to_string())),
    }
}

/// One fresh instance of every predictor kind, in reporting order
pub fn default_predictor_set(
    config: &SimulatorConfig,
) -> Result<Vec<(PredictorKind, Predictor)>, ConfigError> {
    PredictorKind::ALL
        .into_iter()
        .map(|kind| Ok((kind, Predictor::new(kind, config)?)))
        .collect()
}
