use crate::{
    BranchPredictor, BranchRecord, ConfigError, DEFAULT_INTERVAL, Predictor, PredictorKind,
    SimulatorConfig, TableSnapshot, default_predictor_set, format_realtime_row,
};
use log::trace;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictorStats {
    /// number of records seen
    pub processed: u64,
    /// number of correct predictions
    pub correct: u64,
}

impl PredictorStats {
    pub fn mispredictions(&self) -> u64 {
        self.processed - self.correct
    }

    /// Cumulative accuracy in percent, 0 before the first record
    pub fn accuracy(&self) -> f64 {
        if self.processed == 0 {
            0.0
        } else {
            self.correct as f64 * 100.0 / self.processed as f64
        }
    }
}

/// Cumulative accuracy of one predictor after a number of records
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub branches_processed: u64,
    /// cumulative accuracy (%)
    pub accuracy: f64,
}

/// A predictor instance driven by the simulator
#[derive(Debug, Clone)]
pub struct SimulatedPredictor {
    pub name: String,
    pub predictor: Predictor,
    pub stats: PredictorStats,
    /// whether each record so far was predicted correctly, in trace order
    pub correctness: Vec<bool>,
    /// one entry every `interval` records
    pub checkpoints: Vec<Checkpoint>,
}

/// Runs every predictor over the same ordered stream of branch records
///
/// For each record and each predictor the prediction is taken from the current
/// state, scored against the real outcome, and only then is the outcome used
/// to update that predictor.
#[derive(Debug, Clone)]
pub struct Simulator {
    predictors: Vec<SimulatedPredictor>,
    processed: u64,
    interval: u64,
}

impl Simulator {
    /// One instance of every predictor kind
    pub fn new(config: &SimulatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Self::with_predictors(
            default_predictor_set(config)?
                .into_iter()
                .map(|(kind, predictor)| (kind.name().to_string(), predictor)),
        )
        .with_interval(config.interval)
    }

    /// One instance of each listed kind, in order; repeated kinds are only
    /// instantiated once since the name identifies the predictor in reports
    pub fn from_kinds(kinds: &[PredictorKind], config: &SimulatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut predictors: Vec<(String, Predictor)> = vec![];
        for kind in kinds {
            if predictors.iter().any(|(name, _)| name == kind.name()) {
                continue;
            }
            predictors.push((kind.name().to_string(), Predictor::new(*kind, config)?));
        }
        Self::with_predictors(predictors).with_interval(config.interval)
    }

    /// Record a checkpoint every `interval` records
    pub fn with_interval(mut self, interval: u64) -> Result<Self, ConfigError> {
        if interval == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        self.interval = interval;
        Ok(self)
    }

    pub fn with_predictors<I: IntoIterator<Item = (String, Predictor)>>(predictors: I) -> Self {
        Self {
            predictors: predictors
                .into_iter()
                .map(|(name, predictor)| SimulatedPredictor {
                    name,
                    predictor,
                    stats: PredictorStats::default(),
                    correctness: vec![],
                    checkpoints: vec![],
                })
                .collect(),
            processed: 0,
            interval: DEFAULT_INTERVAL,
        }
    }

    /// Process one record, returning whether each predictor was correct, in
    /// predictor order
    pub fn step(&mut self, record: &BranchRecord) -> Vec<bool> {
        self.processed += 1;
        let checkpoint = self.at_checkpoint();
        let mut correct = Vec::with_capacity(self.predictors.len());
        for entry in &mut self.predictors {
            let prediction = entry.predictor.predict(record.address);
            let hit = prediction == record.taken;
            entry.predictor.update(record.address, record.taken);
            entry.stats.processed += 1;
            entry.stats.correct += hit as u64;
            entry.correctness.push(hit);
            if checkpoint {
                entry.checkpoints.push(Checkpoint {
                    branches_processed: self.processed,
                    accuracy: entry.stats.accuracy(),
                });
            }
            trace!(
                "{}: branch {} address {} predicted {} actual {}",
                entry.name, self.processed, record.address, prediction as u8, record.taken as u8
            );
            correct.push(hit);
        }
        correct
    }

    pub fn run<'a, I: IntoIterator<Item = &'a BranchRecord>>(&mut self, records: I) {
        for record in records {
            self.step(record);
        }
    }

    /// Records processed so far
    pub fn processed(&self) -> u64 {
        self.processed
    }

    pub fn interval(&self) -> u64 {
        self.interval
    }

    /// `true` right after the record completing an interval
    pub fn at_checkpoint(&self) -> bool {
        self.processed > 0 && self.processed % self.interval == 0
    }

    /// Realtime log rows of the latest checkpoint, one per predictor
    pub fn checkpoint_rows(&self) -> Vec<String> {
        self.predictors
            .iter()
            .filter_map(|entry| {
                entry.checkpoints.last().map(|checkpoint| {
                    format_realtime_row(
                        &entry.name,
                        checkpoint.branches_processed,
                        checkpoint.accuracy,
                    )
                })
            })
            .collect()
    }

    pub fn predictors(&self) -> &[SimulatedPredictor] {
        &self.predictors
    }

    pub fn get(&self, name: &str) -> Option<&SimulatedPredictor> {
        self.predictors.iter().find(|entry| entry.name == name)
    }

    pub fn snapshots(&self) -> Vec<(&str, TableSnapshot)> {
        self.predictors
            .iter()
            .map(|entry| (entry.name.as_str(), entry.predictor.snapshot()))
            .collect()
    }

    pub fn result(&self, trace_path: Option<PathBuf>, config: SimulatorConfig) -> SimulateResult {
        SimulateResult {
            trace_path,
            config,
            total_records: self.processed,
            predictors: self
                .predictors
                .iter()
                .map(|entry| SimulateResultPredictorInfo {
                    name: entry.name.clone(),
                    processed: entry.stats.processed,
                    correct: entry.stats.correct,
                    mispred_count: entry.stats.mispredictions(),
                    accuracy: entry.stats.accuracy(),
                    checkpoints: entry.checkpoints.clone(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulateResultPredictorInfo {
    pub name: String,
    pub processed: u64,
    pub correct: u64,
    pub mispred_count: u64,
    /// prediction accuracy (%)
    pub accuracy: f64,
    /// cumulative accuracy every `interval` records
    pub checkpoints: Vec<Checkpoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulateResult {
    /// configuration
    pub trace_path: Option<PathBuf>,
    pub config: SimulatorConfig,

    /// number of branch records processed
    pub total_records: u64,

    /// per predictor statistics, in reporting order
    pub predictors: Vec<SimulateResultPredictorInfo>,
}
