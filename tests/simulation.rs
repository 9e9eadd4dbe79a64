use bp_sim::{
    AddressHash, BranchPredictor, BranchRecord, Predictor, Simulator, SimulatorConfig,
    TableSnapshot, read_trace, write_trace,
};
use std::io::Write;

fn synthetic_trace(len: usize) -> Vec<BranchRecord> {
    // a loop branch taken 7 of 8 times, an alternating branch and a noisy one
    let mut seed = 0x1234_5678u64;
    let mut records = vec![];
    for i in 0..len {
        let (address, taken) = match i % 3 {
            0 => (0x400, i % 24 != 21),
            1 => (0x41c, (i / 3) % 2 == 0),
            _ => {
                seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
                (0x4a0 + (seed >> 60) * 4, (seed >> 40) & 1 == 1)
            }
        };
        records.push(BranchRecord::new(address, taken));
    }
    records
}

fn run(config: &SimulatorConfig, records: &[BranchRecord]) -> (Vec<Vec<bool>>, Vec<TableSnapshot>) {
    let mut simulator = Simulator::new(config).unwrap();
    let flags = records.iter().map(|record| simulator.step(record)).collect();
    let snapshots = simulator
        .snapshots()
        .into_iter()
        .map(|(_, snapshot)| snapshot)
        .collect();
    (flags, snapshots)
}

#[test]
fn test_trace_file_end_to_end() {
    let records = vec![
        BranchRecord::new(100, true),
        BranchRecord::new(100, true),
        BranchRecord::new(100, false),
        BranchRecord::new(200, true),
    ];
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write_trace(&mut file, &records).unwrap();
    file.flush().unwrap();

    let parsed = read_trace(file.path()).unwrap();
    assert_eq!(parsed, records);

    let mut simulator = Simulator::new(&SimulatorConfig::default()).unwrap();
    let flags: Vec<bool> = parsed
        .iter()
        .map(|record| simulator.step(record)[3])
        .collect();
    assert_eq!(flags, vec![true, true, false, true]);

    let two_bit = simulator.get("Two Bit").unwrap();
    assert_eq!(
        two_bit.predictor.snapshot(),
        TableSnapshot::PerAddress([(100, 2), (200, 3)].into_iter().collect())
    );
}

#[test]
fn test_runs_are_reproducible() {
    let records = synthetic_trace(3000);
    for hash in [AddressHash::Identity, AddressHash::Multiplicative] {
        let mut config = SimulatorConfig::default();
        config.set_hash(hash);
        config.gshare.size = 64;
        config.hybrid = bp_sim::HybridConfig::with_size(16);
        config.hybrid.hash = hash;
        assert_eq!(run(&config, &records), run(&config, &records));
    }
}

#[test]
fn test_history_predictors_learn_patterns() {
    let records = synthetic_trace(6000);
    let mut simulator = Simulator::new(&SimulatorConfig::default()).unwrap();
    simulator.run(&records);

    let accuracy = |name: &str| simulator.get(name).unwrap().stats.accuracy();
    // the alternating branch defeats per-address counters but not gshare
    assert!(accuracy("GShare") > accuracy("Bimodal"));
    assert!(accuracy("Hybrid") > accuracy("Bimodal"));
    assert!(accuracy("Two Bit") > accuracy("Static Not Taken"));
    for entry in simulator.predictors() {
        assert_eq!(entry.stats.processed, 6000);
        assert!(entry.stats.accuracy() <= 100.0);
    }
}

#[test]
fn test_fixed_tables_stay_in_range() {
    let records: Vec<BranchRecord> = (0..5000u64)
        .map(|i| BranchRecord::new(i.wrapping_mul(0x9e37_79b9) % 100_000, i % 7 < 4))
        .collect();
    let mut config = SimulatorConfig::default();
    config.bimodal.size = 3;
    config.gshare.size = 5;
    config.hybrid = bp_sim::HybridConfig::with_size(2);
    let mut simulator = Simulator::new(&config).unwrap();
    simulator.run(&records);

    for entry in simulator.predictors() {
        match entry.predictor.snapshot() {
            TableSnapshot::Indexed(table) => assert!(table.iter().all(|v| *v <= 3)),
            TableSnapshot::PerAddress(table) => assert!(table.values().all(|v| *v <= 3)),
            TableSnapshot::Stateless => {}
        }
        if let Predictor::Hybrid(hybrid) = &entry.predictor {
            assert_eq!(hybrid.choice_table().len(), 2);
            assert!(hybrid.gshare().history() < 256);
        }
    }
}

#[test]
fn test_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "interval = 50\n[bimodal]\nsize = 16").unwrap();
    file.flush().unwrap();
    let config = SimulatorConfig::load(file.path()).unwrap();
    assert_eq!(config.interval, 50);
    assert_eq!(config.bimodal.size, 16);

    let shipped = SimulatorConfig::load(concat!(env!("CARGO_MANIFEST_DIR"), "/configs/default.toml"))
        .unwrap();
    assert_eq!(shipped, SimulatorConfig::default());

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[hybrid]\nsize = 0").unwrap();
    file.flush().unwrap();
    assert!(SimulatorConfig::load(file.path()).is_err());
}
