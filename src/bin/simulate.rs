//! Compare branch predictors on a CSV trace
use anyhow::Context;
use bp_sim::{
    AddressHash, PredictorKind, REALTIME_LOG_HEADER, Simulator, SimulatorConfig, format_accuracy,
    format_log_line, get_bht_path, get_log_path, get_tqdm_style, read_trace,
};
use clap::Parser;
use cli_table::{Cell, Table, print_stdout};
use log::{debug, info};
use std::{
    fs::{File, create_dir_all},
    io::{BufWriter, Write},
    path::PathBuf,
    time::Duration,
};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to trace file
    #[arg(short, long, default_value = "branch_trace.csv")]
    trace_path: PathBuf,

    /// Report accuracy every x branches, overrides the config file
    #[arg(short = 'x', long)]
    interval: Option<u64>,

    /// Skip the pause after every report
    #[arg(short, long)]
    fast: bool,

    /// Predictors to compare, all of them by default
    #[arg(short, long, value_delimiter = ',')]
    predictor: Vec<PredictorKind>,

    /// Path to simulator config in TOML
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address hash for all tables, overrides the config file
    #[arg(long)]
    hash: Option<AddressHash>,

    /// Directory of per-predictor outcome logs
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,

    /// Directory of final predictor table dumps
    #[arg(long, default_value = "bht_logs")]
    bht_dir: PathBuf,

    /// Path to cumulative accuracy log
    #[arg(long, default_value = "realtime_stats.txt")]
    realtime_log: PathBuf,

    /// Path to result json
    #[arg(short, long)]
    output_path: Option<PathBuf>,
}

const PAUSE: Duration = Duration::from_secs(2);

fn accuracy_table(simulator: &Simulator, processed_title: &str) -> anyhow::Result<()> {
    let mut table = vec![];
    for entry in simulator.predictors() {
        table.push(vec![
            entry.name.clone().cell(),
            entry.stats.processed.cell(),
            format_accuracy(entry.stats.accuracy()).cell(),
        ]);
    }
    let table = table.table().title(vec![
        "Predictor".cell(),
        processed_title.cell(),
        "Cumulative Accuracy (%)".cell(),
    ]);
    print_stdout(table)?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Cli::parse();

    let mut config = match &args.config {
        Some(path) => SimulatorConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SimulatorConfig::default(),
    };
    if let Some(interval) = args.interval {
        config.interval = interval;
    }
    if let Some(hash) = args.hash {
        config.set_hash(hash);
    }
    config.validate()?;
    debug!("Using config {:?}", config);

    let records = read_trace(&args.trace_path)
        .with_context(|| format!("Failed to read trace {}", args.trace_path.display()))?;
    println!("Got {} branch records", records.len());

    let mut simulator = if args.predictor.is_empty() {
        Simulator::new(&config)?
    } else {
        Simulator::from_kinds(&args.predictor, &config)?
    };

    create_dir_all(&args.log_dir)?;
    let mut logs = vec![];
    for entry in simulator.predictors() {
        let path = get_log_path(&args.log_dir, &entry.name);
        logs.push(BufWriter::new(File::create(&path).with_context(|| {
            format!("Failed to create log {}", path.display())
        })?));
    }
    let mut realtime_log = BufWriter::new(File::create(&args.realtime_log)?);
    writeln!(realtime_log, "{}", REALTIME_LOG_HEADER)?;

    let pbar = indicatif::ProgressBar::new(records.len() as u64);
    pbar.set_style(get_tqdm_style());

    for record in &records {
        let correct = simulator.step(record);
        let branch_num = simulator.processed();
        for (log, hit) in logs.iter_mut().zip(&correct) {
            writeln!(log, "{}", format_log_line(branch_num, *hit))?;
        }

        if simulator.at_checkpoint() {
            pbar.suspend(|| -> anyhow::Result<()> {
                println!("Processing Branch Address: {}", record.address);
                accuracy_table(&simulator, "Branches Processed")
            })?;
            for row in simulator.checkpoint_rows() {
                writeln!(realtime_log, "{}", row)?;
            }
            realtime_log.flush()?;
            if !args.fast {
                std::thread::sleep(PAUSE);
            }
        }
        pbar.set_position(branch_num);
    }
    pbar.finish();

    for log in &mut logs {
        log.flush()?;
    }

    create_dir_all(&args.bht_dir)?;
    for (name, snapshot) in simulator.snapshots() {
        if !snapshot.has_table() {
            continue;
        }
        let path = get_bht_path(&args.bht_dir, name);
        let mut writer = BufWriter::new(File::create(&path)?);
        snapshot.write_text(&mut writer)?;
        writer.flush()?;
        info!("Saved {} entries of {} to {}", snapshot.len(), name, path.display());
    }

    println!("Final accuracy:");
    accuracy_table(&simulator, "Total Branches Processed")?;

    if let Some(output_path) = &args.output_path {
        let result = simulator.result(Some(args.trace_path.clone()), config);
        std::fs::write(output_path, serde_json::to_vec(&result)?)?;
        println!("Result written to {}", output_path.display());
    }

    Ok(())
}
