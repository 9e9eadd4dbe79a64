//! Summarize a CSV branch trace
use anyhow::Context;
use bp_sim::{TraceReader, format_accuracy, get_spinner_style};
use clap::Parser;
use cli_table::{Cell, Table, print_stdout};
use std::{collections::HashMap, fs::File, io::BufReader, path::PathBuf};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to trace file
    trace: PathBuf,

    /// Number of branches to list
    #[arg(short, long, default_value = "10")]
    top: usize,
}

#[derive(Debug, Clone, Copy, Default)]
struct BranchInfo {
    execution_count: u64,
    taken_count: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Cli::parse();
    let file = File::open(&args.trace)
        .with_context(|| format!("Failed to open trace {}", args.trace.display()))?;

    let mut branch_infos: HashMap<u64, BranchInfo> = HashMap::new();
    let mut num_entries = 0u64;
    let mut num_taken = 0u64;
    let pbar = indicatif::ProgressBar::new_spinner();
    pbar.set_style(get_spinner_style());
    for record in TraceReader::new(BufReader::new(file))? {
        let record = record?;
        let info = branch_infos.entry(record.address).or_default();
        info.execution_count += 1;
        info.taken_count += record.taken as u64;
        num_entries += 1;
        num_taken += record.taken as u64;
        if num_entries % 4096 == 0 {
            pbar.set_position(num_entries);
        }
    }
    pbar.finish_and_clear();

    println!(
        "Got {} branches and {} entries",
        branch_infos.len(),
        num_entries
    );
    if num_entries > 0 {
        println!(
            "- Taken rate: {}% = {} / {}",
            format_accuracy(num_taken as f64 * 100.0 / num_entries as f64),
            num_taken,
            num_entries
        );
    }

    println!("Top branches by execution count:");
    let mut items: Vec<(&u64, &BranchInfo)> = branch_infos.iter().collect();
    // ties broken by address to keep the output stable
    items.sort_by_key(|(address, info)| (std::cmp::Reverse(info.execution_count), **address));
    let mut table = vec![];
    for (address, info) in items.iter().take(args.top) {
        table.push(vec![
            format!("0x{:08x}", address).cell(),
            address.cell(),
            info.execution_count.cell(),
            format_accuracy(info.taken_count as f64 * 100.0 / info.execution_count as f64).cell(),
        ]);
    }
    let table = table.table().title(vec![
        "Branch PC".cell(),
        "Branch Address".cell(),
        "Execution Count".cell(),
        "Taken Rate (%)".cell(),
    ]);
    print_stdout(table)?;

    Ok(())
}
