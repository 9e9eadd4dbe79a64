use std::path::{Path, PathBuf};

pub fn get_tqdm_style() -> indicatif::ProgressStyle {
    indicatif::ProgressStyle::with_template(
            "{percent:>3}% |{wide_bar}| {pos}/{len} [{elapsed_precise}<{eta_precise}, {custom_per_sec}]",
        )
        .unwrap()
        .with_key(
            "custom_per_sec",
            Box::new(|s: &indicatif::ProgressState, w: &mut dyn std::fmt::Write| write!(w, "{:.2} it/s", s.per_sec()).unwrap()),
        ).progress_chars("██ ")
}

pub fn get_spinner_style() -> indicatif::ProgressStyle {
    indicatif::ProgressStyle::with_template("{spinner} {pos} records [{elapsed_precise}, {per_sec}]")
        .unwrap()
}

pub const REALTIME_LOG_HEADER: &str = "Predictor, Branches Processed, Cumulative Accuracy (%)";

/// Row of the realtime accuracy log, accuracy printed with at least one decimal
pub fn format_realtime_row(predictor: &str, branches_processed: u64, accuracy: f64) -> String {
    format!("{}, {}, {:?}", predictor, branches_processed, accuracy)
}

/// Line of a per-predictor outcome log
pub fn format_log_line(branch_num: u64, correct: bool) -> String {
    format!("Branch: {}, Correct: {}", branch_num, correct as u8)
}

pub fn format_accuracy(accuracy: f64) -> String {
    format!("{:.2}", accuracy)
}

/// Per-predictor outcome log, e.g. `logs/Two Bit_log.txt`
pub fn get_log_path<P: AsRef<Path>>(dir: P, predictor: &str) -> PathBuf {
    dir.as_ref().join(format!("{}_log.txt", predictor))
}

/// Final table dump, e.g. `bht_logs/Bimodal_bht.txt`
pub fn get_bht_path<P: AsRef<Path>>(dir: P, predictor: &str) -> PathBuf {
    dir.as_ref().join(format!("{}_bht.txt", predictor))
}
