mod bimodal;
mod config;
mod counter;
mod error;
mod gshare;
mod hash;
mod history;
mod hybrid;
mod one_bit;
mod predictor;
mod simulate;
mod snapshot;
mod static_predictor;
mod trace;
mod two_bit;
mod utils;

pub use bimodal::*;
pub use config::*;
pub use counter::*;
pub use error::*;
pub use gshare::*;
pub use hash::*;
pub use history::*;
pub use hybrid::*;
pub use one_bit::*;
pub use predictor::*;
pub use simulate::*;
pub use snapshot::*;
pub use static_predictor::*;
pub use trace::*;
pub use two_bit::*;
pub use utils::*;
