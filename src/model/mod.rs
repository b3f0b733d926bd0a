//! Trained models on disk.
mod copy;
use copy::*;

pub mod model;
pub use model::*;
