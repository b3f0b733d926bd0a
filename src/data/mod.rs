//! Training inputs: configuration, domain and data files.
mod yaml;

pub mod config;
pub use config::*;

pub mod domain;
pub use domain::*;

pub mod training;
pub use training::*;
