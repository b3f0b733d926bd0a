//! Retrain Binary
//!
//! Trains an assistant, retraining only the components whose inputs changed.
//!
//! Commands: train, core, nlu

use clap::Parser;
use retrain::*;

#[tokio::main]
async fn main() {
    if let Err(e) = log() {
        eprintln!("failed to initialize logging: {:#}", e);
    }
    match cli::Cli::parse().command().run().await {
        Ok(outcome) => std::process::exit(outcome.code()),
        Err(e) => {
            log::error!("{:#}", e);
            std::process::exit(1);
        }
    }
}
