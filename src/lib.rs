//! Retraining decisions and training orchestration for conversational assistants.
//!
//! An assistant is trained from a config, a domain and a set of data files
//! (NLU examples, stories, rules). Every trained model carries a fingerprint
//! of those inputs, so the next run can tell which components changed and
//! retrain only those.
pub mod data;
pub mod fingerprint;
pub mod model;
pub mod train;

#[cfg(feature = "cli")]
pub mod cli;

pub use data::*;
pub use fingerprint::*;
pub use model::*;
pub use train::*;

// ============================================================================
// DEFAULT PATHS
// ============================================================================
/// Pipeline and policy configuration of the assistant.
pub const DEFAULT_CONFIG_PATH: &str = "config.yml";
/// Domain with intents, slots, actions and responses.
pub const DEFAULT_DOMAIN_PATH: &str = "domain.yml";
/// Root of the Core and NLU data files.
pub const DEFAULT_DATA_PATH: &str = "data";
/// NLU data used by `retrain nlu`.
pub const DEFAULT_NLU_DATA_PATH: &str = "data/nlu.yml";
/// Stories and rules used by `retrain core`.
pub const DEFAULT_STORIES_PATH: &str = "data/stories.yml";
/// Where trained models are stored.
pub const DEFAULT_MODELS_PATH: &str = "models";

// ============================================================================
// MODEL LAYOUT
// ============================================================================
/// Fingerprint of the training inputs, stored at the root of every model.
pub const FINGERPRINT_FILE: &str = "fingerprint.json";
/// Subdirectory holding the dialogue policies.
pub const CORE_SUBDIRECTORY: &str = "core";
/// Subdirectory holding the NLU pipeline (the interpreter).
pub const NLU_SUBDIRECTORY: &str = "nlu";
/// Name prefix of models produced by `retrain core`.
pub const CORE_MODEL_PREFIX: &str = "core-";
/// Name prefix of models produced by `retrain nlu`.
pub const NLU_MODEL_PREFIX: &str = "nlu-";
/// Prefix of the scratch directories a training run works in.
pub const TEMP_PREFIX: &str = "retrain-";

// ============================================================================
// ENVIRONMENT
// ============================================================================
/// Overrides the root under which scratch training directories are created.
pub const TMPDIR_ENV: &str = "RETRAIN_TMPDIR";
/// Version recorded in fingerprints. A model trained by another version is retrained.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "cli")]
pub fn log() -> anyhow::Result<()> {
    std::fs::create_dir_all("logs")?;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", now() / 1000))?,
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file])?;
    Ok(())
}

/// Milliseconds since the unix epoch. Zero if the clock is set before it.
pub fn now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
