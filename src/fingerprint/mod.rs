//! Fingerprints of training inputs and the retrain decision derived from them.
pub mod comparison;
pub use comparison::*;

pub mod dryrun;
pub use dryrun::*;

pub mod fingerprint;
pub use fingerprint::*;

pub mod section;
pub use section::*;
