//! Training orchestration.
//!
//! 1. Fingerprint the inputs and compare against the latest model
//! 2. Carry over the components that did not change
//! 3. Train NLU, then Core behind the NLU interpreter
//! 4. Store the result as a new model

mod outcome;
mod session;
mod snapshot;
mod trainer;

pub use outcome::*;
pub use session::*;
pub use snapshot::*;
pub use trainer::*;
