use crate::fingerprint::DryRun;
use crate::model::Model;

/// How a training command ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Nothing was trained; this is what would have been.
    DryRun(DryRun),
    /// A new model was stored.
    Trained(Model),
    /// The inputs match the latest model, which stays in use.
    UpToDate(Model),
    /// There was nothing to train the requested component on.
    Skipped,
}

impl Outcome {
    /// Process exit status. Dry runs report their bitmask.
    pub fn code(&self) -> i32 {
        match self {
            Self::DryRun(run) => run.code as i32,
            _ => 0,
        }
    }

    pub fn model(&self) -> Option<&Model> {
        match self {
            Self::Trained(model) | Self::UpToDate(model) => Some(model),
            _ => None,
        }
    }
}
