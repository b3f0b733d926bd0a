//! Trainer trait - the boundary to whatever actually fits the models

use crate::data::TrainingData;
use std::path::Path;

/// A training backend.
/// Each method writes one component into the directory `out`.
#[async_trait::async_trait]
pub trait Trainer: Send + Sync {
    /// Fit the NLU pipeline on the NLU examples.
    async fn train_nlu(&self, data: &TrainingData, out: &Path) -> anyhow::Result<()>;
    /// Fit the dialogue policies on stories and rules. `interpreter` is the
    /// NLU model the policies will run behind, freshly trained or reused.
    async fn train_core(
        &self,
        data: &TrainingData,
        interpreter: Option<&Path>,
        out: &Path,
    ) -> anyhow::Result<()>;
    /// Refresh the response templates of a Core model that is kept as is.
    async fn update_responses(&self, data: &TrainingData, out: &Path) -> anyhow::Result<()>;
}
