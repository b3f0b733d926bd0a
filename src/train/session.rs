//! Training session - fingerprint, compare, train what changed, store

use super::*;
use crate::data::TrainingData;
use crate::data::TrainingType;
use crate::fingerprint::*;
use crate::model::Model;
use anyhow::Context;
use std::path::PathBuf;
use tempfile::TempDir;

/// One training command against an output directory of models.
///
/// Work happens in a scratch directory under the temp root, which is moved
/// into the output directory once everything succeeded and removed
/// otherwise.
pub struct Session<T> {
    trainer: T,
    output: PathBuf,
    tmp: Option<PathBuf>,
    force: bool,
    dry_run: bool,
    fixed_model_name: Option<String>,
}

impl<T> Session<T>
where
    T: Trainer,
{
    pub fn new(trainer: T, output: impl Into<PathBuf>) -> Self {
        Self {
            trainer,
            output: output.into(),
            tmp: None,
            force: false,
            dry_run: false,
            fixed_model_name: None,
        }
    }

    /// Retrain everything even if the inputs did not change.
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Only report what would be retrained.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn fixed_model_name(mut self, name: Option<String>) -> Self {
        self.fixed_model_name = name;
        self
    }

    /// Root for scratch directories. Defaults to `$RETRAIN_TMPDIR`, then the system temp dir.
    pub fn tmp(mut self, root: impl Into<PathBuf>) -> Self {
        self.tmp = Some(root.into());
        self
    }

    pub fn trainer(&self) -> &T {
        &self.trainer
    }

    /// Train Core and NLU, each only if its inputs changed since the latest model.
    pub async fn train(&self, data: TrainingData) -> anyhow::Result<Outcome> {
        let mut data = data;
        data.config.autoconfigure(TrainingType::Both)?;
        if !data.has_core() && !data.has_nlu() {
            anyhow::bail!("no training data given. Please provide stories, rules or NLU data in order to train a model");
        }
        let fingerprint = Fingerprint::of(&data)?;
        let previous = Model::latest(&self.output);
        let result = FingerprintComparisonResult::compare(
            &fingerprint,
            previous.as_ref().map(Model::fingerprint),
            self.force,
        );
        let result = match previous {
            Some(ref previous) => previous.reusable(result),
            None => result,
        };
        let result = result.restrict(data.has_core(), data.has_nlu());
        if self.dry_run {
            return Ok(Outcome::DryRun(DryRun::from(result)));
        }
        if !result.is_training_required() {
            if let Some(previous) = previous {
                log::info!("{:<32}{}", "nothing changed, keeping", previous.path().display());
                return Ok(Outcome::UpToDate(previous));
            }
        }
        let workspace = self.workspace()?;
        let result = match previous {
            Some(ref previous) => previous.reuse(result, workspace.path()),
            None => result,
        };
        let nlu = workspace.path().join(crate::NLU_SUBDIRECTORY);
        let core = workspace.path().join(crate::CORE_SUBDIRECTORY);
        if result.should_retrain_nlu() {
            if data.has_nlu() {
                log::info!("{:<32}{:<32}", "training", Section::Nlu);
                self.trainer.train_nlu(&data, &nlu).await?;
            } else {
                log::warn!("no NLU data present, only the Core model will be trained");
            }
        }
        if result.should_retrain_core() {
            if data.has_core() {
                let interpreter = Some(nlu.as_path()).filter(|p| p.is_dir());
                log::info!("{:<32}{:<32}", "training", Section::Core);
                self.trainer.train_core(&data, interpreter, &core).await?;
            } else {
                log::warn!("no stories or rules present, only the NLU model will be trained");
            }
        } else if result.should_retrain_nlg() {
            log::info!("{:<32}{:<32}", "updating", Section::Nlg);
            self.trainer.update_responses(&data, &core).await?;
        }
        self.store(workspace, &fingerprint, "")
    }

    /// Train the dialogue policies only. Always trains.
    pub async fn train_core(&self, data: TrainingData) -> anyhow::Result<Outcome> {
        let mut data = data;
        data.config.autoconfigure(TrainingType::Core)?;
        if data.domain.is_empty() {
            log::warn!("Core training was skipped because no valid domain was found.");
            return Ok(Outcome::Skipped);
        }
        if !data.has_core() {
            log::warn!("No stories given. Please provide stories in order to train a Core model.");
            return Ok(Outcome::Skipped);
        }
        let fingerprint = Fingerprint::of(&data)?;
        let workspace = self.workspace()?;
        let core = workspace.path().join(crate::CORE_SUBDIRECTORY);
        log::info!("{:<32}{:<32}", "training", Section::Core);
        self.trainer.train_core(&data, None, &core).await?;
        self.store(workspace, &fingerprint, crate::CORE_MODEL_PREFIX)
    }

    /// Train the NLU pipeline only. Always trains.
    pub async fn train_nlu(&self, data: TrainingData) -> anyhow::Result<Outcome> {
        let mut data = data;
        data.config.autoconfigure(TrainingType::Nlu)?;
        if !data.has_nlu() {
            log::warn!("No NLU data given. Please provide NLU data in order to train a model.");
            return Ok(Outcome::Skipped);
        }
        let fingerprint = Fingerprint::of(&data)?;
        let workspace = self.workspace()?;
        let nlu = workspace.path().join(crate::NLU_SUBDIRECTORY);
        log::info!("{:<32}{:<32}", "training", Section::Nlu);
        self.trainer.train_nlu(&data, &nlu).await?;
        self.store(workspace, &fingerprint, crate::NLU_MODEL_PREFIX)
    }

    fn store(&self, workspace: TempDir, fingerprint: &Fingerprint, prefix: &str) -> anyhow::Result<Outcome> {
        fingerprint.save(workspace.path())?;
        let name = Model::name(&self.output, prefix, self.fixed_model_name.as_deref(), fingerprint);
        Model::persist(workspace.path(), &self.output, &name).map(Outcome::Trained)
    }

    fn workspace(&self) -> anyhow::Result<TempDir> {
        let root = self
            .tmp
            .clone()
            .or_else(|| std::env::var_os(crate::TMPDIR_ENV).map(PathBuf::from))
            .unwrap_or_else(std::env::temp_dir);
        std::fs::create_dir_all(&root).with_context(|| format!("create {}", root.display()))?;
        tempfile::Builder::new()
            .prefix(crate::TEMP_PREFIX)
            .tempdir_in(&root)
            .with_context(|| format!("create scratch directory in {}", root.display()))
    }
}
