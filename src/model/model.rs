use super::*;
use crate::fingerprint::*;
use anyhow::Context;
use std::path::Path;
use std::path::PathBuf;

/// A trained model on disk.
///
/// ```text
/// <output>/<name>/
///     fingerprint.json
///     core/            dialogue policies, if trained
///     nlu/             NLU pipeline, if trained
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    path: PathBuf,
    fingerprint: Fingerprint,
}

impl Model {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        Ok(Self {
            fingerprint: Fingerprint::load(path)?,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }

    pub fn core(&self) -> Option<PathBuf> {
        Some(self.path.join(crate::CORE_SUBDIRECTORY)).filter(|p| p.is_dir())
    }

    pub fn nlu(&self) -> Option<PathBuf> {
        Some(self.path.join(crate::NLU_SUBDIRECTORY)).filter(|p| p.is_dir())
    }

    /// The most recently trained model under `output`.
    /// Directories without a readable fingerprint are not models.
    pub fn latest(output: &Path) -> Option<Self> {
        std::fs::read_dir(output)
            .ok()?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .filter_map(|path| match Self::open(&path) {
                Ok(model) => Some(model),
                Err(e) => {
                    log::debug!("{:<32}{:#}", "skipping directory", e);
                    None
                }
            })
            .max_by(|a, b| {
                a.fingerprint
                    .trained_at
                    .cmp(&b.fingerprint.trained_at)
                    .then_with(|| a.path.cmp(&b.path))
            })
    }

    /// Components this model cannot hand over have to be retrained.
    /// Only looks at what is on disk, nothing is copied.
    pub fn reusable(&self, result: FingerprintComparisonResult) -> FingerprintComparisonResult {
        let mut result = result;
        if !result.should_retrain_core() && self.core().is_none() {
            log::info!("{:<32}{:<32}", "nothing to reuse", crate::CORE_SUBDIRECTORY);
            result.core = true;
            result.nlg = true;
        }
        if !result.should_retrain_nlu() && self.nlu().is_none() {
            log::info!("{:<32}{:<32}", "nothing to reuse", crate::NLU_SUBDIRECTORY);
            result.nlu = true;
        }
        result
    }

    /// Copy the components that do not need retraining into `train`.
    /// A component that cannot be carried over has to be retrained.
    pub fn reuse(&self, result: FingerprintComparisonResult, train: &Path) -> FingerprintComparisonResult {
        let mut result = result;
        if !result.should_retrain_core() {
            if let Some(core) = self.core() {
                if !Self::restore(&core, &train.join(crate::CORE_SUBDIRECTORY)) {
                    result.core = true;
                    result.nlg = true;
                }
            }
        }
        if !result.should_retrain_nlu() {
            if let Some(nlu) = self.nlu() {
                if !Self::restore(&nlu, &train.join(crate::NLU_SUBDIRECTORY)) {
                    result.nlu = true;
                }
            }
        }
        result
    }

    fn restore(from: &Path, to: &Path) -> bool {
        match copy(from, to) {
            Ok(()) => {
                log::info!("{:<32}{}", "reusing", from.display());
                true
            }
            Err(e) => {
                log::warn!("{:<32}{} ({})", "failed to reuse", from.display(), e);
                false
            }
        }
    }

    /// Move a finished training directory to `<output>/<name>`,
    /// replacing a model of the same name. The replaced model is only
    /// deleted once the new one is in place.
    pub fn persist(train: &Path, output: &Path, name: &str) -> anyhow::Result<Self> {
        std::fs::create_dir_all(output).with_context(|| format!("create {}", output.display()))?;
        let target = output.join(name);
        let replaced = match target.exists() {
            false => None,
            true => {
                let aside = tempfile::Builder::new()
                    .prefix(".replaced-")
                    .tempdir_in(output)
                    .with_context(|| format!("create backup directory in {}", output.display()))?;
                std::fs::rename(&target, aside.path().join(name))
                    .with_context(|| format!("move aside {}", target.display()))?;
                Some(aside)
            }
        };
        if let Err(e) = Self::place(train, &target) {
            if let Some(aside) = replaced {
                let _ = std::fs::remove_dir_all(&target);
                if let Err(restore) = std::fs::rename(aside.path().join(name), &target) {
                    log::error!("{:<32}{} ({})", "failed to restore", target.display(), restore);
                    let kept = aside.keep();
                    log::error!("{:<32}{}", "previous model kept at", kept.join(name).display());
                }
            }
            return Err(e);
        }
        drop(replaced);
        log::info!("{:<32}{}", "model stored", target.display());
        Self::open(&target)
    }

    fn place(train: &Path, target: &Path) -> anyhow::Result<()> {
        if std::fs::rename(train, target).is_err() {
            copy(train, target).with_context(|| format!("copy model to {}", target.display()))?;
        }
        Ok(())
    }

    /// `fixed` if given, otherwise the prefix followed by the training time,
    /// with a counter appended if a model of that name already exists.
    pub fn name(output: &Path, prefix: &str, fixed: Option<&str>, fingerprint: &Fingerprint) -> String {
        match fixed {
            Some(name) => name.to_string(),
            None => {
                let base = format!("{}{}", prefix, fingerprint.trained_at);
                let mut name = base.clone();
                let mut n = 0;
                while output.join(&name).exists() {
                    n += 1;
                    name = format!("{}-{}", base, n);
                }
                name
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fingerprint(trained_at: u64) -> Fingerprint {
        Fingerprint {
            config_core: String::new(),
            config_nlu: String::new(),
            domain: String::new(),
            responses: String::new(),
            stories: String::new(),
            nlu: String::new(),
            version: crate::VERSION.to_string(),
            trained_at,
        }
    }

    fn model(output: &Path, name: &str, trained_at: u64, components: &[&str]) -> PathBuf {
        let path = output.join(name);
        std::fs::create_dir_all(&path).unwrap();
        fingerprint(trained_at).save(&path).unwrap();
        for component in components {
            std::fs::create_dir_all(path.join(component)).unwrap();
            std::fs::write(path.join(component).join("weights"), component).unwrap();
        }
        path
    }

    #[test]
    fn latest_is_newest_fingerprint() {
        let dir = tempfile::tempdir().unwrap();
        model(dir.path(), "b", 10, &[]);
        let newest = model(dir.path(), "a", 20, &[]);
        std::fs::create_dir_all(dir.path().join("not-a-model")).unwrap();
        assert!(Model::latest(dir.path()).unwrap().path() == newest);
    }

    #[test]
    fn latest_of_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Model::latest(dir.path()).is_none());
        assert!(Model::latest(&dir.path().join("missing")).is_none());
    }

    #[test]
    fn reuse_copies_kept_components() {
        let dir = tempfile::tempdir().unwrap();
        let train = tempfile::tempdir().unwrap();
        let old = Model::open(&model(dir.path(), "old", 1, &["core", "nlu"])).unwrap();
        let result = FingerprintComparisonResult::new(false, false, true, false);
        assert!(old.reuse(result, train.path()) == result);
        assert!(train.path().join("core").join("weights").is_file());
        assert!(train.path().join("nlu").join("weights").is_file());
    }

    #[test]
    fn reuse_missing_component_means_retrain() {
        let dir = tempfile::tempdir().unwrap();
        let train = tempfile::tempdir().unwrap();
        let old = Model::open(&model(dir.path(), "nlu-1", 1, &["nlu"])).unwrap();
        let result = old.reusable(FingerprintComparisonResult::new(false, false, true, false));
        assert!(result == FingerprintComparisonResult::new(true, false, true, false));
        let result = old.reusable(FingerprintComparisonResult::new(false, false, false, false));
        assert!(result == FingerprintComparisonResult::new(true, false, true, false));
        old.reuse(result, train.path());
        assert!(!train.path().join("core").exists());
        assert!(train.path().join("nlu").join("weights").is_file());
    }

    #[test]
    fn reuse_skips_retrained_components() {
        let dir = tempfile::tempdir().unwrap();
        let train = tempfile::tempdir().unwrap();
        let old = Model::open(&model(dir.path(), "old", 1, &["core", "nlu"])).unwrap();
        old.reuse(FingerprintComparisonResult::new(false, true, false, false), train.path());
        assert!(train.path().join("core").is_dir());
        assert!(!train.path().join("nlu").exists());
    }

    #[test]
    fn persist_replaces_fixed_name() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("models");
        let first = model(dir.path(), "first", 1, &["core"]);
        Model::persist(&first, &output, "bot").unwrap();
        let second = model(dir.path(), "second", 2, &["nlu"]);
        let stored = Model::persist(&second, &output, "bot").unwrap();
        assert!(stored.fingerprint().trained_at == 2);
        assert!(stored.nlu().is_some());
        assert!(stored.core().is_none());
        assert!(!first.exists() && !second.exists());
    }

    #[test]
    fn reusable_copies_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let old = Model::open(&model(dir.path(), "old", 1, &["core", "nlu"])).unwrap();
        let result = FingerprintComparisonResult::new(false, false, false, false);
        assert!(old.reusable(result) == result);
        assert!(std::fs::read_dir(dir.path()).unwrap().count() == 1);
    }

    #[test]
    fn persist_keeps_old_model_when_placing_fails() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("models");
        let first = model(dir.path(), "first", 1, &["core"]);
        Model::persist(&first, &output, "bot").unwrap();
        let missing = dir.path().join("missing");
        assert!(Model::persist(&missing, &output, "bot").is_err());
        let kept = Model::open(&output.join("bot")).unwrap();
        assert!(kept.fingerprint().trained_at == 1);
        assert!(kept.core().is_some());
        assert!(std::fs::read_dir(&output).unwrap().count() == 1);
    }

    #[test]
    fn names() {
        let dir = tempfile::tempdir().unwrap();
        let ref fingerprint = fingerprint(42);
        assert!(Model::name(dir.path(), "core-", None, fingerprint) == "core-42");
        assert!(Model::name(dir.path(), "core-", Some("test-1234"), fingerprint) == "test-1234");
        assert!(Model::name(dir.path(), "", None, fingerprint) == "42");
    }

    #[test]
    fn names_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let ref fingerprint = fingerprint(42);
        std::fs::create_dir_all(dir.path().join("42")).unwrap();
        std::fs::create_dir_all(dir.path().join("42-1")).unwrap();
        assert!(Model::name(dir.path(), "", None, fingerprint) == "42-2");
        assert!(Model::name(dir.path(), "", Some("42"), fingerprint) == "42");
    }
}
