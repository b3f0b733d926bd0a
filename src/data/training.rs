use super::*;
use serde_yaml::Value;
use std::path::Path;
use std::path::PathBuf;

const NLU: &str = "nlu";
const STORIES: &str = "stories";
const RULES: &str = "rules";

/// Everything a training run reads, loaded and validated up front.
///
/// Blocks keep the order of their files (sorted by path) and, within a file,
/// the order they were written in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingData {
    pub config: Config,
    pub domain: Domain,
    pub nlu: Vec<Value>,
    pub stories: Vec<Value>,
    pub rules: Vec<Value>,
}

impl TrainingData {
    pub fn load<P>(config: &Path, domain: Option<&Path>, data: &[P]) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        let mut training = Self {
            config: Config::load(config)?,
            domain: Domain::load(domain)?,
            ..Self::default()
        };
        for file in Self::files(data)? {
            training.absorb(&file)?;
        }
        log::debug!(
            "{:<32}{} nlu / {} stories / {} rules",
            "loaded training data",
            training.nlu.len(),
            training.stories.len(),
            training.rules.len()
        );
        Ok(training)
    }

    /// Is there anything to train the NLU model on?
    pub fn has_nlu(&self) -> bool {
        !self.nlu.is_empty()
    }

    /// Is there anything to train the dialogue model on?
    pub fn has_core(&self) -> bool {
        !self.stories.is_empty() || !self.rules.is_empty()
    }

    fn absorb(&mut self, path: &Path) -> anyhow::Result<()> {
        let ref document = yaml::mapping(path)?;
        for (key, blocks) in [
            (NLU, &mut self.nlu),
            (STORIES, &mut self.stories),
            (RULES, &mut self.rules),
        ] {
            match document.get(key) {
                None | Some(Value::Null) => continue,
                Some(Value::Sequence(items)) => blocks.extend(items.iter().cloned()),
                Some(_) => anyhow::bail!(
                    "'{}' in '{}' must be a list. Please verify the data format.",
                    key,
                    path.display()
                ),
            }
        }
        Ok(())
    }

    /// Data files under the given paths. Directories are searched
    /// recursively for YAML files; paths that do not exist are skipped.
    fn files<P>(paths: &[P]) -> anyhow::Result<Vec<PathBuf>>
    where
        P: AsRef<Path>,
    {
        let mut files = Vec::new();
        for path in paths.iter().map(AsRef::as_ref) {
            if path.is_file() {
                files.push(path.to_path_buf());
            } else if path.is_dir() {
                Self::walk(path, &mut files)?;
            } else {
                log::warn!("{:<32}{}", "data path not found", path.display());
            }
        }
        files.sort();
        files.dedup();
        Ok(files)
    }

    fn walk(dir: &Path, files: &mut Vec<PathBuf>) -> anyhow::Result<()> {
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_dir() {
                Self::walk(&path, files)?;
            } else if Self::is_yaml(&path) {
                files.push(path);
            }
        }
        Ok(())
    }

    fn is_yaml(path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map_or(false, |e| e == "yml" || e == "yaml")
    }
}
