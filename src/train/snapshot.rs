//! Snapshot backend - materializes what each component is trained on

use super::*;
use crate::data::TrainingData;
use anyhow::Context;
use serde::Serialize;
use serde_yaml::Mapping;
use serde_yaml::Value;
use std::path::Path;

const NLU_FILE: &str = "nlu.json";
const CORE_FILE: &str = "core.json";
const RESPONSES_FILE: &str = "responses.json";

/// Writes the normalized inputs of every component as JSON, so that a
/// model framework can fit them later from exactly what was fingerprinted.
#[derive(Debug, Clone, Copy, Default)]
pub struct Snapshot;

#[derive(Serialize)]
struct Nlu<'a> {
    config: Mapping,
    examples: &'a [Value],
}

#[derive(Serialize)]
struct Core<'a> {
    config: Mapping,
    domain: Mapping,
    stories: &'a [Value],
    rules: &'a [Value],
    interpreter: Option<&'a Path>,
}

impl Snapshot {
    fn write<T>(out: &Path, name: &str, value: &T) -> anyhow::Result<()>
    where
        T: Serialize,
    {
        std::fs::create_dir_all(out).with_context(|| format!("create {}", out.display()))?;
        let path = out.join(name);
        let file = std::fs::File::create(&path).with_context(|| format!("create {}", path.display()))?;
        serde_json::to_writer_pretty(std::io::BufWriter::new(file), value)
            .with_context(|| format!("write {}", path.display()))?;
        log::debug!("{:<32}{}", "snapshot written", path.display());
        Ok(())
    }
}

#[async_trait::async_trait]
impl Trainer for Snapshot {
    async fn train_nlu(&self, data: &TrainingData, out: &Path) -> anyhow::Result<()> {
        let nlu = Nlu {
            config: data.config.nlu(),
            examples: &data.nlu,
        };
        Self::write(out, NLU_FILE, &nlu)
    }

    async fn train_core(
        &self,
        data: &TrainingData,
        interpreter: Option<&Path>,
        out: &Path,
    ) -> anyhow::Result<()> {
        // the scratch directory is moved once training is done,
        // so an interpreter inside the model is recorded relative to it
        let interpreter = interpreter.map(|path| {
            out.parent()
                .and_then(|root| path.strip_prefix(root).ok())
                .unwrap_or(path)
        });
        let core = Core {
            config: data.config.core(),
            domain: data.domain.without_responses(),
            stories: &data.stories,
            rules: &data.rules,
            interpreter,
        };
        Self::write(out, CORE_FILE, &core)?;
        self.update_responses(data, out).await
    }

    async fn update_responses(&self, data: &TrainingData, out: &Path) -> anyhow::Result<()> {
        Self::write(out, RESPONSES_FILE, &data.domain.responses())
    }
}
