use super::*;
use serde_yaml::Mapping;
use serde_yaml::Value;
use std::path::Path;

const LANGUAGE: &str = "language";
const PIPELINE: &str = "pipeline";
const POLICIES: &str = "policies";

const DEFAULT_LANGUAGE: &str = "en";
const DEFAULT_PIPELINE: &str = r#"
- name: WhitespaceTokenizer
- name: RegexFeaturizer
- name: LexicalSyntacticFeaturizer
- name: CountVectorsFeaturizer
- name: CountVectorsFeaturizer
  analyzer: char_wb
  min_ngram: 1
  max_ngram: 4
- name: DIETClassifier
  epochs: 100
- name: EntitySynonymMapper
- name: ResponseSelector
  epochs: 100
- name: FallbackClassifier
  threshold: 0.3
"#;
const DEFAULT_POLICIES: &str = r#"
- name: MemoizationPolicy
- name: TEDPolicy
  max_history: 5
  epochs: 100
- name: RulePolicy
"#;

/// Components a training run covers.
/// Decides which defaults autoconfiguration may fill in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingType {
    Core,
    Nlu,
    Both,
}

impl TrainingType {
    pub fn core(&self) -> bool {
        matches!(self, Self::Core | Self::Both)
    }
    pub fn nlu(&self) -> bool {
        matches!(self, Self::Nlu | Self::Both)
    }
}

impl std::fmt::Display for TrainingType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Core => write!(f, "core"),
            Self::Nlu => write!(f, "nlu"),
            Self::Both => write!(f, "core+nlu"),
        }
    }
}

/// Pipeline and policy configuration.
///
/// `language` and `pipeline` configure the NLU model, `policies` the
/// dialogue model. Any other keys are kept as they are.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config(Mapping);

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        yaml::mapping(path).map(Self)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn language(&self) -> Option<&str> {
        self.get(LANGUAGE).and_then(Value::as_str)
    }

    /// Fill in whatever the training type needs and the user left out.
    /// Returns the keys that were filled.
    pub fn autoconfigure(&mut self, kind: TrainingType) -> anyhow::Result<Vec<&'static str>> {
        let mut filled = Vec::new();
        if !yaml::present(&self.0, LANGUAGE) {
            self.0.insert(LANGUAGE.into(), DEFAULT_LANGUAGE.into());
            filled.push(LANGUAGE);
        }
        if kind.nlu() && !yaml::present(&self.0, PIPELINE) {
            self.0.insert(PIPELINE.into(), serde_yaml::from_str(DEFAULT_PIPELINE)?);
            filled.push(PIPELINE);
        }
        if kind.core() && !yaml::present(&self.0, POLICIES) {
            self.0.insert(POLICIES.into(), serde_yaml::from_str(DEFAULT_POLICIES)?);
            filled.push(POLICIES);
        }
        for key in filled.iter() {
            log::info!("{:<32}{:<32}", format!("autoconfigured ({})", kind), key);
        }
        Ok(filled)
    }

    /// The part of the configuration the dialogue model depends on.
    pub fn core(&self) -> Mapping {
        yaml::without(&self.0, &[LANGUAGE, PIPELINE])
    }

    /// The part of the configuration the NLU model depends on.
    pub fn nlu(&self) -> Mapping {
        yaml::without(&self.0, &[POLICIES])
    }
}

impl From<Mapping> for Config {
    fn from(mapping: Mapping) -> Self {
        Self(mapping)
    }
}
