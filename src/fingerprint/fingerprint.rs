use super::*;
use crate::data::TrainingData;
use anyhow::Context;
use serde::Deserialize;
use serde::Serialize;
use sha2::Digest;
use sha2::Sha256;
use std::path::Path;

/// Content digests of the training inputs a model was built from.
///
/// Each entry is the SHA-256 of the canonical JSON form of one input
/// section, so reordering keys or reformatting YAML leaves it unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fingerprint {
    pub config_core: String,
    pub config_nlu: String,
    pub domain: String,
    pub responses: String,
    pub stories: String,
    pub nlu: String,
    pub version: String,
    /// Milliseconds since the unix epoch. Not part of any section.
    pub trained_at: u64,
}

impl Fingerprint {
    pub fn of(data: &TrainingData) -> anyhow::Result<Self> {
        Ok(Self {
            config_core: Self::digest(&data.config.core())?,
            config_nlu: Self::digest(&data.config.nlu())?,
            domain: Self::digest(&data.domain.without_responses())?,
            responses: Self::digest(&data.domain.responses())?,
            stories: Self::digest(&(&data.stories, &data.rules))?,
            nlu: Self::digest(&data.nlu)?,
            version: crate::VERSION.to_string(),
            trained_at: crate::now(),
        })
    }

    /// Read `fingerprint.json` from a model directory.
    pub fn load(dir: &Path) -> anyhow::Result<Self> {
        let path = dir.join(crate::FINGERPRINT_FILE);
        let file = std::fs::File::open(&path).with_context(|| format!("open {}", path.display()))?;
        serde_json::from_reader(std::io::BufReader::new(file))
            .with_context(|| format!("parse {}", path.display()))
    }

    /// Write `fingerprint.json` into a model directory.
    pub fn save(&self, dir: &Path) -> anyhow::Result<()> {
        let path = dir.join(crate::FINGERPRINT_FILE);
        std::fs::write(&path, serde_json::to_vec_pretty(self)?)
            .with_context(|| format!("write {}", path.display()))
    }

    /// Did anything the section depends on change between the two?
    pub fn changed(&self, other: &Self, section: Section) -> bool {
        self.entries(section) != other.entries(section)
    }

    fn entries(&self, section: Section) -> Vec<&String> {
        match section {
            Section::Core => vec![&self.config_core, &self.domain, &self.stories, &self.version],
            Section::Nlu => vec![&self.config_nlu, &self.nlu, &self.version],
            Section::Nlg => vec![&self.responses],
        }
    }

    fn digest<T>(value: &T) -> anyhow::Result<String>
    where
        T: Serialize,
    {
        let canonical = Self::canonical(serde_json::to_value(value)?);
        Ok(hex::encode(Sha256::digest(serde_json::to_vec(&canonical)?)))
    }

    /// Rebuild every object with its keys in sorted order.
    fn canonical(value: serde_json::Value) -> serde_json::Value {
        use serde_json::Value;
        match value {
            Value::Array(items) => Value::Array(items.into_iter().map(Self::canonical).collect()),
            Value::Object(map) => {
                let mut entries = map.into_iter().collect::<Vec<_>>();
                entries.sort_by(|a, b| a.0.cmp(&b.0));
                Value::Object(
                    entries
                        .into_iter()
                        .map(|(k, v)| (k, Self::canonical(v)))
                        .collect(),
                )
            }
            scalar => scalar,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Config;
    use crate::data::Domain;

    fn data(config: &str, domain: &str, nlu: &str, stories: &str) -> TrainingData {
        TrainingData {
            config: Config::from(serde_yaml::from_str::<serde_yaml::Mapping>(config).unwrap()),
            domain: Domain::from(serde_yaml::from_str::<serde_yaml::Mapping>(domain).unwrap()),
            nlu: serde_yaml::from_str(nlu).unwrap(),
            stories: serde_yaml::from_str(stories).unwrap(),
            rules: Vec::new(),
        }
    }

    fn moodbot() -> TrainingData {
        data(
            "language: en\npipeline: [{name: DIETClassifier}]\npolicies: [{name: RulePolicy}]\n",
            "intents: [greet]\nresponses:\n  utter_greet:\n  - text: hey\n",
            "- intent: greet\n  examples: '- hi'\n",
            "- story: happy\n  steps: [{intent: greet}, {action: utter_greet}]\n",
        )
    }

    #[test]
    fn same_inputs_same_sections() {
        let a = Fingerprint::of(&moodbot()).unwrap();
        let b = Fingerprint::of(&moodbot()).unwrap();
        assert!(Section::all().iter().all(|s| !a.changed(&b, *s)));
    }

    #[test]
    fn key_order_is_irrelevant() {
        let a = Fingerprint::of(&moodbot()).unwrap();
        let b = Fingerprint::of(&data(
            "policies: [{name: RulePolicy}]\npipeline: [{name: DIETClassifier}]\nlanguage: en\n",
            "responses:\n  utter_greet:\n  - text: hey\nintents: [greet]\n",
            "- examples: '- hi'\n  intent: greet\n",
            "- steps: [{intent: greet}, {action: utter_greet}]\n  story: happy\n",
        ))
        .unwrap();
        assert!(a.config_core == b.config_core);
        assert!(a.config_nlu == b.config_nlu);
        assert!(a.domain == b.domain);
        assert!(a.responses == b.responses);
        assert!(a.nlu == b.nlu);
        assert!(a.stories == b.stories);
    }

    #[test]
    fn response_edit_touches_only_nlg() {
        let old = Fingerprint::of(&moodbot()).unwrap();
        let mut edited = moodbot();
        edited.domain = Domain::from(
            serde_yaml::from_str::<serde_yaml::Mapping>(
                "intents: [greet]\nresponses:\n  utter_greet:\n  - text: hello there\n",
            )
            .unwrap(),
        );
        let new = Fingerprint::of(&edited).unwrap();
        assert!(new.changed(&old, Section::Nlg));
        assert!(!new.changed(&old, Section::Core));
        assert!(!new.changed(&old, Section::Nlu));
    }

    #[test]
    fn pipeline_edit_touches_only_nlu() {
        let old = Fingerprint::of(&moodbot()).unwrap();
        let mut edited = moodbot();
        edited.config = Config::from(
            serde_yaml::from_str::<serde_yaml::Mapping>(
                "language: en\npipeline: [{name: KeywordIntentClassifier}]\npolicies: [{name: RulePolicy}]\n",
            )
            .unwrap(),
        );
        let new = Fingerprint::of(&edited).unwrap();
        assert!(new.changed(&old, Section::Nlu));
        assert!(!new.changed(&old, Section::Core));
    }

    #[test]
    fn new_rule_touches_only_core() {
        let old = Fingerprint::of(&moodbot()).unwrap();
        let mut edited = moodbot();
        edited.rules = serde_yaml::from_str("- rule: greet back\n  steps: []\n").unwrap();
        let new = Fingerprint::of(&edited).unwrap();
        assert!(new.changed(&old, Section::Core));
        assert!(!new.changed(&old, Section::Nlu));
        assert!(!new.changed(&old, Section::Nlg));
    }

    #[test]
    fn version_bump_touches_core_and_nlu() {
        let old = Fingerprint::of(&moodbot()).unwrap();
        let new = Fingerprint {
            version: String::from("0.0.0-older"),
            ..old.clone()
        };
        assert!(new.changed(&old, Section::Core));
        assert!(new.changed(&old, Section::Nlu));
        assert!(!new.changed(&old, Section::Nlg));
    }

    #[test]
    fn saved_fingerprint_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let fingerprint = Fingerprint::of(&moodbot()).unwrap();
        fingerprint.save(dir.path()).unwrap();
        assert!(Fingerprint::load(dir.path()).unwrap() == fingerprint);
    }
}
