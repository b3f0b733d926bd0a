use super::*;
use serde_yaml::Mapping;
use serde_yaml::Value;
use std::path::Path;

const RESPONSES: &str = "responses";

/// Intents, entities, slots, actions and response templates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Domain(Mapping);

impl Domain {
    /// A missing domain is an empty one. NLU-only training does not need it.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            None => Ok(Self::default()),
            Some(path) if !path.exists() => {
                log::warn!("{:<32}{}", "domain not found", path.display());
                Ok(Self::default())
            }
            Some(path) => yaml::mapping(path).map(Self),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Response templates. Changing these only requires an NLG update.
    pub fn responses(&self) -> Mapping {
        match self.0.get(RESPONSES) {
            Some(Value::Mapping(responses)) => responses.clone(),
            _ => Mapping::new(),
        }
    }

    /// Everything the dialogue model is trained on.
    pub fn without_responses(&self) -> Mapping {
        yaml::without(&self.0, &[RESPONSES])
    }
}

impl From<Mapping> for Domain {
    fn from(mapping: Mapping) -> Self {
        Self(mapping)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn responses_are_split_off() {
        let domain = Domain::from(
            serde_yaml::from_str::<Mapping>(
                "intents: [greet]\nresponses:\n  utter_greet:\n  - text: hi\n",
            )
            .unwrap(),
        );
        assert!(domain.responses().contains_key("utter_greet"));
        assert!(domain.without_responses().contains_key("intents"));
        assert!(!domain.without_responses().contains_key(RESPONSES));
    }

    #[test]
    fn missing_domain_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let domain = Domain::load(Some(dir.path().join("domain.yml").as_path())).unwrap();
        assert!(domain.is_empty());
        assert!(Domain::load(None).unwrap().is_empty());
    }
}
