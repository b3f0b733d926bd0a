use anyhow::Context;
use serde_yaml::Mapping;
use serde_yaml::Value;
use std::path::Path;

/// Read a YAML document that must be a mapping at the top level.
/// An empty document is an empty mapping.
pub fn mapping(path: &Path) -> anyhow::Result<Mapping> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    match serde_yaml::from_str::<Value>(&text) {
        Ok(Value::Mapping(mapping)) => Ok(mapping),
        Ok(Value::Null) => Ok(Mapping::new()),
        Ok(_) => anyhow::bail!(
            "'{}' is not a YAML mapping. Please verify the data format.",
            path.display()
        ),
        Err(e) => anyhow::bail!(
            "failed to parse '{}': {}. Please verify the data format.",
            path.display(),
            e
        ),
    }
}

/// Copy of `mapping` without the given top-level keys.
pub fn without(mapping: &Mapping, keys: &[&str]) -> Mapping {
    mapping
        .iter()
        .filter(|(k, _)| k.as_str().map_or(true, |k| !keys.contains(&k)))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// A key counts as present unless it is missing, null or an empty list.
pub fn present(mapping: &Mapping, key: &str) -> bool {
    match mapping.get(key) {
        None | Some(Value::Null) => false,
        Some(Value::Sequence(items)) => !items.is_empty(),
        Some(_) => true,
    }
}
