//! Plan metadata: the flat string record between planners and generators

use super::PlanError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Flat `key -> value` record produced by a planner and consumed by a generator.
///
/// A missing key always means "use the generator's default"; see [`MetaDefaults`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanMeta(BTreeMap<String, String>);

impl PlanMeta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Value for `key`, falling back to the ecosystem default table
    pub fn resolve<'a>(&'a self, key: &str, defaults: &MetaDefaults) -> &'a str {
        debug_assert!(
            defaults.recognizes(key),
            "{} is not in the {} key vocabulary",
            key,
            defaults.ecosystem
        );
        self.get(key)
            .or_else(|| defaults.get(key))
            .unwrap_or_default()
    }

    /// Keys the given ecosystem does not know about
    pub fn unrecognized_keys<'a>(&'a self, defaults: &MetaDefaults) -> Vec<&'a str> {
        self.0
            .keys()
            .map(String::as_str)
            .filter(|k| !defaults.recognizes(k))
            .collect()
    }

    /// Logs every unrecognized key. A typo in a key name otherwise silently
    /// falls back to the default.
    pub fn warn_unrecognized(&self, defaults: &MetaDefaults) {
        for key in self.unrecognized_keys(defaults) {
            warn!(
                ecosystem = defaults.ecosystem,
                key, "Ignoring unrecognized plan metadata key"
            );
        }
    }

    /// Parses a JSON object whose values are all strings
    pub fn from_json(content: &str) -> Result<Self, PlanError> {
        serde_json::from_str(content).map_err(|e| PlanError::InvalidMeta(e.to_string()))
    }

    /// Applies a `KEY=VALUE` override; the value may be empty
    pub fn apply_override(&mut self, assignment: &str) -> Result<(), PlanError> {
        match assignment.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                self.insert(key.trim(), value);
                Ok(())
            }
            _ => Err(PlanError::InvalidOverride(assignment.to_string())),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PlanMeta {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Declarative default table for one ecosystem.
///
/// The table doubles as the key vocabulary: a key is recognized iff it has an
/// entry here, even when its default is the empty string.
#[derive(Debug)]
pub struct MetaDefaults {
    pub ecosystem: &'static str,
    pub entries: &'static [(&'static str, &'static str)],
}

impl MetaDefaults {
    pub const fn new(
        ecosystem: &'static str,
        entries: &'static [(&'static str, &'static str)],
    ) -> Self {
        Self { ecosystem, entries }
    }

    pub fn get(&self, key: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }

    pub fn recognizes(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULTS: MetaDefaults =
        MetaDefaults::new("test", &[("install", "echo skip"), ("framework", "")]);

    #[test]
    fn test_resolve_prefers_meta() {
        let meta: PlanMeta = [("install", "pip install .")].into_iter().collect();
        assert_eq!(meta.resolve("install", &DEFAULTS), "pip install .");
    }

    #[test]
    fn test_resolve_falls_back_to_default() {
        let meta = PlanMeta::new();
        assert_eq!(meta.resolve("install", &DEFAULTS), "echo skip");
        assert_eq!(meta.resolve("framework", &DEFAULTS), "");
    }

    #[test]
    fn test_empty_value_is_not_absent() {
        let meta: PlanMeta = [("install", "")].into_iter().collect();
        assert_eq!(meta.resolve("install", &DEFAULTS), "");
    }

    #[test]
    fn test_unrecognized_keys() {
        let meta: PlanMeta = [("instal", "x"), ("framework", "flask")]
            .into_iter()
            .collect();
        assert_eq!(meta.unrecognized_keys(&DEFAULTS), vec!["instal"]);
    }

    #[test]
    fn test_from_json() {
        let meta = PlanMeta::from_json(r#"{"type": "maven", "jdk": "17"}"#).unwrap();
        assert_eq!(meta.get("type"), Some("maven"));
        assert_eq!(meta.len(), 2);

        assert!(PlanMeta::from_json(r#"{"jdk": 17}"#).is_err());
        assert!(PlanMeta::from_json("[]").is_err());
    }

    #[test]
    fn test_apply_override() {
        let mut meta = PlanMeta::new();
        meta.apply_override("buildCommand=build").unwrap();
        meta.apply_override("startCommand=").unwrap();
        assert_eq!(meta.get("buildCommand"), Some("build"));
        assert_eq!(meta.get("startCommand"), Some(""));

        assert!(matches!(
            meta.apply_override("novalue"),
            Err(PlanError::InvalidOverride(_))
        ));
        assert!(meta.apply_override("=x").is_err());
    }

    #[test]
    fn test_serializes_as_flat_object() {
        let meta: PlanMeta = [("start", "python main.py")].into_iter().collect();
        assert_eq!(
            serde_json::to_string(&meta).unwrap(),
            r#"{"start":"python main.py"}"#
        );
    }
}
