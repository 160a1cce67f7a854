use crate::errors::TweakResult;
use anyhow::Context;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::path::Path;
use tweakforge_util::number::format_number;

/// A single lobby setting as chosen in the configuration form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

/// The stringified form is what the mapping table is keyed on.
impl Display for SettingValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingValue::Bool(b) => write!(f, "{b}"),
            SettingValue::Number(n) => f.write_str(&format_number(*n)),
            SettingValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Bool(value)
    }
}

impl From<f64> for SettingValue {
    fn from(value: f64) -> Self {
        SettingValue::Number(value)
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        SettingValue::Number(value as f64)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::Text(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::Text(value)
    }
}

/// Setting key to value. Iteration order is insertion order; the mapper never relies on it and
/// walks the schema order instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Configuration(IndexMap<String, SettingValue>);

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str<S: AsRef<str>>(json: S) -> TweakResult<Self> {
        Ok(serde_json::from_str(json.as_ref())?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> TweakResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("unable to read configuration {}", path.display()))?;
        Self::from_json_str(json)
            .with_context(|| format!("invalid configuration {}", path.display()))
    }

    pub fn get<S: AsRef<str>>(&self, key: S) -> Option<&SettingValue> {
        self.0.get(key.as_ref())
    }

    pub fn set<K: Into<String>, V: Into<SettingValue>>(&mut self, key: K, value: V) {
        self.0.insert(key.into(), value.into());
    }

    pub fn with<K: Into<String>, V: Into<SettingValue>>(mut self, key: K, value: V) -> Self {
        self.set(key, value);
        self
    }

    pub fn contains_key<S: AsRef<str>>(&self, key: S) -> bool {
        self.0.contains_key(key.as_ref())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SettingValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<SettingValue>> FromIterator<(K, V)> for Configuration {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Configuration(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
