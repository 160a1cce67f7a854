//! The static table that turns lobby settings into commands and Lua references.
//!
//! A mapping document declares an always-applied `base` entry and, per setting, a default value
//! plus the [`TweakValue`] contributed by each non-default choice. The order in which settings are
//! declared is the schema order, and it alone decides output order.

use crate::category::Category;
use crate::configuration::{Configuration, SettingValue};
use crate::errors::TweakResult;
use anyhow::Context;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tweakforge_util::diagnostics::{DiagnosticSink, Warning};

static BUILTIN_MAPPING: Lazy<ConfigurationMapping> = Lazy::new(|| {
    ConfigurationMapping::from_json_str(include_str!("../data/default_mapping.json")).unwrap()
});

/// What a single setting value contributes. Absent and empty lists mean the same thing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TweakValue {
    pub commands: Vec<String>,
    pub tweakdefs: Vec<String>,
    pub tweakunits: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingMapping {
    pub default: SettingValue,
    /// Keyed by the stringified setting value
    #[serde(default)]
    pub values: IndexMap<String, TweakValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationMapping {
    #[serde(default)]
    base: TweakValue,
    settings: IndexMap<String, SettingMapping>,
}

/// Commands and references implied by a configuration, in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TweakPlan {
    pub commands: Vec<String>,
    pub tweakdefs: Vec<String>,
    pub tweakunits: Vec<String>,
}

impl TweakPlan {
    fn extend(&mut self, value: &TweakValue) {
        self.commands.extend(value.commands.iter().cloned());
        self.tweakdefs.extend(value.tweakdefs.iter().cloned());
        self.tweakunits.extend(value.tweakunits.iter().cloned());
    }

    pub fn references(&self, category: Category) -> &[String] {
        match category {
            Category::TweakDefs => &self.tweakdefs,
            Category::TweakUnits => &self.tweakunits,
        }
    }
}

impl ConfigurationMapping {
    /// The mapping compiled into the crate. Parsed on first access and shared afterwards.
    pub fn builtin() -> &'static ConfigurationMapping {
        &BUILTIN_MAPPING
    }

    pub fn from_json_str<S: AsRef<str>>(json: S) -> TweakResult<Self> {
        Ok(serde_json::from_str(json.as_ref())?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> TweakResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("unable to read mapping {}", path.display()))?;
        Self::from_json_str(json).with_context(|| format!("invalid mapping {}", path.display()))
    }

    pub fn base(&self) -> &TweakValue {
        &self.base
    }

    pub fn setting<S: AsRef<str>>(&self, key: S) -> Option<&SettingMapping> {
        self.settings.get(key.as_ref())
    }

    /// Setting keys in schema order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.settings.keys().map(String::as_str)
    }

    pub fn defaults(&self) -> Configuration {
        self.settings
            .iter()
            .map(|(key, setting)| (key.clone(), setting.default.clone()))
            .collect()
    }

    /// Complete a partial configuration: every schema key present, in schema order, missing ones
    /// taken from the defaults. Keys outside the schema are dropped.
    pub fn validate(&self, partial: &Configuration, diag: &mut impl DiagnosticSink) -> Configuration {
        for key in partial.keys().filter(|k| !self.settings.contains_key(*k)) {
            diag.warn(Warning::UnknownSetting {
                key: key.to_string(),
            });
        }

        self.settings
            .iter()
            .map(|(key, setting)| {
                let value = partial.get(key).unwrap_or(&setting.default).clone();
                (key.clone(), value)
            })
            .collect()
    }

    /// Collect the base entry followed by each setting's contribution, walking settings in schema
    /// order. A value with no entry contributes nothing.
    pub fn map_to_tweaks(&self, configuration: &Configuration) -> TweakPlan {
        let mut plan = TweakPlan::default();
        plan.extend(&self.base);

        for (key, setting) in &self.settings {
            let value = configuration.get(key).unwrap_or(&setting.default).to_string();
            match setting.values.get(&value) {
                Some(tweak) => {
                    tracing::trace!("{key}={value} contributes {tweak:?}");
                    plan.extend(tweak);
                }
                None => tracing::trace!("{key}={value} has no tweaks"),
            }
        }

        plan
    }
}
