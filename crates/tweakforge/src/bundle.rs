use crate::errors::TweakResult;
use anyhow::Context;
use std::collections::BTreeMap;
use std::path::{Component, Path};
use tweakforge_template::resolve::SourceLookup;

/// Read-only map of bundle path (relative, `/`-separated) to raw Lua source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bundle {
    files: BTreeMap<String, String>,
}

impl Bundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every regular file below `root`, keyed by its path relative to `root`.
    pub fn from_dir<P: AsRef<Path>>(root: P) -> TweakResult<Self> {
        let root = root.as_ref();
        let mut bundle = Bundle::new();
        bundle
            .load_dir(root, root)
            .with_context(|| format!("unable to load bundle from {}", root.display()))?;
        tracing::debug!("loaded {} file(s) from {}", bundle.len(), root.display());
        Ok(bundle)
    }

    fn load_dir(&mut self, root: &Path, dir: &Path) -> TweakResult<()> {
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_dir() {
                self.load_dir(root, &path)?;
            } else if path.is_file() {
                let key = bundle_key(root, &path)?;
                let source = std::fs::read_to_string(&path)
                    .with_context(|| format!("unable to read {}", path.display()))?;
                self.files.insert(key, source);
            }
        }

        Ok(())
    }

    pub fn insert<P: Into<String>, S: Into<String>>(&mut self, path: P, source: S) {
        self.files.insert(path.into(), source.into());
    }

    pub fn get<S: AsRef<str>>(&self, path: S) -> Option<&str> {
        self.files.get(path.as_ref()).map(String::as_str)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

fn bundle_key(root: &Path, path: &Path) -> TweakResult<String> {
    let relative = path.strip_prefix(root)?;
    let parts: Vec<&str> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_str()),
            _ => None,
        })
        .collect::<Option<_>>()
        .with_context(|| format!("non UTF-8 path {}", path.display()))?;
    Ok(parts.join("/"))
}

impl SourceLookup for Bundle {
    fn source(&self, path: &str) -> Option<&str> {
        self.get(path)
    }
}

impl<P: Into<String>, S: Into<String>> FromIterator<(P, S)> for Bundle {
    fn from_iter<I: IntoIterator<Item = (P, S)>>(iter: I) -> Self {
        Bundle {
            files: iter
                .into_iter()
                .map(|(p, s)| (p.into(), s.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::bundle::Bundle;
    use pretty_assertions::assert_eq;
    use std::fs;

    #[test]
    fn from_dir_uses_forward_slashes() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("defs").join("eco")).unwrap();
        fs::write(dir.path().join("top.lua"), "-- top").unwrap();
        fs::write(dir.path().join("defs").join("eco").join("mult.lua"), "local m = $M$").unwrap();

        let bundle = Bundle::from_dir(dir.path()).unwrap();
        assert_eq!(bundle.paths().collect::<Vec<_>>(), &["defs/eco/mult.lua", "top.lua"]);
        assert_eq!(bundle.get("defs/eco/mult.lua"), Some("local m = $M$"));
    }

    #[test]
    fn missing_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Bundle::from_dir(dir.path().join("absent")).is_err());
    }

    #[test]
    fn from_iter() {
        let bundle: Bundle = [("a.lua", "A"), ("b.lua", "B")].into_iter().collect();
        assert_eq!(bundle.len(), 2);
        assert_eq!(bundle.get("b.lua"), Some("B"));
        assert_eq!(bundle.get("c.lua"), None);
    }
}
