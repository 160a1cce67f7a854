use indexmap::IndexMap;
use regex::Regex;
use std::fmt::{Display, Formatter};
use std::sync::LazyLock;
use tweakforge_util::diagnostics::{DiagnosticSink, Warning};
use tweakforge_util::split::split_filter_empty;

pub const REFERENCE_SIGIL: char = '~';

static REFERENCE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<path>[^{}]+)(?:\{(?P<vars>[^{}]*)\})?$").unwrap());

/// A parsed `~path{VAR=value,...}` token.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Reference {
    pub file_path: String,
    /// Substitutions in order of first appearance; a repeated key keeps its last value.
    pub variables: IndexMap<String, String>,
}

impl Reference {
    pub fn new<P: Into<String>>(file_path: P) -> Self {
        Reference {
            file_path: file_path.into(),
            variables: IndexMap::new(),
        }
    }

    pub fn with_variable<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }
}

impl Display for Reference {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{REFERENCE_SIGIL}{}", self.file_path)?;
        if !self.variables.is_empty() {
            f.write_str("{")?;
            for (i, (key, value)) in self.variables.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{key}={value}")?;
            }
            f.write_str("}")?;
        }
        Ok(())
    }
}

/// Parse a reference token. Returns `None` (after reporting why) when the token as a whole is
/// malformed; individual bad `key=value` pairs are reported and skipped.
pub fn parse_reference<S: AsRef<str>>(token: S, diag: &mut impl DiagnosticSink) -> Option<Reference> {
    let token = token.as_ref();

    let Some(body) = token.strip_prefix(REFERENCE_SIGIL) else {
        diag.warn(Warning::InvalidReference {
            token: token.to_string(),
            reason: "missing '~' prefix",
        });
        return None;
    };

    let Some(caps) = REFERENCE_REGEX.captures(body) else {
        diag.warn(Warning::InvalidReference {
            token: token.to_string(),
            reason: "expected <path> or <path>{KEY=value,...}",
        });
        return None;
    };

    let mut reference = Reference::new(&caps["path"]);
    let Some(vars) = caps.name("vars") else {
        return Some(reference);
    };

    for pair in split_filter_empty(vars.as_str(), ",") {
        match pair.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                reference
                    .variables
                    .insert(key.trim().to_string(), value.trim().to_string());
            }
            _ => diag.warn(Warning::MalformedVariable {
                token: token.to_string(),
                pair: pair.to_string(),
            }),
        }
    }

    Some(reference)
}
