use crate::interpolate::interpolate;
use crate::reference::parse_reference;
use std::collections::{BTreeMap, HashMap};
use tweakforge_util::diagnostics::{DiagnosticSink, Warning};

/// Anything that can hand out raw source text by bundle path.
pub trait SourceLookup {
    fn source(&self, path: &str) -> Option<&str>;
}

impl SourceLookup for BTreeMap<String, String> {
    fn source(&self, path: &str) -> Option<&str> {
        self.get(path).map(String::as_str)
    }
}

impl SourceLookup for HashMap<String, String> {
    fn source(&self, path: &str) -> Option<&str> {
        self.get(path).map(String::as_str)
    }
}

impl<T: SourceLookup + ?Sized> SourceLookup for &T {
    fn source(&self, path: &str) -> Option<&str> {
        (**self).source(path)
    }
}

/// Turn a reference token into final source text, or `None` if the token is malformed or points
/// at a file the bundle does not have.
pub fn resolve_reference<S: AsRef<str>>(
    token: S,
    bundle: &impl SourceLookup,
    diag: &mut impl DiagnosticSink,
) -> Option<String> {
    let token = token.as_ref();
    let reference = parse_reference(token, diag)?;

    let Some(template) = bundle.source(&reference.file_path) else {
        diag.warn(Warning::MissingSource {
            token: token.to_string(),
            path: reference.file_path,
        });
        return None;
    };

    if reference.variables.is_empty() {
        return Some(template.to_string());
    }

    tracing::debug!(
        "interpolating {} with {} variable(s)",
        reference.file_path,
        reference.variables.len()
    );
    Some(interpolate(template, &reference.variables, diag))
}
