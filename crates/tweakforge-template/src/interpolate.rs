use crate::evaluate::evaluate;
use indexmap::{IndexMap, IndexSet};
use regex::{Captures, Regex};
use std::sync::LazyLock;
use tweakforge_util::diagnostics::{DiagnosticSink, Warning};
use tweakforge_util::split::replace_all;

static PLACEHOLDER_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$(\w+)\$").unwrap());

// Innermost parenthesized groups only
static GROUP_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(([^()]*)\)").unwrap());

fn has_arithmetic_operator(s: &str) -> bool {
    s.contains(['+', '-', '*', '/'])
}

/// Substitute `$NAME$` placeholders from `variables`, then evaluate the arithmetic groups the
/// substitution produced.
///
/// Unknown placeholders are kept verbatim. Variables that were never referenced are reported once
/// both passes are done.
pub fn interpolate<S: AsRef<str>>(
    template: S,
    variables: &IndexMap<String, String>,
    diag: &mut impl DiagnosticSink,
) -> String {
    let template = template.as_ref();
    let mut used: IndexSet<&str> = IndexSet::new();

    let substituted = replace_all(&PLACEHOLDER_REGEX, template, |caps: &Captures| {
        let name = &caps[1];
        match variables.get_key_value(name) {
            Some((key, value)) => {
                used.insert(key.as_str());
                value.clone()
            }
            None => {
                diag.warn(Warning::UndefinedPlaceholder {
                    name: name.to_string(),
                });
                caps[0].to_string()
            }
        }
    });

    let evaluated = replace_all(&GROUP_REGEX, &substituted, |caps: &Captures| {
        let inner = &caps[1];
        if has_arithmetic_operator(inner) {
            format!("({})", evaluate(inner, diag))
        } else {
            caps[0].to_string()
        }
    });

    for name in variables.keys().filter(|k| !used.contains(k.as_str())) {
        diag.warn(Warning::UnusedVariable { name: name.clone() });
    }

    evaluated
}
