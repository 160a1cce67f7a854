use crate::category::Category;

pub const SOURCE_MARKER: &str = "Source: ";

/// Prefix `source_text` with a comment naming the reference it was resolved from.
pub fn annotate<S: AsRef<str>, R: AsRef<str>>(
    category: Category,
    source_text: S,
    reference: R,
) -> String {
    format!(
        "{} {SOURCE_MARKER}{}{}{}",
        category.comment_prefix(),
        reference.as_ref(),
        category.line_terminator(),
        source_text.as_ref()
    )
}

/// Inverse of the annotation line: the reference token, if `line` is a source comment.
pub fn source_reference(category: Category, line: &str) -> Option<&str> {
    line.strip_prefix(category.comment_prefix())?
        .trim_start()
        .strip_prefix(SOURCE_MARKER)
}

/// A resolved fragment ready for packing.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct AnnotatedFragment {
    pub reference: String,
    pub text: String,
}

impl AnnotatedFragment {
    pub fn new<R: Into<String>, S: AsRef<str>>(category: Category, reference: R, source: S) -> Self {
        let reference = reference.into();
        let text = annotate(category, source, &reference);
        AnnotatedFragment { reference, text }
    }
}
