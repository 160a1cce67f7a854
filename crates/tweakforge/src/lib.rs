//! Turns a lobby configuration into the chat commands that apply it.
//!
//! ## Pipeline
//! 1. The [`mapping`] table maps each setting value to literal commands and to references of Lua
//!    fragments, split between `tweakdefs` and `tweakunits`.
//! 2. Each reference is resolved against the [`bundle`] with `tweakforge_template`, which
//!    substitutes `$VAR$` placeholders and evaluates the trivial arithmetic they produce.
//! 3. Every fragment is [`annotate`]d with a `-- Source: <reference>` comment so the packed output
//!    can be traced back to the reference that produced it.
//! 4. Fragments are [`pack`]ed per category into base64url `!bset tweakdefs<N>` commands, each
//!    within [`limits::MAX_COMMAND_LENGTH`] and at most [`limits::MAX_SLOTS_PER_TYPE`] per category.
//! 5. Literal commands and slot commands are grouped into newline-joined [`sections`].
//!
//! Recoverable problems (bad references, missing files, unsupported arithmetic) are reported to a
//! [`DiagnosticSink`](tweakforge_util::diagnostics::DiagnosticSink) and the build carries on.
//! Running out of slots is a [`PackError`](errors::PackError) and aborts the build.

pub mod annotate;
pub mod bundle;
pub mod category;
pub mod configuration;
pub mod decode;
pub mod errors;
pub mod limits;
pub mod mapping;
pub mod pack;
pub mod sections;

#[cfg(test)]
mod tests;

pub use tweakforge_template::resolve::SourceLookup;
pub use tweakforge_util::diagnostics::{DiagnosticSink, Diagnostics, Warning};
