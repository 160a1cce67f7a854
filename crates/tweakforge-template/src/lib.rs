//! Reference tokens and the templating applied to the Lua fragments they point at.
//!
//! A reference looks like `~defs/scale_buildpower.lua{MULT=1.5}`: a path into the bundle,
//! optionally followed by substitutions. Resolving it looks the path up, replaces every
//! `$MULT$` placeholder in the file, and then evaluates the parenthesized arithmetic that the
//! substitution produced, so `($MULT$ * 2)` becomes `(3)`.
//!
//! The arithmetic is intentionally limited to a single `/` or `*` between two literal numbers; see
//! [`evaluate`].

pub mod evaluate;
pub mod interpolate;
pub mod reference;
pub mod resolve;
