//! Non-fatal conditions raised while building lobby commands.
//!
//! Nothing in the pipeline prints directly. Every recoverable problem becomes a [`Warning`] that
//! is handed to the [`DiagnosticSink`] the caller passed in, so tests can assert on exactly what
//! was reported.

use thiserror::Error;

#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum Warning {
    #[error("invalid reference {token:?}: {reason}")]
    InvalidReference { token: String, reason: &'static str },

    #[error("skipping malformed variable {pair:?} in reference {token:?}")]
    MalformedVariable { token: String, pair: String },

    #[error("placeholder ${name}$ has no value, leaving it as-is")]
    UndefinedPlaceholder { name: String },

    #[error("variable {name:?} was supplied but never used")]
    UnusedVariable { name: String },

    #[error("refusing to evaluate unsafe expression {expr:?}")]
    UnsafeExpression { expr: String },

    #[error("unsupported expression {expr:?} left unevaluated")]
    UnsupportedExpression { expr: String },

    #[error("no source for {path:?} (from reference {token:?})")]
    MissingSource { token: String, path: String },

    #[error("ignoring unknown setting {key:?}")]
    UnknownSetting { key: String },

    #[error("command of length {length} exceeds limit {limit}, emitting it on its own")]
    OversizedCommand { length: usize, limit: usize },
}

pub trait DiagnosticSink {
    fn warn(&mut self, warning: Warning);
}

/// Collects warnings in emission order and mirrors each one to `tracing`.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}

impl DiagnosticSink for Diagnostics {
    fn warn(&mut self, warning: Warning) {
        tracing::warn!("{warning}");
        self.warnings.push(warning);
    }
}
