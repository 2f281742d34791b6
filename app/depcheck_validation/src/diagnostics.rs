/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

use std::fmt;
use std::fmt::Display;

/// Receives the diagnostics for one consuming rule. Append-only.
///
/// Errors fail the analysis of the consuming rule, warnings do not.
pub trait DiagnosticSink {
    fn rule_error(&mut self, message: String);

    fn rule_warning(&mut self, message: String);

    fn attribute_error(&mut self, attribute: &str, message: String);
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Diagnostic {
    RuleError(String),
    RuleWarning(String),
    AttributeError { attribute: String, message: String },
}

impl Diagnostic {
    pub fn is_error(&self) -> bool {
        !matches!(self, Diagnostic::RuleWarning(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Diagnostic::RuleError(message)
            | Diagnostic::RuleWarning(message)
            | Diagnostic::AttributeError { message, .. } => message,
        }
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::RuleError(message) => write!(f, "error: {}", message),
            Diagnostic::RuleWarning(message) => write!(f, "warning: {}", message),
            Diagnostic::AttributeError { attribute, message } => {
                write!(f, "error in attribute `{}`: {}", attribute, message)
            }
        }
    }
}

/// In-memory sink keeping diagnostics in emission order.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct CollectedDiagnostics {
    diagnostics: Vec<Diagnostic>,
}

impl CollectedDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| !d.is_error())
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl DiagnosticSink for CollectedDiagnostics {
    fn rule_error(&mut self, message: String) {
        tracing::debug!("rule error: {}", message);
        self.diagnostics.push(Diagnostic::RuleError(message));
    }

    fn rule_warning(&mut self, message: String) {
        tracing::debug!("rule warning: {}", message);
        self.diagnostics.push(Diagnostic::RuleWarning(message));
    }

    fn attribute_error(&mut self, attribute: &str, message: String) {
        tracing::debug!("attribute error in `{}`: {}", attribute, message);
        self.diagnostics.push(Diagnostic::AttributeError {
            attribute: attribute.to_owned(),
            message,
        });
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use crate::diagnostics::CollectedDiagnostics;
    use crate::diagnostics::Diagnostic;
    use crate::diagnostics::DiagnosticSink;

    #[test]
    fn test_collect() {
        let mut sink = CollectedDiagnostics::new();
        assert!(sink.is_empty());
        sink.rule_warning("careful".to_owned());
        assert!(!sink.has_errors());
        sink.attribute_error("deps", "bad".to_owned());
        sink.rule_error("worse".to_owned());
        assert!(sink.has_errors());

        assert_eq!(2, sink.errors().count());
        assert_eq!(vec!["careful"], sink.warnings().map(|d| d.message()).collect::<Vec<_>>());
        assert_matches!(
            &sink.diagnostics()[1],
            Diagnostic::AttributeError { attribute, .. } if attribute == "deps"
        );
        assert_eq!("error in attribute `deps`: bad", sink.diagnostics()[1].to_string());
        assert_eq!(3, sink.into_diagnostics().len());
    }
}
