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

use allocative::Allocative;
use depcheck_core::target::label::TargetLabel;
use dupe::Dupe;

use crate::rule::RuleClass;

/// What a target is.
#[derive(Debug, Clone, Dupe, Eq, PartialEq, Allocative)]
pub enum TargetKind {
    /// An instance of a rule class.
    Rule(RuleClass),
    /// A `package_group`: a named set of package specifications, only
    /// meaningful in visibility declarations.
    PackageGroup,
    /// A checked-in source file.
    SourceFile,
    /// An output file of a rule.
    GeneratedFile { generating_rule: TargetLabel },
}

impl TargetKind {
    pub fn rule_class(&self) -> Option<&RuleClass> {
        match self {
            TargetKind::Rule(rule) => Some(rule),
            _ => None,
        }
    }

    pub fn generating_rule(&self) -> Option<&TargetLabel> {
        match self {
            TargetKind::GeneratedFile { generating_rule } => Some(generating_rule),
            _ => None,
        }
    }
}

/// Renders as used in diagnostics: `cc_library rule`, `package group`,
/// `source file`, `generated file`.
impl Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetKind::Rule(rule) => write!(f, "{} rule", rule.name()),
            TargetKind::PackageGroup => write!(f, "package group"),
            TargetKind::SourceFile => write!(f, "source file"),
            TargetKind::GeneratedFile { .. } => write!(f, "generated file"),
        }
    }
}
