/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

use depcheck_core::target::label::TargetLabel;
use dupe::Dupe;
use itertools::Itertools;

use crate::nodes::kind::TargetKind;
use crate::nodes::unconfigured::TargetNode;
use crate::visibility::VisibilitySpecification;

/// Whether to mention the target kind when describing a prerequisite.
#[derive(Debug, Clone, Copy, Dupe, Eq, PartialEq)]
pub enum TargetMode {
    WithKind,
    WithoutKind,
}

/// The far end of a dependency edge, as seen by the consumer after
/// dependency resolution.
///
/// When the edge went through aliases, `target` is the underlying target and
/// the alias chain records how it was reached. Visibility is that of the
/// outermost alias: an alias re-exports its target under its own visibility.
#[derive(Debug, Clone)]
pub struct Prerequisite {
    target: TargetNode,
    /// Outermost alias first.
    alias_chain: Vec<TargetLabel>,
    visibility: Option<VisibilitySpecification>,
}

impl Prerequisite {
    /// A direct (non-alias) dependency on `target`.
    pub fn new(target: TargetNode) -> Prerequisite {
        let visibility = Some(target.visibility().dupe());
        Prerequisite {
            target,
            alias_chain: Vec::new(),
            visibility,
        }
    }

    /// Wrap `self` as reached through `alias`.
    pub fn through_alias(self, alias: &TargetNode) -> Prerequisite {
        let mut alias_chain = Vec::with_capacity(self.alias_chain.len() + 1);
        alias_chain.push(alias.label().dupe());
        alias_chain.extend(self.alias_chain);
        Prerequisite {
            target: self.target,
            alias_chain,
            visibility: Some(alias.visibility().dupe()),
        }
    }

    /// Replace the visibility information. `None` models a dependency whose
    /// analysis produced no visibility at all.
    pub fn with_visibility(self, visibility: Option<VisibilitySpecification>) -> Prerequisite {
        Prerequisite { visibility, ..self }
    }

    /// The underlying target.
    pub fn target(&self) -> &TargetNode {
        &self.target
    }

    /// Label of the underlying target, after following aliases.
    pub fn target_label(&self) -> &TargetLabel {
        self.target.label()
    }

    /// Label the edge was traversed through: the outermost alias, or the
    /// target itself.
    pub fn dependency_label(&self) -> &TargetLabel {
        self.alias_chain
            .first()
            .unwrap_or_else(|| self.target.label())
    }

    pub fn visibility(&self) -> Option<&VisibilitySpecification> {
        self.visibility.as_ref()
    }

    pub fn kind(&self) -> &TargetKind {
        self.target.kind()
    }

    pub fn is_testonly(&self) -> bool {
        self.target.is_testonly()
    }

    pub fn deprecation_warning(&self) -> Option<&str> {
        self.target.deprecation()
    }

    pub fn generating_rule_label(&self) -> Option<&TargetLabel> {
        self.target.generating_rule()
    }

    /// `target '//a:b'`, or with aliases
    /// `alias '//x:y' referring to target '//a:b' through '//x:z'`.
    pub fn describe_with_aliases(&self, mode: TargetMode) -> String {
        let kind = match mode {
            TargetMode::WithKind => format!("{} ", self.kind()),
            TargetMode::WithoutKind => String::new(),
        };
        let Some((outermost, rest)) = self.alias_chain.split_first() else {
            return format!("{}target '{}'", kind, self.target_label());
        };
        let mut result = format!(
            "alias '{}' referring to {}target '{}'",
            outermost,
            kind,
            self.target_label()
        );
        if !rest.is_empty() {
            result.push_str(&format!(" through '{}'", rest.iter().join("' -> '")));
        }
        result
    }
}
