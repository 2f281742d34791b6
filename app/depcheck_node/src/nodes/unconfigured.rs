/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

use std::sync::Arc;

use allocative::Allocative;
use depcheck_core::package::PackageLabel;
use depcheck_core::target::label::TargetLabel;
use dupe::Dupe;

use crate::nodes::kind::TargetKind;
use crate::nodes::macro_instance::MacroInstance;
use crate::rule::RuleClass;
use crate::visibility::VisibilitySpecification;

#[derive(Debug, Allocative)]
struct TargetNodeData {
    label: TargetLabel,
    kind: TargetKind,
    /// The symbolic macro that directly declared this target, if any.
    declaring_macro: Option<MacroInstance>,
    testonly: bool,
    deprecation: Option<Box<str>>,
    /// Visibility specification restricts what targets can depend on this one.
    visibility: VisibilitySpecification,
}

/// A target as loaded from its package: label, kind and the attributes
/// dependency validation reads.
#[derive(Debug, Clone, Dupe, Allocative)]
pub struct TargetNode(Arc<TargetNodeData>);

impl TargetNode {
    pub fn new(
        label: TargetLabel,
        kind: TargetKind,
        declaring_macro: Option<MacroInstance>,
        testonly: bool,
        deprecation: Option<&str>,
        visibility: VisibilitySpecification,
    ) -> TargetNode {
        TargetNode(Arc::new(TargetNodeData {
            label,
            kind,
            declaring_macro,
            testonly,
            deprecation: deprecation.map(Box::from),
            visibility,
        }))
    }

    pub fn label(&self) -> &TargetLabel {
        &self.0.label
    }

    pub fn pkg(&self) -> &PackageLabel {
        self.0.label.pkg()
    }

    pub fn kind(&self) -> &TargetKind {
        &self.0.kind
    }

    pub fn rule_class(&self) -> Option<&RuleClass> {
        self.0.kind.rule_class()
    }

    pub fn is_package_group(&self) -> bool {
        matches!(self.0.kind, TargetKind::PackageGroup)
    }

    pub fn is_source_file(&self) -> bool {
        matches!(self.0.kind, TargetKind::SourceFile)
    }

    /// For output files, the rule generating them.
    pub fn generating_rule(&self) -> Option<&TargetLabel> {
        self.0.kind.generating_rule()
    }

    pub fn declaring_macro(&self) -> Option<&MacroInstance> {
        self.0.declaring_macro.as_ref()
    }

    pub fn is_testonly(&self) -> bool {
        self.0.testonly
    }

    pub fn deprecation(&self) -> Option<&str> {
        self.0.deprecation.as_deref()
    }

    pub fn visibility(&self) -> &VisibilitySpecification {
        &self.0.visibility
    }
}

impl PartialEq for TargetNode {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0.label == other.0.label
    }
}

impl Eq for TargetNode {}

pub mod testing {
    use depcheck_core::target::label::TargetLabel;

    use crate::nodes::kind::TargetKind;
    use crate::nodes::macro_instance::MacroInstance;
    use crate::nodes::unconfigured::TargetNode;
    use crate::rule::RuleClass;
    use crate::visibility::VisibilitySpecification;

    /// Builds a [`TargetNode`] with defaults: public, not testonly, not
    /// deprecated, declared directly in its build file.
    pub struct TargetNodeBuilder {
        label: TargetLabel,
        kind: TargetKind,
        declaring_macro: Option<MacroInstance>,
        testonly: bool,
        deprecation: Option<String>,
        visibility: VisibilitySpecification,
    }

    impl TargetNodeBuilder {
        pub fn new(label: &str, kind: TargetKind) -> TargetNodeBuilder {
            TargetNodeBuilder {
                label: TargetLabel::testing_parse(label),
                kind,
                declaring_macro: None,
                testonly: false,
                deprecation: None,
                visibility: VisibilitySpecification::public(),
            }
        }

        pub fn rule(label: &str, rule: RuleClass) -> TargetNodeBuilder {
            TargetNodeBuilder::new(label, TargetKind::Rule(rule))
        }

        pub fn declared_in(mut self, declaring_macro: MacroInstance) -> Self {
            self.declaring_macro = Some(declaring_macro);
            self
        }

        pub fn testonly(mut self) -> Self {
            self.testonly = true;
            self
        }

        pub fn deprecated(mut self, message: &str) -> Self {
            self.deprecation = Some(message.to_owned());
            self
        }

        pub fn visibility(mut self, visibility: VisibilitySpecification) -> Self {
            self.visibility = visibility;
            self
        }

        /// Shorthand for a single package group with the given specs.
        pub fn visible_to(self, specs: &[&str]) -> Self {
            self.visibility(VisibilitySpecification::testing_new(&[specs]))
        }

        pub fn build(self) -> TargetNode {
            TargetNode::new(
                self.label,
                self.kind,
                self.declaring_macro,
                self.testonly,
                self.deprecation.as_deref(),
                self.visibility,
            )
        }
    }
}
