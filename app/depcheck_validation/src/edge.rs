/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

use depcheck_core::bzl::ImportPath;
use depcheck_core::target::label::TargetLabel;
use depcheck_node::aspect::AspectClass;
use depcheck_node::attrs::attr::Attribute;
use depcheck_node::nodes::prerequisite::Prerequisite;
use depcheck_node::nodes::unconfigured::TargetNode;
use depcheck_node::rule::RuleClass;
use dupe::Dupe;

#[derive(Debug, thiserror::Error)]
enum DependencyEdgeError {
    #[error("Dependency edges must originate from a rule, but `{0}` is a {1}")]
    ConsumerNotARule(TargetLabel, String),
}

/// One attribute-mediated dependency of a consuming rule. Built for a single
/// validation call and never stored.
#[derive(Debug, Clone, Copy)]
pub struct DependencyEdge<'a> {
    consumer: &'a TargetNode,
    rule_class: &'a RuleClass,
    attribute: &'a Attribute,
    prerequisite: &'a Prerequisite,
    main_aspect: Option<&'a AspectClass>,
}

impl<'a> DependencyEdge<'a> {
    pub fn new(
        consumer: &'a TargetNode,
        attribute: &'a Attribute,
        prerequisite: &'a Prerequisite,
    ) -> anyhow::Result<DependencyEdge<'a>> {
        let rule_class = consumer.rule_class().ok_or_else(|| {
            DependencyEdgeError::ConsumerNotARule(
                consumer.label().dupe(),
                consumer.kind().to_string(),
            )
        })?;
        Ok(DependencyEdge {
            consumer,
            rule_class,
            attribute,
            prerequisite,
            main_aspect: None,
        })
    }

    /// The edge is being validated while evaluating `aspect` on the consumer.
    pub fn for_aspect(self, aspect: &'a AspectClass) -> DependencyEdge<'a> {
        DependencyEdge {
            main_aspect: Some(aspect),
            ..self
        }
    }

    pub fn consumer(&self) -> &'a TargetNode {
        self.consumer
    }

    pub fn rule_class(&self) -> &'a RuleClass {
        self.rule_class
    }

    pub fn attribute(&self) -> &'a Attribute {
        self.attribute
    }

    pub fn prerequisite(&self) -> &'a Prerequisite {
        self.prerequisite
    }

    pub fn main_aspect(&self) -> Option<&'a AspectClass> {
        self.main_aspect
    }

    pub fn for_aspect_evaluation(&self) -> bool {
        self.main_aspect.is_some()
    }

    /// The `.bzl` exporting whatever owns this edge's attribute: the main
    /// aspect if there is one, else the consuming rule class. `None` when
    /// the owner is built in.
    pub fn owner_definition_bzl(&self) -> Option<&'a ImportPath> {
        match self.main_aspect {
            Some(aspect) => aspect.definition().bzl(),
            None => self.rule_class.definition().bzl(),
        }
    }
}

#[cfg(test)]
mod tests {
    use depcheck_core::bzl::ImportPath;
    use depcheck_node::aspect::AspectClass;
    use depcheck_node::attrs::attr::Attribute;
    use depcheck_node::nodes::kind::TargetKind;
    use depcheck_node::nodes::prerequisite::Prerequisite;
    use depcheck_node::nodes::unconfigured::testing::TargetNodeBuilder;
    use depcheck_node::rule::Definition;
    use depcheck_node::rule::RuleClass;
    use dupe::Dupe;

    use crate::edge::DependencyEdge;

    #[test]
    fn test_consumer_must_be_rule() {
        let attr = Attribute::testing_new("srcs");
        let file = TargetNodeBuilder::new("//a:f.txt", TargetKind::SourceFile).build();
        let prereq = Prerequisite::new(file.dupe());
        let err = DependencyEdge::new(&file, &attr, &prereq).unwrap_err();
        assert_eq!(
            "Dependency edges must originate from a rule, but `root//a:f.txt` is a source file",
            err.to_string()
        );
    }

    #[test]
    fn test_owner_definition() -> anyhow::Result<()> {
        let rule = RuleClass::new(
            "my_rule",
            Definition::Starlark(ImportPath::testing_parse("//rules:defs.bzl")),
            false,
            [],
        );
        let aspect = AspectClass::new(
            "my_aspect",
            Definition::Starlark(ImportPath::testing_parse("//aspects:a.bzl")),
            ["$tool"],
        );
        let consumer = TargetNodeBuilder::rule("//a:b", rule).build();
        let attr = Attribute::testing_new("$tool");
        let prereq = Prerequisite::new(
            TargetNodeBuilder::new("//t:tool", TargetKind::SourceFile).build(),
        );

        let edge = DependencyEdge::new(&consumer, &attr, &prereq)?;
        assert!(!edge.for_aspect_evaluation());
        assert_eq!(
            "root//rules:defs.bzl",
            edge.owner_definition_bzl().unwrap().to_string()
        );
        let edge = edge.for_aspect(&aspect);
        assert_eq!(
            "root//aspects:a.bzl",
            edge.owner_definition_bzl().unwrap().to_string()
        );
        Ok(())
    }
}
