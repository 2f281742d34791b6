/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

//! Fixtures shared by the scenario tests.

use depcheck_core::bzl::ImportPath;
use depcheck_core::legacy_configs::LegacyBuckConfig;
use depcheck_node::aspect::AspectClass;
use depcheck_node::attrs::attr::Attribute;
use depcheck_node::nodes::prerequisite::Prerequisite;
use depcheck_node::nodes::unconfigured::TargetNode;
use depcheck_node::rule::Definition;
use depcheck_node::rule::RuleClass;
use depcheck_validation::config::DepCheckConfig;
use depcheck_validation::diagnostics::CollectedDiagnostics;
use depcheck_validation::edge::DependencyEdge;
use depcheck_validation::policy::DefaultPrerequisitePolicy;
use depcheck_validation::validator::PrerequisiteValidator;

/// A policy and configuration, parsed from buckconfig text.
pub struct Setup {
    pub policy: DefaultPrerequisitePolicy,
    pub config: DepCheckConfig,
}

impl Setup {
    pub fn new() -> Setup {
        Setup::from_buckconfig("")
    }

    pub fn from_buckconfig(text: &str) -> Setup {
        let config = LegacyBuckConfig::parse(text, ".buckconfig").unwrap();
        Setup {
            policy: DefaultPrerequisitePolicy::from_config(&config).unwrap(),
            config: DepCheckConfig::from_config(&config).unwrap(),
        }
    }

    pub fn validator(&self) -> PrerequisiteValidator<'_> {
        PrerequisiteValidator::new(&self.policy)
    }

    pub fn check(
        &self,
        consumer: &TargetNode,
        attribute: &Attribute,
        prerequisite: &Prerequisite,
    ) -> CollectedDiagnostics {
        let edge = DependencyEdge::new(consumer, attribute, prerequisite).unwrap();
        self.check_edge(&edge)
    }

    pub fn check_aspect(
        &self,
        consumer: &TargetNode,
        attribute: &Attribute,
        prerequisite: &Prerequisite,
        aspect: &AspectClass,
    ) -> CollectedDiagnostics {
        let edge = DependencyEdge::new(consumer, attribute, prerequisite)
            .unwrap()
            .for_aspect(aspect);
        self.check_edge(&edge)
    }

    pub fn check_edge(&self, edge: &DependencyEdge<'_>) -> CollectedDiagnostics {
        let mut sink = CollectedDiagnostics::new();
        self.validator().validate(edge, &self.config, &mut sink);
        sink
    }
}

impl Default for Setup {
    fn default() -> Self {
        Setup::new()
    }
}

pub fn native_rule(name: &str) -> RuleClass {
    RuleClass::new(name, Definition::Builtin, false, [])
}

/// A rule exported from `bzl`, e.g. `//rules:defs.bzl`.
pub fn starlark_rule(name: &str, bzl: &str) -> RuleClass {
    RuleClass::new(
        name,
        Definition::Starlark(ImportPath::testing_parse(bzl)),
        false,
        [],
    )
}

pub fn alias_rule() -> RuleClass {
    RuleClass::new("alias", Definition::Builtin, true, [])
}

/// Messages of all diagnostics, errors and warnings alike.
pub fn messages(diagnostics: &CollectedDiagnostics) -> Vec<String> {
    diagnostics
        .diagnostics()
        .iter()
        .map(|d| d.message().to_owned())
        .collect()
}
