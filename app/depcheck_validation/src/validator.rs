/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

use depcheck_node::attrs::internal::CONFIG_SETTING_DEPS_ATTRIBUTE;
use depcheck_node::attrs::internal::FUNCTION_TRANSITION_ALLOWLIST_ATTRIBUTE;
use depcheck_node::attrs::internal::TOOLCHAINS_ATTRIBUTE;
use depcheck_node::attrs::internal::VISIBILITY_ATTRIBUTE;
use depcheck_node::nodes::declaration::Declaration;
use depcheck_node::nodes::prerequisite::TargetMode;
use dupe::Dupe;

use crate::config::DepCheckConfig;
use crate::diagnostics::DiagnosticSink;
use crate::edge::DependencyEdge;
use crate::error::DepCheckError;
use crate::error::DepCheckWarning;
use crate::error::TestOnlyViolation;
use crate::error::VisibilityResolutionError;
use crate::policy::PrerequisitePolicy;
use crate::visibility::VisibilityResolver;

/// Runs every admission check on dependency edges.
///
/// Holds no per-edge state, so one validator can be shared by all analysis
/// threads; each consuming target brings its own sink.
#[derive(Clone, Copy, Dupe)]
pub struct PrerequisiteValidator<'a> {
    policy: &'a dyn PrerequisitePolicy,
}

impl<'a> PrerequisiteValidator<'a> {
    pub fn new(policy: &'a dyn PrerequisitePolicy) -> Self {
        PrerequisiteValidator { policy }
    }

    /// Check one edge. The checks are independent: a failing one does not
    /// skip the others.
    pub fn validate(
        &self,
        edge: &DependencyEdge<'_>,
        config: &DepCheckConfig,
        sink: &mut dyn DiagnosticSink,
    ) {
        tracing::trace!(
            "validating {} -> {} via `{}`",
            edge.consumer().label(),
            edge.prerequisite().dependency_label(),
            edge.attribute().name()
        );
        self.validate_location(edge, config, sink);
        self.check_misplaced_package_group(edge, sink);
        self.validate_visibility(edge, config, sink);
        self.validate_testonly(edge, config, sink);
        self.validate_deprecation(edge, sink);
    }

    /// Check all `edges`, which should belong to one consuming target.
    pub fn validate_all<'e, 'd: 'e>(
        &self,
        edges: impl IntoIterator<Item = &'e DependencyEdge<'d>>,
        config: &DepCheckConfig,
        sink: &mut dyn DiagnosticSink,
    ) {
        for edge in edges {
            self.validate(edge, config, sink);
        }
    }

    /// Non-experimental code must not depend on experimental code.
    fn validate_location(
        &self,
        edge: &DependencyEdge<'_>,
        config: &DepCheckConfig,
        sink: &mut dyn DiagnosticSink,
    ) {
        let consumer = edge.consumer().label();
        let prerequisite = edge.prerequisite().target_label();
        if !self.policy.package_under_experimental(prerequisite.pkg())
            || self.policy.package_under_experimental(consumer.pkg())
        {
            return;
        }
        if config.checks_enabled().experimental_deps_allowed {
            sink.rule_warning(
                DepCheckWarning::ExperimentalDependency {
                    consumer: consumer.dupe(),
                    prerequisite: prerequisite.dupe(),
                }
                .to_string(),
            );
        } else {
            sink.rule_error(
                DepCheckError::ExperimentalDependency {
                    consumer: consumer.dupe(),
                    prerequisite: prerequisite.dupe(),
                }
                .to_string(),
            );
        }
    }

    /// Package groups only make sense in `visibility`, or in attributes that
    /// ask for a package specification provider.
    fn check_misplaced_package_group(
        &self,
        edge: &DependencyEdge<'_>,
        sink: &mut dyn DiagnosticSink,
    ) {
        let prerequisite = edge.prerequisite();
        if !prerequisite.target().is_package_group() {
            return;
        }
        let attr_name = edge.attribute().name();
        if attr_name == VISIBILITY_ATTRIBUTE || attr_name == FUNCTION_TRANSITION_ALLOWLIST_ATTRIBUTE
        {
            return;
        }
        // Aspect attributes are not on the rule class.
        let attribute = edge
            .rule_class()
            .attribute(attr_name)
            .unwrap_or(edge.attribute());
        if attribute.required_providers().accepts_package_specification() {
            return;
        }
        sink.attribute_error(
            attr_name,
            DepCheckError::MisplacedPackageGroup {
                attribute: attr_name.to_owned(),
                rule_class: edge.rule_class().name().to_owned(),
                consumer: edge.consumer().label().dupe(),
                prerequisite: prerequisite.describe_with_aliases(TargetMode::WithKind),
            }
            .to_string(),
        );
    }

    fn validate_visibility(
        &self,
        edge: &DependencyEdge<'_>,
        config: &DepCheckConfig,
        sink: &mut dyn DiagnosticSink,
    ) {
        if !config.checks_enabled().visibility {
            return;
        }
        let attribute = edge.attribute();
        let attr_name = attribute.name();
        let consumer = edge.consumer();
        let prerequisite = edge.prerequisite();

        // Late-bound attributes are resolved during analysis and exempt.
        if attribute.is_analysis_dependent() {
            return;
        }
        if attr_name == TOOLCHAINS_ATTRIBUTE
            && !self
                .policy
                .check_visibility_for_toolchains(consumer, prerequisite.target_label())
        {
            return;
        }
        // While evaluating an aspect, only that aspect's own implicit
        // dependencies are checked. The rule's and other aspects' are checked
        // when those are evaluated.
        if let Some(aspect) = edge.main_aspect() {
            if !attribute.is_implicit() || !aspect.defines_attribute(attr_name) {
                return;
            }
        }

        let resolver = VisibilityResolver::new(
            self.policy,
            self.policy.check_visibility_for_experimental(consumer),
            config.max_macro_depth,
        );

        // Implicit dependencies of rules and aspects exported from a `.bzl`
        // are authored there, so that is where they are checked from.
        // `$config_dependencies` is always checked as a normal edge.
        let owner_bzl = if attribute.is_implicit() && attr_name != CONFIG_SETTING_DEPS_ATTRIBUTE {
            edge.owner_definition_bzl()
        } else {
            None
        };

        let visible: Result<bool, VisibilityResolutionError> = match owner_bzl {
            Some(bzl) => match resolver.is_visible_to_location(prerequisite, bzl.package()) {
                Ok(false) => {
                    // Fall back to the consuming target for compatibility.
                    resolver.is_visible_to_declaration(prerequisite, Declaration::Target(consumer))
                }
                res => res,
            },
            None => resolver.is_visible_to_declaration(prerequisite, Declaration::Target(consumer)),
        };

        match visible {
            Ok(true) => {}
            Ok(false) => {
                // Always suggest granting visibility to the definition, never
                // to the fallback.
                let from = match owner_bzl {
                    Some(bzl) => bzl.to_string(),
                    None => consumer.label().to_string(),
                };
                let prerequisite_desc = prerequisite.describe_with_aliases(TargetMode::WithoutKind);
                let err = if prerequisite.target().is_source_file() {
                    DepCheckError::SourceFileNotVisible {
                        prerequisite: prerequisite_desc,
                        from,
                    }
                } else {
                    DepCheckError::NotVisible {
                        prerequisite: prerequisite_desc,
                        from,
                    }
                };
                sink.rule_error(err.to_string());
            }
            Err(e) => sink.rule_error(DepCheckError::from(e).to_string()),
        }
    }

    /// A non-test rule must not depend on testonly targets.
    fn validate_testonly(
        &self,
        edge: &DependencyEdge<'_>,
        config: &DepCheckConfig,
        sink: &mut dyn DiagnosticSink,
    ) {
        // Alias-like rules are skipped; the testonly check happens between
        // the depender and the alias's actual target.
        if edge.rule_class().can_have_any_provider() {
            return;
        }
        let consumer = edge.consumer();
        let prerequisite = edge.prerequisite();
        if !prerequisite.is_testonly() || consumer.is_testonly() {
            return;
        }

        let violation = match prerequisite.generating_rule_label() {
            None => TestOnlyViolation::Target {
                consumer: consumer.label().dupe(),
                prerequisite: prerequisite.describe_with_aliases(TargetMode::WithoutKind),
            },
            Some(generating_rule) if config.checks_enabled().testonly_for_generated_outputs => {
                TestOnlyViolation::OutputFile {
                    consumer: consumer.label().dupe(),
                    prerequisite: prerequisite.describe_with_aliases(TargetMode::WithoutKind),
                    generating_rule: generating_rule.dupe(),
                }
            }
            Some(_) => return,
        };

        if self.policy.package_under_experimental(consumer.pkg()) {
            sink.rule_warning(DepCheckWarning::from(violation).to_string());
        } else {
            sink.rule_error(DepCheckError::from(violation).to_string());
        }
    }

    fn validate_deprecation(&self, edge: &DependencyEdge<'_>, sink: &mut dyn DiagnosticSink) {
        // For aspects the base target already warned. A deprecated consumer
        // does not need to hear about its deprecated dependencies.
        if edge.for_aspect_evaluation() || edge.consumer().deprecation().is_some() {
            return;
        }
        let prerequisite = edge.prerequisite();
        let Some(message) = prerequisite.deprecation_warning() else {
            return;
        };
        let consumer = edge.consumer().label();
        let prerequisite_label = prerequisite.dependency_label();
        if self
            .policy
            .is_same_logical_package(consumer.pkg(), prerequisite_label.pkg())
        {
            return;
        }

        let warning = match prerequisite.generating_rule_label() {
            Some(generating_rule) => DepCheckWarning::DeprecatedOutputFile {
                consumer: consumer.dupe(),
                prerequisite: prerequisite.target_label().dupe(),
                generating_rule: generating_rule.dupe(),
                message: message.to_owned(),
            },
            None => DepCheckWarning::DeprecatedTarget {
                consumer: consumer.dupe(),
                prerequisite: prerequisite_label.dupe(),
                message: message.to_owned(),
            },
        };
        sink.rule_warning(warning.to_string());
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use depcheck_core::bzl::ImportPath;
    use depcheck_core::package::PackageLabel;
    use depcheck_core::target::label::TargetLabel;
    use depcheck_node::aspect::AspectClass;
    use depcheck_node::attrs::attr::Attribute;
    use depcheck_node::attrs::providers::RequiredProviders;
    use depcheck_node::nodes::kind::TargetKind;
    use depcheck_node::nodes::macro_instance::MacroClass;
    use depcheck_node::nodes::macro_instance::MacroInstance;
    use depcheck_node::nodes::prerequisite::Prerequisite;
    use depcheck_node::nodes::unconfigured::testing::TargetNodeBuilder;
    use depcheck_node::nodes::unconfigured::TargetNode;
    use depcheck_node::rule::Definition;
    use depcheck_node::rule::RuleClass;
    use dupe::Dupe;

    use crate::config::DepCheckConfig;
    use crate::diagnostics::CollectedDiagnostics;
    use crate::diagnostics::Diagnostic;
    use crate::edge::DependencyEdge;
    use crate::policy::DefaultPrerequisitePolicy;
    use crate::validator::PrerequisiteValidator;

    fn starlark_rule(attributes: Vec<Attribute>) -> RuleClass {
        RuleClass::new(
            "my_rule",
            Definition::Starlark(ImportPath::testing_parse("//rules:defs.bzl")),
            false,
            attributes,
        )
    }

    fn check(
        consumer: &TargetNode,
        attr: &Attribute,
        prereq: &Prerequisite,
    ) -> CollectedDiagnostics {
        check_with(consumer, attr, prereq, None, &DepCheckConfig::default())
    }

    fn check_with(
        consumer: &TargetNode,
        attr: &Attribute,
        prereq: &Prerequisite,
        aspect: Option<&AspectClass>,
        config: &DepCheckConfig,
    ) -> CollectedDiagnostics {
        let policy = DefaultPrerequisitePolicy::default();
        let validator = PrerequisiteValidator::new(&policy);
        let mut edge = DependencyEdge::new(consumer, attr, prereq).unwrap();
        if let Some(aspect) = aspect {
            edge = edge.for_aspect(aspect);
        }
        let mut sink = CollectedDiagnostics::new();
        validator.validate(&edge, config, &mut sink);
        sink
    }

    fn private_target(label: &str) -> Prerequisite {
        Prerequisite::new(
            TargetNodeBuilder::rule(label, starlark_rule(Vec::new()))
                .visible_to(&[])
                .build(),
        )
    }

    #[test]
    fn test_checks_are_independent() {
        let consumer = TargetNodeBuilder::rule("//app:bin", starlark_rule(Vec::new())).build();
        let prereq = Prerequisite::new(
            TargetNodeBuilder::rule("//lib:old", starlark_rule(Vec::new()))
                .visible_to(&[])
                .testonly()
                .deprecated("use //lib:new")
                .build(),
        );
        let diagnostics = check(&consumer, &Attribute::testing_new("deps"), &prereq);
        let messages: Vec<_> = diagnostics
            .diagnostics()
            .iter()
            .map(|d| d.to_string())
            .collect();
        assert_eq!(3, messages.len(), "{:?}", messages);
        assert!(messages[0].starts_with(
            "error: Visibility error:\ntarget 'root//lib:old' is not visible from\ntarget 'root//app:bin'"
        ));
        assert!(messages[1].contains("depends on testonly target 'root//lib:old'"));
        assert_eq!(
            "warning: target 'root//app:bin' depends on deprecated target 'root//lib:old': use //lib:new",
            messages[2]
        );
    }

    #[test]
    fn test_visibility_disabled() {
        let consumer = TargetNodeBuilder::rule("//app:bin", starlark_rule(Vec::new())).build();
        let config = DepCheckConfig {
            check_visibility: false,
            ..DepCheckConfig::default()
        };
        let diagnostics = check_with(
            &consumer,
            &Attribute::testing_new("deps"),
            &private_target("//lib:a"),
            None,
            &config,
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_late_bound_and_toolchains_exempt() {
        let consumer = TargetNodeBuilder::rule("//app:bin", starlark_rule(Vec::new())).build();
        let prereq = private_target("//lib:a");
        assert!(check(&consumer, &Attribute::testing_new(":cc_toolchain"), &prereq).is_empty());
        // Toolchains are checked by default.
        assert!(check(&consumer, &Attribute::testing_new("$toolchains"), &prereq).has_errors());
    }

    #[test]
    fn test_implicit_dep_checked_from_bzl() {
        let consumer = TargetNodeBuilder::rule("//app:bin", starlark_rule(Vec::new())).build();
        let attr = Attribute::testing_new("$compiler");

        let tool = Prerequisite::new(
            TargetNodeBuilder::rule("//tools:cc", starlark_rule(Vec::new()))
                .visible_to(&["//rules"])
                .build(),
        );
        assert!(check(&consumer, &attr, &tool).is_empty());

        // Visible only to the consumer: allowed through the fallback.
        let tool = Prerequisite::new(
            TargetNodeBuilder::rule("//tools:cc", starlark_rule(Vec::new()))
                .visible_to(&["//app"])
                .build(),
        );
        assert!(check(&consumer, &attr, &tool).is_empty());

        let diagnostics = check(&consumer, &attr, &private_target("//tools:cc"));
        assert!(
            diagnostics.diagnostics()[0]
                .message()
                .contains("is not visible from\ntarget 'root//rules:defs.bzl'"),
            "{:?}",
            diagnostics
        );
    }

    #[test]
    fn test_config_dependencies_checked_as_normal_edge() {
        let consumer = TargetNodeBuilder::rule("//app:bin", starlark_rule(Vec::new())).build();
        let setting = Prerequisite::new(
            TargetNodeBuilder::rule("//config:opt", starlark_rule(Vec::new()))
                .visible_to(&["//rules"])
                .build(),
        );
        let diagnostics = check(
            &consumer,
            &Attribute::testing_new("$config_dependencies"),
            &setting,
        );
        assert!(
            diagnostics.diagnostics()[0]
                .message()
                .contains("is not visible from\ntarget 'root//app:bin'"),
            "{:?}",
            diagnostics
        );
    }

    #[test]
    fn test_aspect_only_checks_own_implicit_deps() {
        let consumer = TargetNodeBuilder::rule("//app:bin", starlark_rule(Vec::new())).build();
        let aspect = AspectClass::new(
            "lint",
            Definition::Starlark(ImportPath::testing_parse("//aspects:lint.bzl")),
            ["$linter"],
        );
        let config = DepCheckConfig::default();
        let prereq = private_target("//tools:linter");
        let run = |name: &str| {
            check_with(&consumer, &Attribute::testing_new(name), &prereq, Some(&aspect), &config)
        };

        assert!(run("deps").is_empty());
        assert!(run("$compiler").is_empty());
        let diagnostics = run("$linter");
        assert!(
            diagnostics.diagnostics()[0]
                .message()
                .contains("target 'root//aspects:lint.bzl'"),
            "{:?}",
            diagnostics
        );
    }

    #[test]
    fn test_misplaced_package_group() {
        let group = Prerequisite::new(
            TargetNodeBuilder::new("//common:friends", TargetKind::PackageGroup).build(),
        );
        let allowlist = Attribute::new(
            "allowlist",
            RequiredProviders::all_of(&["PackageSpecificationInfo"]),
        )
        .unwrap();
        let consumer =
            TargetNodeBuilder::rule("//app:bin", starlark_rule(vec![allowlist.dupe()])).build();

        let diagnostics = check(&consumer, &Attribute::testing_new("deps"), &group);
        assert_eq!(
            &[Diagnostic::AttributeError {
                attribute: "deps".to_owned(),
                message: "in deps attribute of my_rule rule root//app:bin: package group target 'root//common:friends' is misplaced here (they are only allowed in the visibility attribute)".to_owned(),
            }],
            diagnostics.diagnostics()
        );

        assert!(check(&consumer, &Attribute::testing_new("visibility"), &group).is_empty());
        assert!(
            check(&consumer, &Attribute::testing_new("$allowlist_function_transition"), &group)
                .is_empty()
        );
        // The rule's definition of the attribute wins over the edge's copy.
        assert!(check(&consumer, &Attribute::testing_new("allowlist"), &group).is_empty());
    }

    #[test]
    fn test_testonly_skipped_for_forwarding_rules() {
        let alias = RuleClass::new("alias", Definition::Builtin, true, []);
        let consumer = TargetNodeBuilder::rule("//app:alias", alias).build();
        let prereq = Prerequisite::new(
            TargetNodeBuilder::rule("//lib:mock", starlark_rule(Vec::new()))
                .testonly()
                .build(),
        );
        assert!(check(&consumer, &Attribute::testing_new("actual"), &prereq).is_empty());

        let test = TargetNodeBuilder::rule("//app:test", starlark_rule(Vec::new()))
            .testonly()
            .build();
        assert!(check(&test, &Attribute::testing_new("deps"), &prereq).is_empty());
    }

    #[test]
    fn test_testonly_in_experimental_is_warning() {
        let consumer =
            TargetNodeBuilder::rule("//experimental/app:bin", starlark_rule(Vec::new())).build();
        let prereq = Prerequisite::new(
            TargetNodeBuilder::rule("//experimental/lib:mock", starlark_rule(Vec::new()))
                .testonly()
                .build(),
        );
        let diagnostics = check(&consumer, &Attribute::testing_new("deps"), &prereq);
        assert!(!diagnostics.has_errors());
        assert_eq!(1, diagnostics.warnings().count());
    }

    #[test]
    fn test_deprecation_suppressed() {
        let deprecated = Prerequisite::new(
            TargetNodeBuilder::rule("//lib:old", starlark_rule(Vec::new()))
                .deprecated("gone")
                .build(),
        );
        let attr = Attribute::testing_new("deps");

        let same_package = TargetNodeBuilder::rule("//lib:user", starlark_rule(Vec::new())).build();
        assert!(check(&same_package, &attr, &deprecated).is_empty());

        let also_deprecated = TargetNodeBuilder::rule("//app:bin", starlark_rule(Vec::new()))
            .deprecated("also gone")
            .build();
        assert!(check(&also_deprecated, &attr, &deprecated).is_empty());

        let consumer = TargetNodeBuilder::rule("//app:bin", starlark_rule(Vec::new())).build();
        let aspect = AspectClass::new("a", Definition::Builtin, []);
        let diagnostics = check_with(
            &consumer,
            &attr,
            &deprecated,
            Some(&aspect),
            &DepCheckConfig::default(),
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_deprecated_output_file() {
        let consumer = TargetNodeBuilder::rule("//app:bin", starlark_rule(Vec::new())).build();
        let output = Prerequisite::new(
            TargetNodeBuilder::new(
                "//gen:out.h",
                TargetKind::GeneratedFile {
                    generating_rule: TargetLabel::testing_parse("//gen:rule"),
                },
            )
            .deprecated("regenerate")
            .build(),
        );
        let diagnostics = check(&consumer, &Attribute::testing_new("srcs"), &output);
        assert_eq!(
            vec!["target 'root//app:bin' depends on the output file root//gen:out.h of a deprecated rule 'root//gen:rule': regenerate"],
            diagnostics.warnings().map(|d| d.message()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_deprecated_output_file_through_alias() {
        let alias_rule = RuleClass::new("alias", Definition::Builtin, true, []);
        let output = TargetNodeBuilder::new(
            "//gen:out.h",
            TargetKind::GeneratedFile {
                generating_rule: TargetLabel::testing_parse("//gen:rule"),
            },
        )
        .deprecated("regenerate")
        .build();
        let attr = Attribute::testing_new("srcs");

        let alias = TargetNodeBuilder::rule("//fwd:header", alias_rule.dupe()).build();
        let prereq = Prerequisite::new(output.dupe()).through_alias(&alias);
        let consumer = TargetNodeBuilder::rule("//app:bin", starlark_rule(Vec::new())).build();
        assert_eq!(
            vec![
                "target 'root//app:bin' depends on the output file root//gen:out.h of a deprecated rule 'root//gen:rule': regenerate"
            ],
            check(&consumer, &attr, &prereq)
                .warnings()
                .map(|d| d.message())
                .collect::<Vec<_>>()
        );

        // An alias in the consumer's own package hides the deprecation.
        let local_alias = TargetNodeBuilder::rule("//app:header", alias_rule).build();
        let prereq = Prerequisite::new(output).through_alias(&local_alias);
        assert!(check(&consumer, &attr, &prereq).is_empty());
    }

    #[test]
    fn test_source_file_not_visible_suggests_exports_files() {
        let consumer = TargetNodeBuilder::rule("//app:bin", starlark_rule(Vec::new())).build();
        let source = Prerequisite::new(
            TargetNodeBuilder::new("//lib:a.txt", TargetKind::SourceFile)
                .visible_to(&[])
                .build(),
        );
        let diagnostics = check(&consumer, &Attribute::testing_new("srcs"), &source);
        assert_eq!(
            vec![Diagnostic::RuleError(
                "Visibility error:\ntarget 'root//lib:a.txt' is not visible from\ntarget 'root//app:bin'\nRecommendation: modify the visibility declaration if you think the dependency is legitimate. For more info see https://buck2.build/docs/concepts/visibility/. To set the visibility of that source file target, use the exports_files() function".to_owned()
            )],
            diagnostics.into_diagnostics()
        );
    }

    #[test]
    fn test_macro_nesting_too_deep_is_rule_error() {
        let app = PackageLabel::testing_parse("//app");
        let given = TargetLabel::testing_parse("//common:lib");
        let class = MacroClass::new("m", ImportPath::testing_parse("//macros:m.bzl"), false);
        let outer = MacroInstance::new("outer", app.dupe(), class.dupe(), None, [given.dupe()]);
        let inner = MacroInstance::new("inner", app, class, Some(outer), [given]);
        let consumer = TargetNodeBuilder::rule("//app:gen", starlark_rule(Vec::new()))
            .declared_in(inner)
            .build();
        let prereq = Prerequisite::new(
            TargetNodeBuilder::rule("//common:lib", starlark_rule(Vec::new()))
                .visible_to(&["//app"])
                .build(),
        );
        let attr = Attribute::testing_new("deps");

        let deep_enough = DepCheckConfig {
            max_macro_depth: 2,
            ..DepCheckConfig::default()
        };
        assert!(check_with(&consumer, &attr, &prereq, None, &deep_enough).is_empty());

        let too_shallow = DepCheckConfig {
            max_macro_depth: 1,
            ..DepCheckConfig::default()
        };
        let diagnostics = check_with(&consumer, &attr, &prereq, None, &too_shallow);
        assert_eq!(1, diagnostics.diagnostics().len());
        assert_matches!(
            &diagnostics.diagnostics()[0],
            Diagnostic::RuleError(message) if message.starts_with(
                "Visibility error:\ncannot check target 'root//common:lib' from "
            ) && message.contains("macro delegation chain is deeper than 1")
        );
    }

    #[test]
    fn test_missing_visibility_reported() {
        let consumer = TargetNodeBuilder::rule("//app:bin", starlark_rule(Vec::new())).build();
        let prereq = private_target("//lib:a").with_visibility(None);
        let diagnostics = check(&consumer, &Attribute::testing_new("deps"), &prereq);
        assert_eq!(
            vec!["Visibility error:\ntarget 'root//lib:a' has no visibility information"],
            diagnostics.errors().map(|d| d.message()).collect::<Vec<_>>()
        );
    }
}
