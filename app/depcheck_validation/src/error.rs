/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

//! Text of every diagnostic the checks emit.

use depcheck_core::target::label::TargetLabel;
use thiserror::Error;

const VISIBILITY_RECOMMENDATION: &str = "Recommendation: modify the visibility declaration if you think the dependency is legitimate. For more info see https://buck2.build/docs/concepts/visibility/";

#[derive(Debug, Error)]
pub enum DepCheckError {
    #[error("Visibility error:\n{prerequisite} is not visible from\ntarget '{from}'\n{}", VISIBILITY_RECOMMENDATION)]
    NotVisible { prerequisite: String, from: String },
    #[error(
        "Visibility error:\n{prerequisite} is not visible from\ntarget '{from}'\n{}. To set the visibility of that source file target, use the exports_files() function",
        VISIBILITY_RECOMMENDATION
    )]
    SourceFileNotVisible { prerequisite: String, from: String },
    #[error(
        "in {attribute} attribute of {rule_class} rule {consumer}: {prerequisite} is misplaced here (they are only allowed in the visibility attribute)"
    )]
    MisplacedPackageGroup {
        attribute: String,
        rule_class: String,
        consumer: TargetLabel,
        prerequisite: String,
    },
    #[error(
        "non-experimental target '{consumer}' depends on experimental target '{prerequisite}' (you may not check in such a dependency, though you can test against it by setting `depcheck.experimental_deps_ok`)"
    )]
    ExperimentalDependency {
        consumer: TargetLabel,
        prerequisite: TargetLabel,
    },
    #[error(transparent)]
    TestOnly(#[from] TestOnlyViolation),
    #[error(transparent)]
    Resolution(#[from] VisibilityResolutionError),
}

#[derive(Debug, Error)]
pub enum DepCheckWarning {
    #[error(
        "non-experimental target '{consumer}' depends on experimental target '{prerequisite}' (ignored due to `depcheck.experimental_deps_ok`; do not submit)"
    )]
    ExperimentalDependency {
        consumer: TargetLabel,
        prerequisite: TargetLabel,
    },
    #[error(transparent)]
    TestOnly(#[from] TestOnlyViolation),
    #[error("target '{consumer}' depends on deprecated target '{prerequisite}': {message}")]
    DeprecatedTarget {
        consumer: TargetLabel,
        prerequisite: TargetLabel,
        message: String,
    },
    #[error(
        "target '{consumer}' depends on the output file {prerequisite} of a deprecated rule '{generating_rule}': {message}"
    )]
    DeprecatedOutputFile {
        consumer: TargetLabel,
        prerequisite: TargetLabel,
        generating_rule: TargetLabel,
        message: String,
    },
}

/// Reported as an error, or as a warning for consumers in experimental packages.
#[derive(Debug, Error)]
pub enum TestOnlyViolation {
    #[error(
        "non-test target '{consumer}' depends on testonly {prerequisite} and doesn't have testonly attribute set"
    )]
    Target {
        consumer: TargetLabel,
        prerequisite: String,
    },
    #[error(
        "non-test target '{consumer}' depends on the output file {prerequisite} of a testonly rule {generating_rule} and doesn't have testonly attribute set"
    )]
    OutputFile {
        consumer: TargetLabel,
        prerequisite: String,
        generating_rule: TargetLabel,
    },
}

/// The visibility question could not be answered from the graph data.
#[derive(Debug, Error)]
pub enum VisibilityResolutionError {
    #[error(
        "Visibility error:\ncannot check {prerequisite} from {declaration}: macro delegation chain is deeper than {max_depth} (raise `depcheck.max_macro_depth` if this nesting is intended)"
    )]
    MacroNestingTooDeep {
        prerequisite: String,
        declaration: String,
        max_depth: usize,
    },
    #[error("Visibility error:\n{prerequisite} has no visibility information")]
    MissingVisibility { prerequisite: String },
}
