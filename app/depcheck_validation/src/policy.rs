/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

//! Repository conventions the checks defer to: which packages are
//! "experimental" and which pairs of packages count as one logical package.

use anyhow::Context;
use depcheck_core::cells::paths::CellRelativePath;
use depcheck_core::legacy_configs::BuckconfigKeyRef;
use depcheck_core::legacy_configs::LegacyBuckConfig;
use depcheck_core::package::PackageLabel;
use depcheck_core::target::label::TargetLabel;
use depcheck_node::nodes::unconfigured::TargetNode;

use crate::config::DEPCHECK_SECTION;

#[derive(Debug, thiserror::Error)]
enum PolicyConfigError {
    #[error("Expected `<path>=<path>` in `{key}`, got `{entry}`")]
    MalformedPair { key: String, entry: String },
}

pub trait PrerequisitePolicy: Send + Sync {
    /// Whether `this_package` may treat `prerequisite_package` as its own,
    /// e.g. a test directory and the source directory it tests.
    fn is_same_logical_package(
        &self,
        this_package: &PackageLabel,
        prerequisite_package: &PackageLabel,
    ) -> bool;

    fn package_under_experimental(&self, package: &PackageLabel) -> bool;

    /// When false, consumers located in experimental packages skip
    /// visibility enforcement.
    fn check_visibility_for_experimental(&self, consumer: &TargetNode) -> bool;

    /// Whether the edge from `consumer` to the toolchain `prerequisite` is
    /// subject to visibility.
    fn check_visibility_for_toolchains(
        &self,
        consumer: &TargetNode,
        prerequisite: &TargetLabel,
    ) -> bool;
}

/// Configurable policy, read from the `[depcheck]` section.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DefaultPrerequisitePolicy {
    experimental_roots: Vec<CellRelativePath>,
    check_visibility_for_experimental: bool,
    check_visibility_for_toolchains: bool,
    /// Path prefixes whose subtrees mirror each other, e.g. `javatests`/`java`.
    logical_package_pairs: Vec<(CellRelativePath, CellRelativePath)>,
}

impl Default for DefaultPrerequisitePolicy {
    fn default() -> Self {
        DefaultPrerequisitePolicy {
            experimental_roots: vec![CellRelativePath::unchecked_new("experimental")],
            check_visibility_for_experimental: false,
            check_visibility_for_toolchains: true,
            logical_package_pairs: Vec::new(),
        }
    }
}

impl DefaultPrerequisitePolicy {
    pub fn new(
        experimental_roots: Vec<CellRelativePath>,
        check_visibility_for_experimental: bool,
        check_visibility_for_toolchains: bool,
        logical_package_pairs: Vec<(CellRelativePath, CellRelativePath)>,
    ) -> Self {
        DefaultPrerequisitePolicy {
            experimental_roots,
            check_visibility_for_experimental,
            check_visibility_for_toolchains,
            logical_package_pairs,
        }
    }

    pub fn from_config(config: &LegacyBuckConfig) -> anyhow::Result<Self> {
        let defaults = DefaultPrerequisitePolicy::default();

        let roots_key = BuckconfigKeyRef {
            section: DEPCHECK_SECTION,
            property: "experimental_roots",
        };
        let experimental_roots = match config.parse_list(roots_key) {
            None => defaults.experimental_roots,
            Some(roots) => roots
                .iter()
                .map(|root| CellRelativePath::new(root))
                .collect::<anyhow::Result<Vec<_>>>()
                .with_context(|| format!("Reading `{}`", roots_key))?,
        };

        let check_visibility_for_experimental = config
            .parse_value(BuckconfigKeyRef {
                section: DEPCHECK_SECTION,
                property: "check_visibility_for_experimental",
            })?
            .unwrap_or(defaults.check_visibility_for_experimental);
        let check_visibility_for_toolchains = config
            .parse_value(BuckconfigKeyRef {
                section: DEPCHECK_SECTION,
                property: "check_visibility_for_toolchains",
            })?
            .unwrap_or(defaults.check_visibility_for_toolchains);

        let pairs_key = BuckconfigKeyRef {
            section: DEPCHECK_SECTION,
            property: "logical_package_pairs",
        };
        let logical_package_pairs = config
            .parse_list(pairs_key)
            .unwrap_or_default()
            .iter()
            .map(|entry| parse_pair(entry, pairs_key))
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(DefaultPrerequisitePolicy {
            experimental_roots,
            check_visibility_for_experimental,
            check_visibility_for_toolchains,
            logical_package_pairs,
        })
    }
}

fn parse_pair(
    entry: &str,
    key: BuckconfigKeyRef,
) -> anyhow::Result<(CellRelativePath, CellRelativePath)> {
    let (left, right) = entry
        .split_once('=')
        .ok_or_else(|| PolicyConfigError::MalformedPair {
            key: key.to_string(),
            entry: entry.to_owned(),
        })?;
    let left = CellRelativePath::new(left.trim()).with_context(|| format!("Reading `{}`", key))?;
    let right =
        CellRelativePath::new(right.trim()).with_context(|| format!("Reading `{}`", key))?;
    Ok((left, right))
}

/// `a` under `a_root` and `b` under `b_root` at the same relative position.
fn mirrors(
    a: &CellRelativePath,
    a_root: &CellRelativePath,
    b: &CellRelativePath,
    b_root: &CellRelativePath,
) -> bool {
    match (a.strip_prefix(a_root), b.strip_prefix(b_root)) {
        (Some(a_rest), Some(b_rest)) => a_rest == b_rest,
        _ => false,
    }
}

impl PrerequisitePolicy for DefaultPrerequisitePolicy {
    fn is_same_logical_package(
        &self,
        this_package: &PackageLabel,
        prerequisite_package: &PackageLabel,
    ) -> bool {
        if this_package == prerequisite_package {
            return true;
        }
        if this_package.cell() != prerequisite_package.cell() {
            return false;
        }
        let this = this_package.cell_relative_path();
        let that = prerequisite_package.cell_relative_path();
        self.logical_package_pairs
            .iter()
            .any(|(left, right)| {
                mirrors(this, left, that, right) || mirrors(this, right, that, left)
            })
    }

    fn package_under_experimental(&self, package: &PackageLabel) -> bool {
        self.experimental_roots
            .iter()
            .any(|root| package.cell_relative_path().starts_with(root))
    }

    fn check_visibility_for_experimental(&self, _consumer: &TargetNode) -> bool {
        self.check_visibility_for_experimental
    }

    fn check_visibility_for_toolchains(
        &self,
        _consumer: &TargetNode,
        _prerequisite: &TargetLabel,
    ) -> bool {
        self.check_visibility_for_toolchains
    }
}

#[cfg(test)]
mod tests {
    use depcheck_core::legacy_configs::LegacyBuckConfig;
    use depcheck_core::package::PackageLabel;
    use depcheck_core::target::label::TargetLabel;
    use depcheck_node::nodes::kind::TargetKind;
    use depcheck_node::nodes::unconfigured::testing::TargetNodeBuilder;

    use crate::policy::DefaultPrerequisitePolicy;
    use crate::policy::PrerequisitePolicy;

    fn pkg(s: &str) -> PackageLabel {
        PackageLabel::testing_parse(s)
    }

    #[test]
    fn test_experimental() {
        let policy = DefaultPrerequisitePolicy::default();
        assert!(policy.package_under_experimental(&pkg("//experimental")));
        assert!(policy.package_under_experimental(&pkg("//experimental/users/x")));
        assert!(!policy.package_under_experimental(&pkg("//experimentalist")));
        assert!(!policy.package_under_experimental(&pkg("//app/experimental")));
    }

    #[test]
    fn test_same_logical_package() -> anyhow::Result<()> {
        let config = LegacyBuckConfig::parse(
            "[depcheck]\nlogical_package_pairs = javatests=java, tests = src\n",
            ".buckconfig",
        )?;
        let policy = DefaultPrerequisitePolicy::from_config(&config)?;
        assert!(policy.is_same_logical_package(&pkg("//a/b"), &pkg("//a/b")));
        assert!(policy.is_same_logical_package(&pkg("//javatests/com/x"), &pkg("//java/com/x")));
        assert!(policy.is_same_logical_package(&pkg("//java/com/x"), &pkg("//javatests/com/x")));
        assert!(policy.is_same_logical_package(&pkg("//tests"), &pkg("//src")));
        assert!(!policy.is_same_logical_package(&pkg("//javatests/com/x"), &pkg("//java/com/y")));
        assert!(!policy.is_same_logical_package(
            &pkg("//javatests/com/x"),
            &PackageLabel::testing_new("other", "java/com/x")
        ));
        assert!(!policy.is_same_logical_package(&pkg("//a"), &pkg("//a/b")));
        Ok(())
    }

    #[test]
    fn test_from_config() -> anyhow::Result<()> {
        let config = LegacyBuckConfig::parse(
            "[depcheck]\n\
             experimental_roots = sandbox, labs/tmp\n\
             check_visibility_for_experimental = true\n\
             check_visibility_for_toolchains = false\n",
            ".buckconfig",
        )?;
        let policy = DefaultPrerequisitePolicy::from_config(&config)?;
        assert!(policy.package_under_experimental(&pkg("//labs/tmp/a")));
        assert!(!policy.package_under_experimental(&pkg("//experimental")));

        let consumer = TargetNodeBuilder::new("//app:bin", TargetKind::SourceFile).build();
        assert!(policy.check_visibility_for_experimental(&consumer));
        assert!(!policy.check_visibility_for_toolchains(
            &consumer,
            &TargetLabel::testing_parse("//toolchains:cc")
        ));
        Ok(())
    }

    #[test]
    fn test_malformed_config() -> anyhow::Result<()> {
        let config =
            LegacyBuckConfig::parse("[depcheck]\nlogical_package_pairs = javatests\n", "x")?;
        assert!(DefaultPrerequisitePolicy::from_config(&config).is_err());
        let config = LegacyBuckConfig::parse("[depcheck]\nexperimental_roots = /abs\n", "x")?;
        assert!(DefaultPrerequisitePolicy::from_config(&config).is_err());
        Ok(())
    }
}
