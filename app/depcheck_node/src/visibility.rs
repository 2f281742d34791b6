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
use std::sync::Arc;

use allocative::Allocative;
use depcheck_core::package::PackageLabel;
use depcheck_core::pattern::package_group::PackageGroupContents;
use dupe::Dupe;
use gazebo::prelude::SliceExt;

#[derive(Debug, Eq, PartialEq, Hash, Allocative)]
struct VisibilitySpecificationData {
    package_groups: Box<[PackageGroupContents]>,
    created_in_symbolic_macro: bool,
}

/// Represents the visibility spec of a target: the package groups allowed to
/// depend on it.
///
/// The package's default visibility has already been folded in, so an empty
/// list genuinely means private. The same-package exemption is applied by the
/// validator, not here, and only for targets not created in symbolic macros.
#[derive(Debug, Eq, PartialEq, Hash, Clone, Dupe, Allocative)]
pub struct VisibilitySpecification(Arc<VisibilitySpecificationData>);

impl VisibilitySpecification {
    pub fn new(
        package_groups: Vec<PackageGroupContents>,
        created_in_symbolic_macro: bool,
    ) -> VisibilitySpecification {
        VisibilitySpecification(Arc::new(VisibilitySpecificationData {
            package_groups: package_groups.into_boxed_slice(),
            created_in_symbolic_macro,
        }))
    }

    pub fn public() -> VisibilitySpecification {
        VisibilitySpecification::new(vec![PackageGroupContents::public()], false)
    }

    pub fn private() -> VisibilitySpecification {
        VisibilitySpecification::new(Vec::new(), false)
    }

    /// Each argument is one package group's `packages` list.
    pub fn testing_new(groups: &[&[&str]]) -> VisibilitySpecification {
        VisibilitySpecification::new(
            groups.map(|g| PackageGroupContents::testing_new(g)),
            false,
        )
    }

    pub fn package_groups(&self) -> &[PackageGroupContents] {
        &self.0.package_groups
    }

    /// Targets declared inside a symbolic macro have the macro, not the
    /// package, as their encapsulation boundary.
    pub fn is_created_in_symbolic_macro(&self) -> bool {
        self.0.created_in_symbolic_macro
    }

    /// Union over the package groups.
    pub fn contains_package(&self, package: &PackageLabel) -> bool {
        self.0
            .package_groups
            .iter()
            .any(|group| group.contains_package(package))
    }

    /// Mark as created inside a symbolic macro.
    pub fn in_symbolic_macro(&self) -> VisibilitySpecification {
        VisibilitySpecification::new(self.package_groups().to_vec(), true)
    }

    /// Union with `other`, e.g. to fold in a package's default visibility.
    pub fn extend_with(&self, other: &VisibilitySpecification) -> VisibilitySpecification {
        VisibilitySpecification::new(
            self.package_groups()
                .iter()
                .chain(other.package_groups())
                .cloned()
                .collect(),
            self.is_created_in_symbolic_macro(),
        )
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(self.package_groups().map(|group| {
            serde_json::Value::Array(
                group
                    .included()
                    .iter()
                    .map(|s| s.to_string())
                    .chain(group.excluded().iter().map(|s| format!("-{}", s)))
                    .map(serde_json::Value::String)
                    .collect(),
            )
        }))
    }
}

impl Display for VisibilitySpecification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, group) in self.package_groups().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", group)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use depcheck_core::package::PackageLabel;

    use crate::visibility::VisibilitySpecification;

    #[test]
    fn test_contains_package_is_union() {
        let visibility =
            VisibilitySpecification::testing_new(&[&["//app/..."], &["//tools", "-//tools/x"]]);
        assert!(visibility.contains_package(&PackageLabel::testing_parse("//app/foo")));
        assert!(visibility.contains_package(&PackageLabel::testing_parse("//tools")));
        assert!(!visibility.contains_package(&PackageLabel::testing_parse("//other")));
        assert!(!VisibilitySpecification::private()
            .contains_package(&PackageLabel::testing_parse("//app")));
        assert!(VisibilitySpecification::public()
            .contains_package(&PackageLabel::testing_new("other", "x")));
    }

    #[test]
    fn test_extend_with_keeps_macro_flag() {
        let own = VisibilitySpecification::testing_new(&[&["//a"]]).in_symbolic_macro();
        let default = VisibilitySpecification::testing_new(&[&["//b/..."]]);
        let merged = own.extend_with(&default);
        assert!(merged.is_created_in_symbolic_macro());
        assert!(merged.contains_package(&PackageLabel::testing_parse("//a")));
        assert!(merged.contains_package(&PackageLabel::testing_parse("//b/c")));
    }

    #[test]
    fn test_display_and_json() {
        let visibility =
            VisibilitySpecification::testing_new(&[&["//a/...", "-//a/b"], &["public"]]);
        assert_eq!(
            r#"[["root//a/...", "-root//a/b"], ["public"]]"#,
            visibility.to_string()
        );
        assert_eq!(
            serde_json::json!([["root//a/...", "-root//a/b"], ["public"]]),
            visibility.to_json()
        );
    }
}
