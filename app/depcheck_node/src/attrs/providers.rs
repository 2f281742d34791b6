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
use dupe::Dupe;
use itertools::Itertools;

/// Providers that identify a target as a set of package specifications.
pub const PACKAGE_SPECIFICATION_PROVIDERS: &[&str] =
    &["PackageSpecificationProvider", "PackageSpecificationInfo"];

/// Providers an attribute requires of the targets it references: the
/// dependency must satisfy at least one of the alternatives, and an
/// alternative is satisfied when all of its providers are present.
///
/// No alternatives means anything is accepted.
#[derive(Clone, Dupe, Debug, Hash, Eq, PartialEq, Allocative)]
pub struct RequiredProviders(Arc<[Box<[Arc<str>]>]>);

impl RequiredProviders {
    pub fn accept_any() -> RequiredProviders {
        RequiredProviders(Arc::from(Vec::new()))
    }

    /// Require all of `providers`.
    pub fn all_of(providers: &[&str]) -> RequiredProviders {
        RequiredProviders::one_of(&[providers])
    }

    pub fn one_of(alternatives: &[&[&str]]) -> RequiredProviders {
        RequiredProviders(
            alternatives
                .iter()
                .map(|alt| alt.iter().map(|p| Arc::<str>::from(*p)).collect())
                .collect(),
        )
    }

    pub fn alternatives(&self) -> impl Iterator<Item = &[Arc<str>]> {
        self.0.iter().map(|alt| &**alt)
    }

    /// Whether the attribute is designed to take package group targets.
    pub fn accepts_package_specification(&self) -> bool {
        self.alternatives().any(|alt| {
            alt.iter()
                .any(|p| PACKAGE_SPECIFICATION_PROVIDERS.contains(&&**p))
        })
    }
}

impl Default for RequiredProviders {
    fn default() -> Self {
        RequiredProviders::accept_any()
    }
}

impl Display for RequiredProviders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "no providers required");
        }
        write!(
            f,
            "{}",
            self.alternatives()
                .map(|alt| format!("[{}]", alt.iter().join(", ")))
                .join(" or ")
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::attrs::providers::RequiredProviders;

    #[test]
    fn test_display() {
        assert_eq!(
            "no providers required",
            RequiredProviders::accept_any().to_string()
        );
        assert_eq!(
            "[CcInfo, DefaultInfo] or [JavaInfo]",
            RequiredProviders::one_of(&[&["CcInfo", "DefaultInfo"], &["JavaInfo"]]).to_string()
        );
    }

    #[test]
    fn test_accepts_package_specification() {
        assert!(!RequiredProviders::accept_any().accepts_package_specification());
        assert!(!RequiredProviders::all_of(&["CcInfo"]).accepts_package_specification());
        assert!(
            RequiredProviders::one_of(&[&["CcInfo"], &["PackageSpecificationInfo"]])
                .accepts_package_specification()
        );
        assert!(
            RequiredProviders::all_of(&["PackageSpecificationProvider"])
                .accepts_package_specification()
        );
    }
}
