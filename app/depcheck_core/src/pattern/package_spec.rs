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

use crate::cells::name::CellName;
use crate::cells::paths::CellRelativePath;
use crate::package::split_cell;
use crate::package::PackageLabel;

#[derive(Debug, thiserror::Error)]
pub(crate) enum PackageSpecificationError {
    #[error("Package specification is empty")]
    Empty,
    #[error(
        "Invalid package specification `{0}`: expected `//pkg`, `//pkg/...`, `public` or `private`"
    )]
    UnexpectedFormat(String),
    #[error("Invalid package specification `{0}`: targets (`:`) are not allowed here")]
    ContainsTarget(String),
}

/// One pattern of packages, as written in a `package_group`'s `packages` list.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Allocative)]
pub enum PackageSpecification {
    /// Exactly one package, `//foo/bar`.
    SinglePackage(PackageLabel),
    /// The package and everything below it, `//foo/bar/...`. The package itself
    /// need not exist. `//...` is every package of a cell.
    AllPackagesBeneath(PackageLabel),
    /// Every package of every cell, `public`.
    Everything,
}

impl PackageSpecification {
    pub const PUBLIC: &'static str = "public";
    pub const PRIVATE: &'static str = "private";

    const RECURSIVE_SUFFIX: &'static str = "...";

    /// Parse a single non-negated specification.
    ///
    /// `private` is not a specification of its own (it matches nothing) and is
    /// handled by [`PackageGroupContents`](crate::pattern::package_group::PackageGroupContents).
    pub fn parse(s: &str, current_cell: &CellName) -> anyhow::Result<PackageSpecification> {
        if s.is_empty() {
            return Err(PackageSpecificationError::Empty.into());
        }
        if s == Self::PUBLIC {
            return Ok(PackageSpecification::Everything);
        }
        if s.contains(':') {
            return Err(PackageSpecificationError::ContainsTarget(s.to_owned()).into());
        }
        let (cell, path) = split_cell(s, current_cell)
            .ok_or_else(|| PackageSpecificationError::UnexpectedFormat(s.to_owned()))??;

        let (path, recursive) = if path == Self::RECURSIVE_SUFFIX {
            ("", true)
        } else if let Some(prefix) = path.strip_suffix("/...") {
            (prefix, true)
        } else {
            (path, false)
        };
        if path.split('/').any(|segment| segment == Self::RECURSIVE_SUFFIX) {
            return Err(PackageSpecificationError::UnexpectedFormat(s.to_owned()).into());
        }

        let package = PackageLabel::new(cell, CellRelativePath::new(path)?);
        Ok(if recursive {
            PackageSpecification::AllPackagesBeneath(package)
        } else {
            PackageSpecification::SinglePackage(package)
        })
    }

    pub fn testing_parse(s: &str) -> PackageSpecification {
        PackageSpecification::parse(s, &CellName::testing_new("root")).unwrap()
    }

    pub fn contains_package(&self, package: &PackageLabel) -> bool {
        match self {
            PackageSpecification::SinglePackage(p) => p == package,
            PackageSpecification::AllPackagesBeneath(p) => package.is_at_or_below(p),
            PackageSpecification::Everything => true,
        }
    }
}

impl Display for PackageSpecification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageSpecification::SinglePackage(p) => write!(f, "{}", p),
            PackageSpecification::AllPackagesBeneath(p) => {
                if p.cell_relative_path().is_empty() {
                    write!(f, "{}//{}", p.cell(), Self::RECURSIVE_SUFFIX)
                } else {
                    write!(f, "{}/{}", p, Self::RECURSIVE_SUFFIX)
                }
            }
            PackageSpecification::Everything => write!(f, "{}", Self::PUBLIC),
        }
    }
}
