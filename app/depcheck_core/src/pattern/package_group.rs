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
use crate::package::PackageLabel;
use crate::pattern::package_spec::PackageSpecification;

#[derive(Debug, thiserror::Error)]
enum PackageGroupContentsError {
    #[error("`{0}` cannot be negated")]
    CannotNegate(String),
}

/// The packages matched by one package group: a union of included
/// specifications minus a union of excluded (`-` prefixed) ones.
#[derive(Clone, Debug, Default, Hash, Eq, PartialEq, Allocative)]
pub struct PackageGroupContents {
    included: Box<[PackageSpecification]>,
    excluded: Box<[PackageSpecification]>,
}

impl PackageGroupContents {
    pub fn new(
        included: Vec<PackageSpecification>,
        excluded: Vec<PackageSpecification>,
    ) -> PackageGroupContents {
        PackageGroupContents {
            included: included.into_boxed_slice(),
            excluded: excluded.into_boxed_slice(),
        }
    }

    /// Build from the strings of a `packages` list. `private` contributes nothing.
    pub fn from_specs<'a>(
        specs: impl IntoIterator<Item = &'a str>,
        current_cell: &CellName,
    ) -> anyhow::Result<PackageGroupContents> {
        let mut included = Vec::new();
        let mut excluded = Vec::new();
        for spec in specs {
            if let Some(negated) = spec.strip_prefix('-') {
                if negated == PackageSpecification::PUBLIC
                    || negated == PackageSpecification::PRIVATE
                {
                    return Err(PackageGroupContentsError::CannotNegate(negated.to_owned()).into());
                }
                excluded.push(PackageSpecification::parse(negated, current_cell)?);
            } else if spec == PackageSpecification::PRIVATE {
                continue;
            } else {
                included.push(PackageSpecification::parse(spec, current_cell)?);
            }
        }
        Ok(PackageGroupContents::new(included, excluded))
    }

    pub fn testing_new(specs: &[&str]) -> PackageGroupContents {
        PackageGroupContents::from_specs(specs.iter().copied(), &CellName::testing_new("root"))
            .unwrap()
    }

    /// A group containing every package.
    pub fn public() -> PackageGroupContents {
        PackageGroupContents::new(vec![PackageSpecification::Everything], Vec::new())
    }

    pub fn contains_package(&self, package: &PackageLabel) -> bool {
        self.included.iter().any(|s| s.contains_package(package))
            && !self.excluded.iter().any(|s| s.contains_package(package))
    }

    pub fn is_empty(&self) -> bool {
        self.included.is_empty()
    }

    pub fn included(&self) -> &[PackageSpecification] {
        &self.included
    }

    pub fn excluded(&self) -> &[PackageSpecification] {
        &self.excluded
    }
}

impl Display for PackageGroupContents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        let mut first = true;
        for (prefix, spec) in self
            .included
            .iter()
            .map(|s| ("", s))
            .chain(self.excluded.iter().map(|s| ("-", s)))
        {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "\"{}{}\"", prefix, spec)?;
        }
        write!(f, "]")
    }
}
