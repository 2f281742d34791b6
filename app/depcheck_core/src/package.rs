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
use dupe::Dupe;

use crate::cells::name::CellName;
use crate::cells::paths::CellRelativePath;

#[derive(Debug, thiserror::Error)]
enum PackageLabelError {
    #[error("Package `{0}` must contain `//`")]
    MissingSlashes(String),
    #[error("Package `{0}` must not contain `:`; expected a package, not a target")]
    ContainsColon(String),
}

/// Identifies a package: a cell plus the cell-relative directory of its build file.
///
/// Equality is structural. Whether two distinct packages are "the same" for
/// diagnostic purposes is decided elsewhere.
#[derive(Clone, Dupe, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Allocative)]
pub struct PackageLabel {
    cell: CellName,
    path: CellRelativePath,
}

impl PackageLabel {
    pub fn new(cell: CellName, path: CellRelativePath) -> PackageLabel {
        PackageLabel { cell, path }
    }

    /// Parse `//foo/bar`, `cell//foo/bar` or `@cell//foo/bar`.
    /// A missing cell means `current_cell`.
    pub fn parse(s: &str, current_cell: &CellName) -> anyhow::Result<PackageLabel> {
        if s.contains(':') {
            return Err(PackageLabelError::ContainsColon(s.to_owned()).into());
        }
        let (cell, path) = split_cell(s, current_cell)
            .ok_or_else(|| PackageLabelError::MissingSlashes(s.to_owned()))??;
        Ok(PackageLabel::new(cell, CellRelativePath::new(path)?))
    }

    pub fn testing_new(cell: &str, path: &str) -> PackageLabel {
        PackageLabel::new(
            CellName::testing_new(cell),
            CellRelativePath::new(path).unwrap(),
        )
    }

    /// `cell//path` form, e.g. `root//foo/bar`.
    pub fn testing_parse(s: &str) -> PackageLabel {
        PackageLabel::parse(s, &CellName::testing_new("root")).unwrap()
    }

    pub fn cell(&self) -> &CellName {
        &self.cell
    }

    pub fn cell_relative_path(&self) -> &CellRelativePath {
        &self.path
    }

    /// Whether `self` is `other` or a package below it in the same cell.
    pub fn is_at_or_below(&self, other: &PackageLabel) -> bool {
        self.cell == other.cell && self.path.starts_with(&other.path)
    }
}

impl Display for PackageLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}//{}", self.cell, self.path)
    }
}

/// Split `cell//rest` into the cell and `rest`. Returns `None` if there is no `//`.
pub(crate) fn split_cell<'a>(
    s: &'a str,
    current_cell: &CellName,
) -> Option<anyhow::Result<(CellName, &'a str)>> {
    let (cell, rest) = s.split_once("//")?;
    let cell = cell.strip_prefix('@').unwrap_or(cell);
    let cell = if cell.is_empty() {
        Ok(current_cell.dupe())
    } else {
        CellName::unchecked_new(cell)
    };
    Some(cell.map(|cell| (cell, rest)))
}
