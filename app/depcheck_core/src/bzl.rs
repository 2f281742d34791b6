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
use std::fmt::Formatter;
use std::sync::Arc;

use allocative::Allocative;
use dupe::Dupe;

use crate::cells::name::CellName;
use crate::package::PackageLabel;

#[derive(Debug, thiserror::Error)]
enum ImportPathError {
    #[error("Invalid import path `{0}`: expected `package:file.bzl`")]
    Invalid(String),
}

/// Path of a `.bzl` file, written as a label: `root//rules:defs.bzl`.
///
/// Macro, rule and aspect classes are exported from a `.bzl` file; the package
/// containing that file is their defining location.
#[derive(Clone, Dupe, Hash, Eq, PartialEq, Debug, Allocative)]
pub struct ImportPath {
    package: PackageLabel,
    filename: Arc<str>,
}

impl ImportPath {
    pub fn new(package: PackageLabel, filename: &str) -> anyhow::Result<Self> {
        if !filename.ends_with(".bzl") || filename.contains([':', '?']) {
            return Err(ImportPathError::Invalid(format!("{}:{}", package, filename)).into());
        }
        Ok(ImportPath {
            package,
            filename: filename.into(),
        })
    }

    pub fn parse(s: &str, current_cell: &CellName) -> anyhow::Result<Self> {
        let (package, filename) = s
            .rsplit_once(':')
            .ok_or_else(|| ImportPathError::Invalid(s.to_owned()))?;
        ImportPath::new(PackageLabel::parse(package, current_cell)?, filename)
    }

    /// `//rules:defs.bzl` style, in the `root` cell.
    pub fn testing_parse(s: &str) -> Self {
        ImportPath::parse(s, &CellName::testing_new("root")).unwrap()
    }

    /// Package containing the `.bzl` file.
    pub fn package(&self) -> &PackageLabel {
        &self.package
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }
}

impl Display for ImportPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.package, self.filename)
    }
}
