/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

use allocative::Allocative;
use derive_more::Display;
use dupe::Dupe;

use crate::cells::name::CellName;
use crate::package::PackageLabel;
use crate::target::name::TargetName;

#[derive(Debug, thiserror::Error)]
enum TargetLabelError {
    #[error("Target label `{0}` must contain `:` separating package and name")]
    MissingColon(String),
}

/// A fully-qualified reference to a target: `cell//package:name`.
#[derive(
    Clone, Dupe, Debug, Display, Hash, Eq, PartialEq, Ord, PartialOrd, Allocative
)]
#[display("{}:{}", pkg, name)]
pub struct TargetLabel {
    pkg: PackageLabel,
    name: TargetName,
}

impl TargetLabel {
    pub fn new(pkg: PackageLabel, name: TargetName) -> TargetLabel {
        TargetLabel { pkg, name }
    }

    /// Parse `//foo:bar`, `cell//foo:bar` or `@cell//foo:bar`.
    pub fn parse(s: &str, current_cell: &CellName) -> anyhow::Result<TargetLabel> {
        let (pkg, name) = s
            .rsplit_once(':')
            .ok_or_else(|| TargetLabelError::MissingColon(s.to_owned()))?;
        Ok(TargetLabel::new(
            PackageLabel::parse(pkg, current_cell)?,
            TargetName::new(name)?,
        ))
    }

    /// Parse with `root` as the current cell, panicking on malformed input.
    pub fn testing_parse(s: &str) -> TargetLabel {
        TargetLabel::parse(s, &CellName::testing_new("root")).unwrap()
    }

    pub fn pkg(&self) -> &PackageLabel {
        &self.pkg
    }

    pub fn name(&self) -> &TargetName {
        &self.name
    }
}
