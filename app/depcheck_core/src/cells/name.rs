/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

use std::sync::Arc;

use allocative::Allocative;
use derive_more::Display;
use dupe::Dupe;

#[derive(Debug, thiserror::Error)]
enum CellNameError {
    #[error("Cell name must be non-empty")]
    Empty,
    #[error("Cell name `{0}` must not contain `/`, `:` or `@`")]
    InvalidCharacter(String),
}

/// A 'CellName' is a canonicalized, human-readable name of a repository.
///
/// The cell within a fully qualified target like `foo//some:target` is `foo`.
/// Cell names are plain identifiers, so `foo/bar//some:target` has an invalid
/// cell name of `foo/bar`.
#[derive(
    Clone, Dupe, Debug, Display, Hash, Eq, PartialEq, Ord, PartialOrd, Allocative
)]
pub struct CellName(Arc<str>);

impl CellName {
    /// Construct a cell name.
    ///
    /// This function is unchecked because it does not validate that the cell
    /// is known to the build. It only validates the spelling.
    pub fn unchecked_new(name: &str) -> anyhow::Result<CellName> {
        if name.is_empty() {
            return Err(CellNameError::Empty.into());
        }
        if name.contains(['/', ':', '@']) {
            return Err(CellNameError::InvalidCharacter(name.to_owned()).into());
        }
        Ok(CellName(name.into()))
    }

    pub fn testing_new(name: &str) -> CellName {
        CellName::unchecked_new(name).unwrap()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
