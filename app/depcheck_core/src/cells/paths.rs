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
enum CellRelativePathError {
    #[error("Path `{0}` must be relative to the cell root, but starts with `/`")]
    Absolute(String),
    #[error("Path `{0}` must not end with `/`")]
    TrailingSlash(String),
    #[error("Path `{0}` contains an empty segment")]
    EmptySegment(String),
    #[error("Path `{0}` must be normalized, but contains `{1}` segment")]
    NotNormalized(String, String),
    #[error("Path `{0}` contains a backslash")]
    Backslash(String),
}

/// A normalized, cell-relative forward path, e.g. `foo/bar` in `root//foo/bar`.
///
/// The empty path is the root package of a cell.
#[derive(
    Clone, Dupe, Debug, Display, Hash, Eq, PartialEq, Ord, PartialOrd, Allocative
)]
pub struct CellRelativePath(Arc<str>);

impl CellRelativePath {
    pub fn new(path: &str) -> anyhow::Result<CellRelativePath> {
        Self::verify(path)?;
        Ok(CellRelativePath(path.into()))
    }

    /// Construct without validation. The caller must guarantee the path is normalized.
    pub fn unchecked_new(path: &str) -> CellRelativePath {
        CellRelativePath(path.into())
    }

    pub fn empty() -> CellRelativePath {
        CellRelativePath("".into())
    }

    fn verify(path: &str) -> anyhow::Result<()> {
        if path.is_empty() {
            return Ok(());
        }
        if path.starts_with('/') {
            return Err(CellRelativePathError::Absolute(path.to_owned()).into());
        }
        if path.ends_with('/') {
            return Err(CellRelativePathError::TrailingSlash(path.to_owned()).into());
        }
        if path.contains('\\') {
            return Err(CellRelativePathError::Backslash(path.to_owned()).into());
        }
        for segment in path.split('/') {
            match segment {
                "" => return Err(CellRelativePathError::EmptySegment(path.to_owned()).into()),
                "." | ".." => {
                    return Err(CellRelativePathError::NotNormalized(
                        path.to_owned(),
                        segment.to_owned(),
                    )
                    .into());
                }
                _ => {}
            }
        }
        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Component-wise prefix check: `foo/bar` starts with `foo` but not with `fo`.
    pub fn starts_with(&self, prefix: &CellRelativePath) -> bool {
        self.strip_prefix(prefix).is_some()
    }

    /// The remainder after `prefix`, without the separating `/`.
    pub fn strip_prefix(&self, prefix: &CellRelativePath) -> Option<&str> {
        if prefix.is_empty() {
            return Some(self.as_str());
        }
        let rest = self.as_str().strip_prefix(prefix.as_str())?;
        if rest.is_empty() {
            Some(rest)
        } else {
            rest.strip_prefix('/')
        }
    }
}
