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
enum TargetNameError {
    #[error("Target name must be non-empty")]
    Empty,
    #[error("Target name `{0}` must not contain `:`")]
    ContainsColon(String),
    #[error("Target name `{0}` must not start or end with `/`")]
    Slash(String),
}

/// The name part of a target label, `baz` in `root//foo/bar:baz`.
#[derive(
    Clone, Dupe, Debug, Display, Hash, Eq, PartialEq, Ord, PartialOrd, Allocative
)]
pub struct TargetName(Arc<str>);

impl TargetName {
    pub fn new(name: &str) -> anyhow::Result<TargetName> {
        if name.is_empty() {
            return Err(TargetNameError::Empty.into());
        }
        if name.contains(':') {
            return Err(TargetNameError::ContainsColon(name.to_owned()).into());
        }
        if name.starts_with('/') || name.ends_with('/') {
            return Err(TargetNameError::Slash(name.to_owned()).into());
        }
        Ok(TargetName(name.into()))
    }

    pub fn testing_new(name: &str) -> TargetName {
        TargetName::new(name).unwrap()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
