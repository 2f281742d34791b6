/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

//! Core identifiers shared by the dependency validation crates: cells, packages,
//! target labels, `.bzl` import paths and package specifications.

pub mod bzl;
pub mod cells;
pub mod legacy_configs;
pub mod logging;
pub mod package;
pub mod pattern;
pub mod target;
