/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

//! The declaration model: targets, symbolic macros, rule and aspect classes,
//! attributes and visibility. Produced by package loading and treated as
//! immutable while dependencies are validated.

pub mod aspect;
pub mod attrs;
pub mod nodes;
pub mod rule;
pub mod visibility;
