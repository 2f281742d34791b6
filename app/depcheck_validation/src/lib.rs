/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

//! Admission control for dependency edges.
//!
//! For every edge from a consuming rule to a prerequisite, decide whether the
//! edge is legal and report diagnostics for the ones that are not.

pub mod config;
pub mod diagnostics;
pub mod edge;
pub mod error;
pub mod policy;
pub mod validator;
pub mod visibility;
