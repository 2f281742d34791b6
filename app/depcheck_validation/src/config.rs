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
use depcheck_core::legacy_configs::BuckconfigKeyRef;
use depcheck_core::legacy_configs::LegacyBuckConfig;
use dupe::Dupe;
use serde::Deserialize;
use serde::Serialize;

pub const DEPCHECK_SECTION: &str = "depcheck";

/// Default cap on macro delegation hops, matching the loader's nesting limit.
pub const DEFAULT_MAX_MACRO_DEPTH: usize = 100;

/// The switches the checks read, as a plain value so it can be handed to
/// the resolver without any global state.
#[derive(Debug, Clone, Copy, Dupe, Eq, PartialEq)]
pub struct ChecksEnabled {
    pub visibility: bool,
    pub experimental_deps_allowed: bool,
    pub testonly_for_generated_outputs: bool,
}

/// Configuration of dependency checking, read from the `[depcheck]` section.
#[derive(
    Allocative,
    Clone,
    Copy,
    Dupe,
    Debug,
    Serialize,
    Deserialize,
    PartialEq,
    Eq
)]
pub struct DepCheckConfig {
    pub check_visibility: bool,
    pub experimental_deps_ok: bool,
    pub check_testonly_for_output_files: bool,
    pub max_macro_depth: usize,
}

impl Default for DepCheckConfig {
    fn default() -> Self {
        DepCheckConfig {
            check_visibility: true,
            experimental_deps_ok: false,
            check_testonly_for_output_files: true,
            max_macro_depth: DEFAULT_MAX_MACRO_DEPTH,
        }
    }
}

impl DepCheckConfig {
    pub fn from_config(config: &LegacyBuckConfig) -> anyhow::Result<Self> {
        let defaults = DepCheckConfig::default();
        let check_visibility = config.parse_value(BuckconfigKeyRef {
            section: DEPCHECK_SECTION,
            property: "check_visibility",
        })?;
        let experimental_deps_ok = config.parse_value(BuckconfigKeyRef {
            section: DEPCHECK_SECTION,
            property: "experimental_deps_ok",
        })?;
        let check_testonly_for_output_files = config.parse_value(BuckconfigKeyRef {
            section: DEPCHECK_SECTION,
            property: "check_testonly_for_output_files",
        })?;
        let max_macro_depth = config.parse_value(BuckconfigKeyRef {
            section: DEPCHECK_SECTION,
            property: "max_macro_depth",
        })?;
        Ok(DepCheckConfig {
            check_visibility: check_visibility.unwrap_or(defaults.check_visibility),
            experimental_deps_ok: experimental_deps_ok.unwrap_or(defaults.experimental_deps_ok),
            check_testonly_for_output_files: check_testonly_for_output_files
                .unwrap_or(defaults.check_testonly_for_output_files),
            max_macro_depth: max_macro_depth.unwrap_or(defaults.max_macro_depth),
        })
    }

    pub fn checks_enabled(&self) -> ChecksEnabled {
        ChecksEnabled {
            visibility: self.check_visibility,
            experimental_deps_allowed: self.experimental_deps_ok,
            testonly_for_generated_outputs: self.check_testonly_for_output_files,
        }
    }
}
