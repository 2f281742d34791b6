/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

//! Attribute names with special meaning to dependency validation.

/// Attribute holding the target's visibility. The only place package groups
/// may normally be referenced.
pub const VISIBILITY_ATTRIBUTE: &str = "visibility";

/// Wiring for configuration dependencies. Implicit, but validated like a
/// normal dependency of the consuming target.
pub const CONFIG_SETTING_DEPS_ATTRIBUTE: &str = "$config_dependencies";

/// Allowlist of packages permitted to use function transitions. Refers to a
/// package group by design.
pub const FUNCTION_TRANSITION_ALLOWLIST_ATTRIBUTE: &str = "$allowlist_function_transition";

/// Resolved toolchains of a rule.
pub const TOOLCHAINS_ATTRIBUTE: &str = "$toolchains";

/// Implicit (hardcoded default, not user supplied) attributes start with `$`.
pub const IMPLICIT_PREFIX: char = '$';

/// Late-bound attributes, computed from the configuration during analysis,
/// start with `:`.
pub const ANALYSIS_DEPENDENT_PREFIX: char = ':';
