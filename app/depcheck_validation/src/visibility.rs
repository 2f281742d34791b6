/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

//! Whether a prerequisite is visible to a declaration.
//!
//! The "location" of a declaration is the package it is checked from. For a
//! declaration made directly in a build file that is its own package. For a
//! declaration made by a symbolic macro it is the package of the `.bzl` file
//! exporting the macro, unless the macro was handed the prerequisite by its
//! caller, in which case the question moves up to the macro instance itself.

use depcheck_core::package::PackageLabel;
use depcheck_node::nodes::declaration::Declaration;
use depcheck_node::nodes::prerequisite::Prerequisite;
use depcheck_node::nodes::prerequisite::TargetMode;

use crate::error::VisibilityResolutionError;
use crate::policy::PrerequisitePolicy;

pub struct VisibilityResolver<'a> {
    policy: &'a dyn PrerequisitePolicy,
    /// When false, everything is visible to experimental locations.
    check_experimental: bool,
    max_macro_depth: usize,
}

impl<'a> VisibilityResolver<'a> {
    pub fn new(
        policy: &'a dyn PrerequisitePolicy,
        check_experimental: bool,
        max_macro_depth: usize,
    ) -> Self {
        VisibilityResolver {
            policy,
            check_experimental,
            max_macro_depth,
        }
    }

    /// Visibility of `prerequisite` from `declaration`, following macro
    /// delegation.
    pub fn is_visible_to_declaration(
        &self,
        prerequisite: &Prerequisite,
        declaration: Declaration<'_>,
    ) -> Result<bool, VisibilityResolutionError> {
        // Aliases are not conflated with their targets: the macro must have
        // been given the alias label itself.
        let dependency_label = prerequisite.dependency_label();
        let mut current = declaration;
        let mut hops = 0;
        loop {
            let package = current.package();
            let Some(declaring_macro) = current.parent_macro() else {
                return self.is_visible_to_location(prerequisite, package);
            };

            if declaring_macro.was_given_label(dependency_label) {
                hops += 1;
                if hops > self.max_macro_depth {
                    return Err(VisibilityResolutionError::MacroNestingTooDeep {
                        prerequisite: prerequisite.describe_with_aliases(TargetMode::WithoutKind),
                        declaration: declaration.to_string(),
                        max_depth: self.max_macro_depth,
                    });
                }
                tracing::trace!(
                    "{} was given {} by its caller, checking from {}",
                    declaring_macro,
                    dependency_label,
                    current
                );
                current = Declaration::Macro(declaring_macro);
                continue;
            }

            let class = declaring_macro.class();
            // Finalizers also get the privileges of the package they finalize.
            if class.is_finalizer() && self.is_visible_to_location(prerequisite, package)? {
                return Ok(true);
            }
            return self.is_visible_to_location(prerequisite, class.defining_location());
        }
    }

    /// Visibility of `prerequisite` from code in `location`.
    pub fn is_visible_to_location(
        &self,
        prerequisite: &Prerequisite,
        location: &PackageLabel,
    ) -> Result<bool, VisibilityResolutionError> {
        if !self.check_experimental && self.policy.package_under_experimental(location) {
            return Ok(true);
        }

        let visibility = prerequisite.visibility().ok_or_else(|| {
            VisibilityResolutionError::MissingVisibility {
                prerequisite: prerequisite.describe_with_aliases(TargetMode::WithoutKind),
            }
        })?;

        // Targets created in symbolic macros have the macro as their boundary,
        // so their own package gets no implicit access.
        if !visibility.is_created_in_symbolic_macro()
            && self
                .policy
                .is_same_logical_package(location, prerequisite.dependency_label().pkg())
        {
            return Ok(true);
        }

        Ok(visibility.contains_package(location))
    }
}
