/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

use std::fmt;
use std::fmt::Display;

use depcheck_core::package::PackageLabel;

use crate::nodes::macro_instance::MacroInstance;
use crate::nodes::unconfigured::TargetNode;

/// Something declared in a package: a target, or a symbolic macro instance.
#[derive(Debug, Clone, Copy)]
pub enum Declaration<'a> {
    Target(&'a TargetNode),
    Macro(&'a MacroInstance),
}

impl<'a> Declaration<'a> {
    pub fn package(&self) -> &'a PackageLabel {
        match *self {
            Declaration::Target(target) => target.pkg(),
            Declaration::Macro(instance) => instance.package(),
        }
    }

    /// The macro instance this declaration was made in.
    pub fn parent_macro(&self) -> Option<&'a MacroInstance> {
        match *self {
            Declaration::Target(target) => target.declaring_macro(),
            Declaration::Macro(instance) => instance.parent(),
        }
    }
}

impl Display for Declaration<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Declaration::Target(target) => write!(f, "target '{}'", target.label()),
            Declaration::Macro(instance) => write!(f, "{}", instance),
        }
    }
}
