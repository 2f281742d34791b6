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
use std::iter;
use std::sync::Arc;

use allocative::Allocative;
use depcheck_core::bzl::ImportPath;
use depcheck_core::package::PackageLabel;
use depcheck_core::target::label::TargetLabel;
use dupe::Dupe;
use starlark_map::small_set::SmallSet;

#[derive(Debug, Allocative)]
struct MacroClassData {
    name: Box<str>,
    defining_bzl: ImportPath,
    is_finalizer: bool,
}

/// A symbolic macro class, shared by all its instances.
#[derive(Debug, Clone, Dupe, Allocative)]
pub struct MacroClass(Arc<MacroClassData>);

impl MacroClass {
    pub fn new(name: &str, defining_bzl: ImportPath, is_finalizer: bool) -> MacroClass {
        MacroClass(Arc::new(MacroClassData {
            name: name.into(),
            defining_bzl,
            is_finalizer,
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Package of the `.bzl` file exporting the macro.
    pub fn defining_location(&self) -> &PackageLabel {
        self.0.defining_bzl.package()
    }

    /// Finalizers run after ordinary macro expansion of the package.
    pub fn is_finalizer(&self) -> bool {
        self.0.is_finalizer
    }
}

#[derive(Debug, Allocative)]
struct MacroInstanceData {
    name: Box<str>,
    package: PackageLabel,
    class: MacroClass,
    parent: Option<MacroInstance>,
    /// Labels the caller passed in as attribute values. Labels the
    /// implementation hardcodes itself are not here.
    explicit_attribute_labels: SmallSet<TargetLabel>,
}

/// One invocation of a symbolic macro.
#[derive(Debug, Clone, Dupe, Allocative)]
pub struct MacroInstance(Arc<MacroInstanceData>);

impl MacroInstance {
    pub fn new(
        name: &str,
        package: PackageLabel,
        class: MacroClass,
        parent: Option<MacroInstance>,
        explicit_attribute_labels: impl IntoIterator<Item = TargetLabel>,
    ) -> MacroInstance {
        MacroInstance(Arc::new(MacroInstanceData {
            name: name.into(),
            package,
            class,
            parent,
            explicit_attribute_labels: explicit_attribute_labels.into_iter().collect(),
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Package whose build file (transitively) instantiated this macro.
    pub fn package(&self) -> &PackageLabel {
        &self.0.package
    }

    pub fn class(&self) -> &MacroClass {
        &self.0.class
    }

    /// The enclosing macro instance; `None` if called directly from a build file.
    pub fn parent(&self) -> Option<&MacroInstance> {
        self.0.parent.as_ref()
    }

    /// This instance followed by its enclosing instances, innermost first.
    pub fn ancestors(&self) -> impl Iterator<Item = &MacroInstance> {
        iter::successors(Some(self), |m| m.parent())
    }

    /// Nesting depth; 1 for a macro called from a build file.
    pub fn depth(&self) -> usize {
        self.ancestors().count()
    }

    pub fn visit_explicit_attribute_labels(&self, mut f: impl FnMut(&TargetLabel)) {
        for label in &self.0.explicit_attribute_labels {
            f(label);
        }
    }

    /// Whether the caller passed `label` into this instance.
    pub fn was_given_label(&self, label: &TargetLabel) -> bool {
        self.0.explicit_attribute_labels.contains(label)
    }
}

impl Display for MacroInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "macro '{}' ({}) in {}", self.name(), self.class().name(), self.package())
    }
}
