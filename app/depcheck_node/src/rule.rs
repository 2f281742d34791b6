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
use depcheck_core::bzl::ImportPath;
use derive_more::Display;
use dupe::Dupe;
use starlark_map::small_map::SmallMap;

use crate::attrs::attr::Attribute;

/// Where a rule or aspect class comes from.
#[derive(Clone, Dupe, Debug, Display, Hash, Eq, PartialEq, Allocative)]
pub enum Definition {
    /// Built into the tool.
    #[display("builtin")]
    Builtin,
    /// Exported from a `.bzl` file.
    #[display("{}", _0)]
    Starlark(ImportPath),
}

impl Definition {
    pub fn bzl(&self) -> Option<&ImportPath> {
        match self {
            Definition::Builtin => None,
            Definition::Starlark(path) => Some(path),
        }
    }
}

#[derive(Debug, Allocative)]
struct RuleClassData {
    name: Box<str>,
    definition: Definition,
    /// Alias-like rules forward whatever their target provides.
    can_have_any_provider: bool,
    attributes: SmallMap<Box<str>, Attribute>,
}

/// A rule class, e.g. `cc_library`.
#[derive(Debug, Clone, Dupe, Allocative)]
pub struct RuleClass(Arc<RuleClassData>);

impl RuleClass {
    pub fn new(
        name: &str,
        definition: Definition,
        can_have_any_provider: bool,
        attributes: impl IntoIterator<Item = Attribute>,
    ) -> RuleClass {
        RuleClass(Arc::new(RuleClassData {
            name: name.into(),
            definition,
            can_have_any_provider,
            attributes: attributes
                .into_iter()
                .map(|a| (Box::<str>::from(a.name()), a))
                .collect(),
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn definition(&self) -> &Definition {
        &self.0.definition
    }

    pub fn can_have_any_provider(&self) -> bool {
        self.0.can_have_any_provider
    }

    /// Attribute definition by name, `None` if the rule does not define it
    /// (it may belong to an aspect).
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.0.attributes.get(name)
    }
}

impl PartialEq for RuleClass {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
            || (self.0.name == other.0.name && self.0.definition == other.0.definition)
    }
}

impl Eq for RuleClass {}
