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
use dupe::Dupe;
use starlark_map::small_set::SmallSet;

use crate::rule::Definition;

#[derive(Debug, Allocative)]
struct AspectClassData {
    name: Box<str>,
    definition: Definition,
    attributes: SmallSet<Box<str>>,
}

/// An aspect class together with the names of the attributes it defines.
#[derive(Debug, Clone, Dupe, Allocative)]
pub struct AspectClass(Arc<AspectClassData>);

impl AspectClass {
    pub fn new<'a>(
        name: &str,
        definition: Definition,
        attributes: impl IntoIterator<Item = &'a str>,
    ) -> AspectClass {
        AspectClass(Arc::new(AspectClassData {
            name: name.into(),
            definition,
            attributes: attributes.into_iter().map(Box::<str>::from).collect(),
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn definition(&self) -> &Definition {
        &self.0.definition
    }

    /// Whether `attr_name` is one of this aspect's own attributes.
    pub fn defines_attribute(&self, attr_name: &str) -> bool {
        self.0.attributes.contains(attr_name)
    }
}
