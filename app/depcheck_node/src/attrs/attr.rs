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
use std::sync::Arc;

use allocative::Allocative;
use dupe::Dupe;

use crate::attrs::internal::ANALYSIS_DEPENDENT_PREFIX;
use crate::attrs::internal::IMPLICIT_PREFIX;
use crate::attrs::providers::RequiredProviders;

#[derive(Debug, thiserror::Error)]
enum AttributeError {
    #[error("Attribute name must be non-empty")]
    EmptyName,
}

/// Definition of a dependency attribute of a rule or aspect.
///
/// Whether the attribute is implicit or late-bound is encoded in its name, as
/// package loading stores it: `$name` for implicit, `:name` for late-bound.
#[derive(Clone, Dupe, Debug, Hash, Eq, PartialEq, Allocative)]
pub struct Attribute(Arc<AttributeData>);

#[derive(Debug, Hash, Eq, PartialEq, Allocative)]
struct AttributeData {
    name: Box<str>,
    required_providers: RequiredProviders,
}

impl Attribute {
    pub fn new(name: &str, required_providers: RequiredProviders) -> anyhow::Result<Attribute> {
        if name.is_empty() {
            return Err(AttributeError::EmptyName.into());
        }
        Ok(Attribute(Arc::new(AttributeData {
            name: name.into(),
            required_providers,
        })))
    }

    /// Attribute accepting any provider.
    pub fn testing_new(name: &str) -> Attribute {
        Attribute::new(name, RequiredProviders::accept_any()).unwrap()
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// The value is a hardcoded default of the rule or aspect, not supplied by the user.
    pub fn is_implicit(&self) -> bool {
        self.0.name.starts_with(IMPLICIT_PREFIX)
    }

    /// Late-bound attributes are computed from the configuration and are
    /// exempt from visibility checking.
    pub fn is_analysis_dependent(&self) -> bool {
        self.0.name.starts_with(ANALYSIS_DEPENDENT_PREFIX)
    }

    pub fn required_providers(&self) -> &RequiredProviders {
        &self.0.required_providers
    }
}

impl Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.0.name, self.0.required_providers)
    }
}
