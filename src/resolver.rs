// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Scoped resolution: the `require` handed to module factories

use crate::cache::ExportsHandle;
use crate::error::Result;
use crate::path;
use crate::registry::ModuleRegistry;

/// A resolver bound to the path of a requesting module.
///
/// Relative names (`./sibling`, `../other`) resolve against the requesting
/// module's directory; absolute names resolve globally. Failed lookups name
/// the bound module as the requester.
pub struct ScopedResolver<'a> {
    registry: &'a ModuleRegistry,
    from: &'a str,
}

impl<'a> ScopedResolver<'a> {
    pub(crate) fn new(registry: &'a ModuleRegistry, from: &'a str) -> Self {
        Self { registry, from }
    }

    /// Resolve `name` on behalf of the bound module.
    pub fn require(&self, name: &str) -> Result<ExportsHandle> {
        let absolute = path::normalize(path::dirname(self.from), name);
        self.registry.resolve_from(&absolute, Some(self.from))
    }

    /// Path of the module this resolver is bound to.
    pub fn requester(&self) -> &str {
        self.from
    }
}
