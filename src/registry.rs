// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! The module registry: definition table, resolution, materialization

use crate::cache::{ExportsHandle, ModuleCache, ModuleRecord};
use crate::error::{RegistryError, Result};
use crate::path;
use crate::resolver::ScopedResolver;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Path reported as the requester when resolution starts outside any module.
pub const ROOT_PATH: &str = "/";

/// A module factory.
///
/// Receives the module's exports handle, a resolver scoped to the module's
/// own path, and the module record. Runs at most once per cached path.
pub type Factory = Rc<dyn Fn(&ExportsHandle, &ScopedResolver<'_>, &ModuleRecord) -> Result<()>>;

/// Wrap a closure as a [`Factory`], for building registration bundles.
pub fn factory<F>(f: F) -> Factory
where
    F: Fn(&ExportsHandle, &ScopedResolver<'_>, &ModuleRecord) -> Result<()> + 'static,
{
    Rc::new(f)
}

/// Module registry: registered factories plus a cache of materialized
/// modules.
///
/// An explicit value rather than process-global state; independent
/// registries can coexist. Single execution context only — resolution is
/// synchronous and the registry is deliberately not `Send`.
#[derive(Default)]
pub struct ModuleRegistry {
    /// Registered factories, keyed by module path
    definitions: RefCell<HashMap<String, Factory>>,
    /// Materialized modules
    cache: ModuleCache,
}

impl ModuleRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            definitions: RefCell::new(HashMap::new()),
            cache: ModuleCache::new(),
        }
    }

    /// Register a single module factory.
    ///
    /// A later registration for the same path replaces the earlier factory;
    /// the replacement only matters for paths not yet materialized. Paths
    /// are not validated — a malformed path simply never matches.
    pub fn register_one<F>(&self, path: impl Into<String>, factory: F)
    where
        F: Fn(&ExportsHandle, &ScopedResolver<'_>, &ModuleRecord) -> Result<()> + 'static,
    {
        self.definitions
            .borrow_mut()
            .insert(path.into(), Rc::new(factory));
    }

    /// Merge a bundle of `(path, factory)` pairs into the definition table,
    /// with the same overwrite rule as [`register_one`](Self::register_one).
    pub fn register_many<I, P>(&self, bundle: I)
    where
        I: IntoIterator<Item = (P, Factory)>,
        P: Into<String>,
    {
        let mut definitions = self.definitions.borrow_mut();
        for (path, factory) in bundle {
            definitions.insert(path.into(), factory);
        }
    }

    /// Enumerate all registered definition paths. Order is not guaranteed.
    pub fn list(&self) -> Vec<String> {
        self.definitions.borrow().keys().cloned().collect()
    }

    /// Resolve a module name with no requesting module.
    pub fn resolve(&self, name: &str) -> Result<ExportsHandle> {
        self.resolve_from(name, None)
    }

    /// Resolve a module name on behalf of the module at `from`.
    ///
    /// Lookup order: cache, then definitions, then both again under the
    /// directory-index fallback (`name/index`). A cache hit never re-invokes
    /// the factory.
    pub fn resolve_from(&self, name: &str, from: Option<&str>) -> Result<ExportsHandle> {
        let path = path::normalize(name, ".");

        if let Some(record) = self.cache.get(&path) {
            tracing::trace!("cache hit: {}", path);
            return Ok(record.exports);
        }
        if let Some(factory) = self.factory_for(&path) {
            return self.materialize(&path, factory);
        }

        let dir_index = path::normalize(&path, "./index");
        if let Some(record) = self.cache.get(&dir_index) {
            tracing::trace!("cache hit: {}", dir_index);
            return Ok(record.exports);
        }
        if let Some(factory) = self.factory_for(&dir_index) {
            return self.materialize(&dir_index, factory);
        }

        Err(RegistryError::module_not_found(
            name,
            from.unwrap_or(ROOT_PATH),
        ))
    }

    /// Canonical path `name` would resolve to, without materializing it.
    pub fn resolve_id(&self, name: &str) -> Result<String> {
        let path = path::normalize(name, ".");
        if self.cache.has(&path) || self.definitions.borrow().contains_key(&path) {
            return Ok(path);
        }

        let dir_index = path::normalize(&path, "./index");
        if self.cache.has(&dir_index) || self.definitions.borrow().contains_key(&dir_index) {
            return Ok(dir_index);
        }

        Err(RegistryError::module_not_found(name, ROOT_PATH))
    }

    /// Paths of all materialized modules
    pub fn cached_paths(&self) -> Vec<String> {
        self.cache.keys()
    }

    /// Drop all materialized modules. Definitions stay registered, so the
    /// next resolution of each path re-runs its factory.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    fn factory_for(&self, path: &str) -> Option<Factory> {
        self.definitions.borrow().get(path).cloned()
    }

    /// Materialize a definition. The record enters the cache *before* the
    /// factory runs, so a circular request resolves to the in-progress
    /// exports object instead of recursing.
    fn materialize(&self, path: &str, factory: Factory) -> Result<ExportsHandle> {
        tracing::debug!("materializing module: {}", path);
        let record = ModuleRecord::new(path);
        let exports = Rc::clone(&record.exports);
        self.cache.set(path.to_owned(), record.clone());

        let require = ScopedResolver::new(self, path);
        factory(&exports, &require, &record)?;
        Ok(exports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::Cell;

    #[test]
    fn test_list_enumerates_definitions() {
        let registry = ModuleRegistry::new();
        registry.register_one("a", |_exports, _require, _module| Ok(()));
        registry.register_one("b/c", |_exports, _require, _module| Ok(()));

        let mut listed = registry.list();
        listed.sort();
        assert_eq!(listed, vec!["a".to_owned(), "b/c".to_owned()]);
    }

    #[test]
    fn test_resolve_canonicalizes_the_requested_name() {
        let registry = ModuleRegistry::new();
        registry.register_one("a/b", |exports, _require, _module| {
            *exports.borrow_mut() = json!({ "ok": true });
            Ok(())
        });

        let exports = registry.resolve("a/./x/../b").unwrap();
        assert_eq!(exports.borrow()["ok"], true);
    }

    #[test]
    fn test_resolve_id_prefers_the_direct_path() {
        let registry = ModuleRegistry::new();
        registry.register_one("a", |_exports, _require, _module| Ok(()));
        registry.register_one("a/index", |_exports, _require, _module| Ok(()));

        assert_eq!(registry.resolve_id("a").unwrap(), "a");
    }

    #[test]
    fn test_resolve_id_applies_the_index_fallback() {
        let registry = ModuleRegistry::new();
        registry.register_one("a/index", |_exports, _require, _module| Ok(()));

        assert_eq!(registry.resolve_id("a").unwrap(), "a/index");
        assert_eq!(registry.resolve_id("./a").unwrap(), "a/index");
        assert!(registry.resolve_id("missing").is_err());
    }

    #[test]
    fn test_clear_cache_reruns_factories() {
        let registry = ModuleRegistry::new();
        let runs = Rc::new(Cell::new(0u32));
        let counter = Rc::clone(&runs);
        registry.register_one("m", move |_exports, _require, _module| {
            counter.set(counter.get() + 1);
            Ok(())
        });

        registry.resolve("m").unwrap();
        registry.resolve("m").unwrap();
        assert_eq!(runs.get(), 1);
        assert_eq!(registry.cached_paths(), vec!["m".to_owned()]);

        registry.clear_cache();
        registry.resolve("m").unwrap();
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn test_factory_errors_propagate() {
        let registry = ModuleRegistry::new();
        registry.register_one("broken", |_exports, require, _module| {
            require.require("./missing")?;
            Ok(())
        });

        let err = registry.resolve("broken").unwrap_err();
        assert_eq!(
            err,
            RegistryError::ModuleNotFound {
                name: "missing".to_owned(),
                from: "broken".to_owned(),
            }
        );
    }
}
