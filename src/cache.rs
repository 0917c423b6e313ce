// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Module cache and module records

use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Shared handle to a module's mutable exports object.
///
/// A factory populates the object in place or replaces the held value
/// wholesale; either way, every resolution of the module returns this same
/// handle, so all consumers observe the same exports.
pub type ExportsHandle = Rc<RefCell<Value>>;

/// Create a fresh, empty exports object.
pub fn new_exports() -> ExportsHandle {
    Rc::new(RefCell::new(Value::Object(serde_json::Map::new())))
}

/// A materialized module entry
#[derive(Debug, Clone)]
pub struct ModuleRecord {
    /// Canonical path the module was materialized at
    pub id: String,
    /// The module's exports
    pub exports: ExportsHandle,
}

impl ModuleRecord {
    /// Create a record with an empty exports object
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            exports: new_exports(),
        }
    }
}

/// Cache of materialized modules, keyed by canonical path.
///
/// A path present here has been initialized at most once; resolution returns
/// the cached exports without re-invoking the factory. Single execution
/// context only, hence plain interior mutability.
#[derive(Debug, Default)]
pub struct ModuleCache {
    cache: RefCell<HashMap<String, ModuleRecord>>,
}

impl ModuleCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self {
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Get a cached module by path
    pub fn get(&self, path: &str) -> Option<ModuleRecord> {
        self.cache.borrow().get(path).cloned()
    }

    /// Check if a module is cached
    pub fn has(&self, path: &str) -> bool {
        self.cache.borrow().contains_key(path)
    }

    /// Add a module to the cache
    pub fn set(&self, path: String, record: ModuleRecord) {
        self.cache.borrow_mut().insert(path, record);
    }

    /// Remove a module from the cache
    pub fn delete(&self, path: &str) -> Option<ModuleRecord> {
        self.cache.borrow_mut().remove(path)
    }

    /// Clear the entire cache
    pub fn clear(&self) {
        self.cache.borrow_mut().clear();
    }

    /// Get all cached module paths
    pub fn keys(&self) -> Vec<String> {
        self.cache.borrow().keys().cloned().collect()
    }

    /// Get the number of cached modules
    pub fn len(&self) -> usize {
        self.cache.borrow().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.cache.borrow().is_empty()
    }
}
