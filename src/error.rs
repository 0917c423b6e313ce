// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Error types for the module registry

use thiserror::Error;

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Errors that can occur while resolving modules
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Requested path matched neither the cache nor the definition table,
    /// even after the directory-index fallback
    #[error("Cannot find module \"{name}\" from \"{from}\"")]
    ModuleNotFound {
        /// Module name as requested
        name: String,
        /// Path of the requesting module, or `/` when there is no requester
        from: String,
    },
}

impl RegistryError {
    /// Create a module not found error
    pub fn module_not_found(name: impl Into<String>, from: impl Into<String>) -> Self {
        Self::ModuleNotFound {
            name: name.into(),
            from: from.into(),
        }
    }
}
