// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! # loadstone
//!
//! An in-memory module registry and resolver: named modules are registered
//! as factories ahead of time, then resolved by path to cached,
//! lazily-initialized exports objects.
//!
//! - CommonJS-style relative requests (`./sibling`, `../other`) scoped to
//!   the requesting module
//! - Directory-index fallback (`"x"` resolves to `"x/index"`)
//! - Single-initialization: a factory runs at most once, and circular
//!   requests resolve to the in-progress exports object
//!
//! Resolution is synchronous and single-threaded; the registry is an
//! explicit value, so independent registries can coexist.
//!
//! ## Quick start
//!
//! ```
//! use loadstone::ModuleRegistry;
//! use serde_json::json;
//!
//! let registry = ModuleRegistry::new();
//!
//! registry.register_one("greeting/index", |exports, _require, _module| {
//!     *exports.borrow_mut() = json!({ "text": "hello" });
//!     Ok(())
//! });
//! registry.register_one("app", |exports, require, _module| {
//!     let greeting = require.require("./greeting")?;
//!     *exports.borrow_mut() = json!({ "message": greeting.borrow()["text"] });
//!     Ok(())
//! });
//!
//! let exports = registry.resolve("app")?;
//! assert_eq!(exports.borrow()["message"], "hello");
//! # Ok::<(), loadstone::RegistryError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cache;
pub mod error;
pub mod path;
pub mod registry;
pub mod resolver;

// Re-exports
pub use cache::{ExportsHandle, ModuleCache, ModuleRecord, new_exports};
pub use error::{RegistryError, Result};
pub use registry::{Factory, ModuleRegistry, ROOT_PATH, factory};
pub use resolver::ScopedResolver;

/// Version of the loadstone crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
