// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Module path normalization
//!
//! Module paths are `/`-separated strings with no empty, `.`, or `..`
//! segments. [`normalize`] canonicalizes arbitrary input into that form;
//! every registry lookup goes through it.

/// Check whether a requested name is relative to the requesting module
/// (`.`, `..`, or anything starting with `./` or `../`).
pub fn is_relative(target: &str) -> bool {
    target == "." || target == ".." || target.starts_with("./") || target.starts_with("../")
}

/// Normalize `target` against `base`.
///
/// Relative targets are joined onto `base` first; absolute targets are
/// processed on their own. Segments are then walked left to right: `..`
/// pops the previous segment (popping past the root is a no-op), `.` and
/// empty segments are dropped, anything else is kept.
///
/// The result never contains empty, `.`, or `..` segments, and normalizing
/// an already-normalized path with itself as both arguments returns the
/// same path.
pub fn normalize(base: &str, target: &str) -> String {
    let joined = if is_relative(target) {
        format!("{base}/{target}")
    } else {
        target.to_owned()
    };

    let mut segments: Vec<&str> = Vec::new();
    for part in joined.split('/') {
        match part {
            ".." => {
                segments.pop();
            }
            "." | "" => {}
            part => segments.push(part),
        }
    }
    segments.join("/")
}

/// Directory portion of a module path: `"a/b/c"` -> `"a/b"`, `"a"` -> `""`.
pub fn dirname(path: &str) -> &str {
    match path.rsplit_once('/') {
        Some((dir, _)) => dir,
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_relative() {
        assert!(is_relative("."));
        assert!(is_relative(".."));
        assert!(is_relative("./sibling"));
        assert!(is_relative("../parent"));
        assert!(!is_relative("app"));
        assert!(!is_relative("contact/index"));
        assert!(!is_relative(".hidden"));
    }

    #[test]
    fn test_normalize_relative_to_base() {
        assert_eq!(normalize("a/b", "./c"), "a/b/c");
        assert_eq!(normalize("a/b", "../c"), "a/c");
        assert_eq!(normalize("a", "."), "a");
    }

    #[test]
    fn test_normalize_absolute_ignores_base() {
        assert_eq!(normalize("a/b", "x/y"), "x/y");
        assert_eq!(normalize("", "x//y/./z"), "x/y/z");
    }

    #[test]
    fn test_parent_traversal_past_root_is_noop() {
        assert_eq!(normalize("x/y", "../z"), "x/z");
        assert_eq!(normalize("x", "../../z"), "z");
        assert_eq!(normalize("", "../../z"), "z");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let path = normalize("a/b", "../c/./d");
        assert_eq!(normalize(&path, &path), path);
    }

    #[test]
    fn test_dirname() {
        assert_eq!(dirname("a/b/c"), "a/b");
        assert_eq!(dirname("a/b"), "a");
        assert_eq!(dirname("a"), "");
        assert_eq!(dirname(""), "");
    }
}
