//! Inference of namespace path fragments from grammar file locations.

use std::fmt;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::{Error, Result};

/// The conventional directory layout below which grammar files are placed.
///
/// A layout either carries a pattern whose first capture group is the path
/// remainder below the conventional root, or it is `flat` (namespace
/// segments are never inferred from the location), or it has no pattern at
/// all (only declared or assigned namespaces apply).
#[derive(Clone, Debug)]
pub struct DirectoryLayout {
    pattern: Option<Regex>,
    flat: bool,
}

impl DirectoryLayout {
    /// A layout without a pattern.
    pub fn none() -> Self {
        DirectoryLayout {
            pattern: None,
            flat: false,
        }
    }

    /// The flat layout: the location never contributes namespace segments.
    pub fn flat() -> Self {
        DirectoryLayout {
            pattern: None,
            flat: true,
        }
    }

    pub(crate) fn from_pattern(pattern: &str) -> Self {
        DirectoryLayout {
            pattern: Some(Regex::new(pattern).expect("valid pattern")),
            flat: false,
        }
    }

    /// Builds a layout for a custom root directory.
    ///
    /// The root may be given with either separator style and with or without
    /// leading/trailing separators. The generated pattern starts with a
    /// greedy prefix so the last occurrence of the root segment in a path
    /// wins, which supports nested conventional roots. The sentinel `flat`
    /// (any casing) yields the flat layout.
    pub fn from_root(root: &str) -> Result<Self> {
        if root.eq_ignore_ascii_case("flat") {
            return Ok(DirectoryLayout::flat());
        }

        let mut pattern = String::from(".*");

        if !root.starts_with('/') && !root.starts_with('\\') {
            pattern.push_str(r"[\\/]");
        }

        for c in root.chars() {
            match c {
                '/' | '\\' => pattern.push_str(r"[\\/]"),
                _ => pattern.push(c),
            }
        }

        if !root.ends_with('/') && !root.ends_with('\\') {
            pattern.push_str(r"[\\/]");
        }

        pattern.push_str("(.*)");

        match Regex::new(&pattern) {
            Ok(regex) => Ok(DirectoryLayout {
                pattern: Some(regex),
                flat: false,
            }),
            Err(source) => Err(Error::InvalidLayout {
                root: root.to_owned(),
                source,
            }),
        }
    }

    /// Returns the path of the given grammar file relative to the
    /// conventional root, or the empty path if the file does not conform
    /// with this layout.
    pub fn relative_path(&self, file: &Path) -> PathBuf {
        if let Some(pattern) = &self.pattern {
            if let Some(captures) = pattern.captures(&file.to_string_lossy()) {
                let remainder = captures.get(1).map_or("", |group| group.as_str());

                if let Some(parent) = Path::new(remainder).parent() {
                    return parent.to_path_buf();
                }
            }
        }

        PathBuf::new()
    }

    /// Returns whether this layout dictates a flat directory.
    pub fn is_flat(&self) -> bool {
        self.flat
    }
}

impl fmt::Display for DirectoryLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.pattern {
            Some(pattern) => f.write_str(pattern.as_str()),
            None => Ok(()),
        }
    }
}
