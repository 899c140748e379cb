//! Major versions of the generator tool.

use crate::{Error, Result};

/// Enumeration of supported generator major versions.
///
/// The versions have incompatible entry points and invocation models: V2
/// accepts a single grammar per run, V3 takes the whole file list at once,
/// V4 is invoked once per namespace group.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ToolVersion {
    V2,
    V3,
    V4,
}

impl ToolVersion {
    /// Returns the version for the given major version string.
    pub fn of(version: &str) -> Result<ToolVersion> {
        match version {
            "2" => Ok(ToolVersion::V2),
            "3" => Ok(ToolVersion::V3),
            "4" => Ok(ToolVersion::V4),
            _ => Err(Error::UnsupportedVersion(version.to_owned())),
        }
    }

    /// The tool entry point class for this version.
    pub fn main_class(self) -> &'static str {
        match self {
            ToolVersion::V2 => "antlr.Tool",
            ToolVersion::V3 => "org.antlr.Tool",
            ToolVersion::V4 => "org.antlr.v4.Tool",
        }
    }
}
