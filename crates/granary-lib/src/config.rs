//! Per-request configuration.

use serde::{Deserialize, Serialize};

/// Inputs for one generation request.
///
/// The build orchestrator owns command-line and environment parsing; this
/// struct is the explicit hand-off into the library. Paths are interpreted
/// relative to the sandbox directory the request runs in. There is no
/// process-wide state: every request carries its own configuration.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// Grammar files, in the order the orchestrator lists them.
    pub grammars: Vec<String>,

    /// Major version of the generator tool ("2", "3" or "4").
    pub version: String,

    /// Classpath entries for loading the generator tool.
    pub classpath: Vec<String>,

    /// Directory the tool writes its raw output into.
    pub output_directory: String,

    /// Archive to produce. `None` leaves the generated sources as a
    /// directory tree.
    pub srcjar: Option<String>,

    /// Text encoding of the grammar files. Defaults to UTF-8.
    pub encoding: Option<String>,

    /// Namespace to assign to all grammars, overriding layout inference.
    pub namespace: Option<String>,

    /// Target language, overriding per-grammar detection.
    pub language: Option<String>,

    /// Custom directory layout root, or the sentinel `flat`.
    pub layout: Option<String>,

    /// Pass-through arguments for the generator tool.
    pub args: Vec<String>,

    /// Route C/C++ headers into a separate tree in directory output.
    pub split_headers: bool,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        GenerateConfig {
            grammars: Vec::new(),
            version: String::new(),
            classpath: Vec::new(),
            output_directory: String::new(),
            srcjar: None,
            encoding: None,
            namespace: None,
            language: None,
            layout: None,
            args: Vec::new(),
            split_headers: true,
        }
    }
}
