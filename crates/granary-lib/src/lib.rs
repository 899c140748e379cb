//! Namespace resolution and output packaging around the ANTLR code
//! generator.
//!
//! A build orchestrator hands over a list of grammar files; this crate
//! resolves each grammar's target namespace, orders grammars so imported
//! ones are generated first, runs the version-specific generator through a
//! narrow invocation seam, and repackages the raw output into a source
//! archive or directory tree:
//! - `config` - the explicit per-request configuration
//! - `grammar` - per-grammar metadata extraction
//! - `groups` - namespace grouping, dependency ordering, the name index
//! - `linker` - supergrammar metadata from sibling archives
//! - `invoke` - the bridge to the external generator tool
//! - `assemble` - relocation and packaging of generated sources
//! - `codegen` - the high-level facade tying the steps together

pub mod assemble;
pub mod codegen;
pub mod config;
pub mod grammar;
pub mod groups;
pub mod invoke;
pub mod linker;
pub mod version;

mod error;

#[cfg(test)]
mod assemble_tests;

pub use codegen::CodeGen;
pub use config::GenerateConfig;
pub use error::Error;
pub use grammar::Grammar;
pub use invoke::{Invocation, JavaTool, ToolInvoker};
pub use version::ToolVersion;

/// Result type for generation requests.
pub type Result<T> = std::result::Result<T, Error>;
