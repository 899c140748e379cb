//! Target-language naming conventions for the granary pipeline.
//!
//! The code generator emits sources for a closed set of target languages,
//! each with its own idea of how namespaces map onto directories, how a
//! namespace is declared inside a grammar file, and where grammar files
//! conventionally live in a source tree:
//! - `language` - the `Language` enum and its per-target convention table
//! - `layout` - directory-layout inference of namespace path fragments
//! - `namespace` - the namespace value type
//! - `case` - casing conversions used to match generated file names

pub mod case;
pub mod language;
pub mod layout;
pub mod namespace;

#[cfg(test)]
mod case_tests;
#[cfg(test)]
mod namespace_tests;

pub use language::Language;
pub use layout::DirectoryLayout;
pub use namespace::Namespace;

/// Errors raised while resolving naming conventions.
#[derive(Clone, Debug, thiserror::Error)]
pub enum Error {
    /// The language name is outside the supported set.
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// A custom directory-layout root produced an unusable pattern.
    #[error("Invalid directory layout '{root}': {source}")]
    InvalidLayout {
        root: String,
        source: regex::Error,
    },
}

/// Result type for convention lookups.
pub type Result<T> = std::result::Result<T, Error>;
