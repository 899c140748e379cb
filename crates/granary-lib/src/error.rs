//! The error taxonomy for generation requests.

use std::path::PathBuf;

/// Errors that can occur while generating and packaging grammar output.
///
/// All of these are fatal for the current request. Nothing is retried (the
/// generator is deterministic given identical inputs), and partial
/// filesystem state of a failed run is left for the caller to discard with
/// the sandbox.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid language configuration or custom layout.
    #[error(transparent)]
    Language(#[from] granary_langs::Error),

    /// The requested generator major version is not supported.
    #[error("Unknown version: {0}")]
    UnsupportedVersion(String),

    /// An externally assigned namespace disagrees with the namespace
    /// declared inside the grammar.
    #[error(
        "Specified package attribute '{namespace}' conflicting with namespace '{declared}' in grammar {grammar}"
    )]
    NamespaceConflict {
        namespace: String,
        declared: String,
        grammar: String,
    },

    /// A supergrammar reference crosses an artifact boundary without the
    /// required archive being supplied.
    #[error("You have to provide the .srcjar created for '{0}' as well")]
    MissingDependencyArtifact(String),

    /// The generator reported one or more errors.
    #[error("ANTLR terminated with {} error{}", .0, if *.0 == 1 { "" } else { "s" })]
    GeneratorFailed(usize),

    /// A required classpath library does not exist.
    #[error("{}", .0.display())]
    MissingClasspathEntry(PathBuf),

    /// A raw output file cannot be attributed to any known grammar.
    #[error("Could not find matching grammar for {0}")]
    UnmatchedOutputFile(String),

    /// The configured text encoding label is unknown.
    #[error("Unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Archive(#[from] zip::result::ZipError),
}
