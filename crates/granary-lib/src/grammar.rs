//! Per-grammar metadata extraction.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use encoding_rs::Encoding;
use indexmap::IndexSet;
use regex::Regex;

use granary_langs::{DirectoryLayout, Language, Namespace};

use crate::version::ToolVersion;
use crate::{Error, Result};

/// Action blocks, stripped before import scanning so language-specific
/// `import` statements inside actions are not picked up.
static BLOCKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*?\}").expect("valid pattern"));

/// The grammar import statement.
static IMPORTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"import\s+(.*?);").expect("valid pattern"));

/// Grammar declarations, which determine generated file name prefixes.
static GRAMMAR_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?sm)^\s*(?:(?:parser|lexer|tree|combined)\s+)?grammar\s+(\S*?)\s*;")
        .expect("valid pattern")
});

/// Version 2 class declarations; the class name prefixes the output files.
static V2_CLASSES: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"(?sm)^\s*class\s+(\S*?)\s+extends\s+\S*?Parser").expect("valid pattern"),
        Regex::new(r"(?sm)^\s*class\s+(\S*?)\s+extends\s+\S*?Lexer").expect("valid pattern"),
        Regex::new(r"(?sm)^\s*class\s+(\S*?)\s+extends\s+\S*?TreeParser").expect("valid pattern"),
    ]
});

/// A grammar file and the metadata extracted from it.
///
/// Built once per generation request from the file contents at that point
/// in time; immutable afterwards.
#[derive(Clone, Debug)]
pub struct Grammar {
    /// The file path.
    pub path: PathBuf,

    /// The encoding the file was read with.
    pub encoding: &'static Encoding,

    /// The target language.
    pub language: Language,

    /// The resolved namespace.
    pub namespace: Namespace,

    /// The possible generated source file name prefixes.
    pub names: IndexSet<String>,

    /// The imported grammars.
    pub imports: Vec<String>,

    layout: DirectoryLayout,
}

impl Grammar {
    /// Reads the grammar file and extracts its metadata.
    ///
    /// The target language comes from `language` or, failing that, from the
    /// grammar's options block. The namespace is resolved in priority
    /// order: an assigned `namespace` (which must not conflict with an
    /// in-grammar declaration), the in-grammar declaration, the directory
    /// layout convention. The resolution is deterministic: reading the same
    /// file with the same inputs yields the same namespace.
    pub fn read(
        version: ToolVersion,
        path: &Path,
        language: Option<Language>,
        namespace: Option<&Namespace>,
        encoding: &'static Encoding,
        layout: Option<&str>,
    ) -> Result<Grammar> {
        let bytes = fs::read(path)?;
        let text = encoding.decode(&bytes).0;

        let language = match language {
            Some(language) => language,
            None => Language::detect(&text)?,
        };

        let layout = match layout {
            Some(root) => DirectoryLayout::from_root(root)?,
            None => language.layout(),
        };

        let namespace = resolve_namespace(path, language, &layout, namespace, &text)?;

        Ok(Grammar {
            path: path.to_path_buf(),
            encoding,
            language,
            namespace,
            names: detect_names(version, &text, path),
            imports: detect_imports(&text),
            layout,
        })
    }

    /// The corresponding namespace path fragment.
    pub fn namespace_path(&self) -> PathBuf {
        // a flat layout may be forced regardless of the namespace
        if self.layout.is_flat() {
            PathBuf::new()
        } else {
            PathBuf::from(self.namespace.to_path(self.language))
        }
    }

    /// The grammar file name without its extension.
    pub fn stem(&self) -> &str {
        self.path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default()
    }

    /// Returns whether this grammar declares an import of the given grammar.
    pub fn imports_grammar(&self, other: &Grammar) -> bool {
        self.imports.iter().any(|import| import == other.stem())
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path.file_name().unwrap_or_default().to_string_lossy())
    }
}

fn resolve_namespace(
    path: &Path,
    language: Language,
    layout: &DirectoryLayout,
    assigned: Option<&Namespace>,
    text: &str,
) -> Result<Namespace> {
    // always detect the grammar namespace to be able to report conflicts
    let declared = language.detect_namespace(text);

    if let Some(assigned) = assigned {
        if let Some(declared) = &declared {
            if declared != assigned {
                return Err(Error::NamespaceConflict {
                    namespace: assigned.id().to_owned(),
                    declared: declared.id().to_owned(),
                    grammar: path
                        .file_name()
                        .unwrap_or_default()
                        .to_string_lossy()
                        .into_owned(),
                });
            }
        }

        return Ok(assigned.clone());
    }

    if let Some(declared) = declared {
        return Ok(declared);
    }

    // without a namespace signal we resort to the directory layout
    // convention
    Ok(Namespace::from_path(&layout.relative_path(path), language))
}

fn detect_names(version: ToolVersion, text: &str, path: &Path) -> IndexSet<String> {
    let mut names = IndexSet::new();

    match version {
        ToolVersion::V2 => {
            for pattern in V2_CLASSES.iter() {
                if let Some(captures) = pattern.captures(text) {
                    names.insert(captures[1].to_owned());
                }
            }
        }
        _ => {
            for captures in GRAMMAR_DECL.captures_iter(text) {
                names.insert(captures[1].to_owned());
            }
        }
    }

    names.insert(
        path.file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default()
            .to_owned(),
    );

    names
}

fn detect_imports(text: &str) -> Vec<String> {
    let stripped = BLOCKS.replace_all(text, "");

    match IMPORTS.captures(&stripped) {
        Some(captures) => captures[1]
            .split(',')
            .map(|import| import.trim().to_owned())
            .collect(),
        None => Vec::new(),
    }
}
