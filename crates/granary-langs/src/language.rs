//! The closed set of target languages and their naming conventions.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::layout::DirectoryLayout;
use crate::namespace::Namespace;
use crate::{Error, Result};

/// An `options { ... }` block anywhere in the grammar text.
static OPTIONS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)options\s*\{.*?\}").expect("valid pattern"));

/// The `language = X` option inside an options block.
static LANGUAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)language\s*=\s*([a-zA-Z0-9]+)").expect("valid pattern"));

/// A header action block, optionally qualified with `parser::`/`lexer::`.
static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)@?(?:(?:parser|lexer)::)?header.*?\{(.*?)\}").expect("valid pattern")
});

/// A `@namespace { ... }` action, optionally qualified.
static NAMESPACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)@(?:(?:parser|lexer)::)?namespace\s*\{\s*(.*?)\s*\}").expect("valid pattern")
});

/// A `package` clause inside a header action.
static PACKAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?sm)package\s+(.+?)\s*;?\s*$").expect("valid pattern"));

/// A `module` clause inside a header action.
static MODULE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?sm)module\s*(.*?)\s*$").expect("valid pattern"));

/// Enumeration of target languages. Support varies with generator versions.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Language {
    C,
    Cpp,
    CSharp,
    Dart,
    Go,
    Java,
    JavaScript,
    ObjC,
    Python,
    Ruby,
    Swift,
}

/// Naming convention record for one target language.
///
/// Each record holds the pure functions the pipeline needs: namespace
/// identifier to path fragment and back, namespace-declaration detection
/// over grammar text, and the conventional grammar directory layout.
struct Convention {
    name: &'static str,
    to_path: fn(&str) -> String,
    to_id: fn(&Path) -> String,
    detect_namespace: fn(&str) -> Option<Namespace>,
    layout: fn() -> DirectoryLayout,
}

/// Convention table, indexed by the `Language` discriminant.
static CONVENTIONS: [Convention; 11] = [
    Convention {
        name: "C",
        to_path: keep,
        to_id: id_verbatim,
        detect_namespace: no_namespace,
        layout: src_layout,
    },
    Convention {
        name: "Cpp",
        to_path: double_colon_to_path,
        to_id: id_double_colon,
        detect_namespace: namespace_action,
        layout: src_layout,
    },
    Convention {
        name: "CSharp",
        to_path: dotted_to_path,
        to_id: id_dotted,
        detect_namespace: namespace_action,
        layout: src_layout,
    },
    Convention {
        name: "Dart",
        to_path: dotted_to_path,
        to_id: id_dotted,
        detect_namespace: no_namespace,
        layout: no_layout,
    },
    Convention {
        name: "Go",
        to_path: keep,
        to_id: id_slashed,
        detect_namespace: header_package,
        layout: no_layout,
    },
    Convention {
        name: "Java",
        to_path: dotted_to_path,
        to_id: id_dotted,
        detect_namespace: header_package,
        layout: src_main_layout,
    },
    Convention {
        name: "JavaScript",
        to_path: keep,
        to_id: id_slashed,
        detect_namespace: no_namespace,
        layout: src_layout,
    },
    Convention {
        name: "ObjC",
        to_path: keep,
        to_id: id_verbatim,
        detect_namespace: no_namespace,
        layout: no_layout,
    },
    Convention {
        name: "Python",
        to_path: dotted_to_path,
        to_id: id_slashed,
        detect_namespace: no_namespace,
        layout: src_layout,
    },
    Convention {
        name: "Ruby",
        to_path: double_colon_to_path,
        to_id: id_double_colon,
        detect_namespace: header_module,
        layout: no_layout,
    },
    Convention {
        name: "Swift",
        // Swift does not support namespaces within modules, but an assigned
        // namespace still maps onto a directory.
        to_path: dotted_to_path,
        to_id: id_dotted,
        detect_namespace: no_namespace,
        layout: no_layout,
    },
];

impl Language {
    /// Returns the language for the given language name.
    ///
    /// Accepts the generator's historical aliases (`CSharp2`, `Python3`, ...).
    pub fn of(name: &str) -> Result<Language> {
        match name {
            "C" => Ok(Language::C),
            "Cpp" => Ok(Language::Cpp),
            "CSharp" | "CSharp2" | "CSharp3" => Ok(Language::CSharp),
            "Dart" => Ok(Language::Dart),
            "Go" => Ok(Language::Go),
            "Java" => Ok(Language::Java),
            "JavaScript" => Ok(Language::JavaScript),
            "ObjC" => Ok(Language::ObjC),
            "Python" | "Python2" | "Python3" => Ok(Language::Python),
            "Ruby" => Ok(Language::Ruby),
            "Swift" => Ok(Language::Swift),
            _ => Err(Error::UnsupportedLanguage(name.to_owned())),
        }
    }

    /// Determines the target language from the grammar options when present.
    ///
    /// Falls back to `Java` if no language option could be found.
    pub fn detect(grammar: &str) -> Result<Language> {
        if let Some(options) = OPTIONS.find(grammar) {
            if let Some(captures) = LANGUAGE.captures(options.as_str()) {
                return Language::of(&captures[1]);
            }
        }
        Ok(Language::Java)
    }

    /// All supported languages, in declaration order.
    pub fn all() -> [Language; 11] {
        [
            Language::C,
            Language::Cpp,
            Language::CSharp,
            Language::Dart,
            Language::Go,
            Language::Java,
            Language::JavaScript,
            Language::ObjC,
            Language::Python,
            Language::Ruby,
            Language::Swift,
        ]
    }

    /// Translates a namespace identifier into the corresponding path fragment.
    pub fn to_path(self, namespace: &str) -> String {
        (self.convention().to_path)(namespace)
    }

    /// Translates a (relative) file system path into a namespace identifier.
    pub fn to_id(self, path: &Path) -> String {
        (self.convention().to_id)(path)
    }

    /// Determines the namespace declared in the grammar text, if any.
    ///
    /// Languages without a namespace concept always return `None`.
    pub fn detect_namespace(self, grammar: &str) -> Option<Namespace> {
        (self.convention().detect_namespace)(grammar)
    }

    /// Returns the conventional directory layout for grammar files.
    pub fn layout(self) -> DirectoryLayout {
        (self.convention().layout)()
    }

    fn convention(self) -> &'static Convention {
        &CONVENTIONS[self as usize]
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.convention().name)
    }
}

fn keep(namespace: &str) -> String {
    namespace.to_owned()
}

fn dotted_to_path(namespace: &str) -> String {
    namespace.replace('.', "/")
}

fn double_colon_to_path(namespace: &str) -> String {
    namespace.replace("::", "/")
}

fn id_verbatim(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn id_slashed(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn id_dotted(path: &Path) -> String {
    path.to_string_lossy().replace(['/', '\\'], ".")
}

fn id_double_colon(path: &Path) -> String {
    path.to_string_lossy().replace(['/', '\\'], "::")
}

fn no_namespace(_grammar: &str) -> Option<Namespace> {
    None
}

fn namespace_action(grammar: &str) -> Option<Namespace> {
    NAMESPACE
        .captures(grammar)
        .map(|captures| Namespace::declared(&captures[1]))
}

fn header_package(grammar: &str) -> Option<Namespace> {
    let header = HEADER.captures(grammar)?;
    PACKAGE
        .captures(header.get(1).map_or("", |group| group.as_str()))
        .map(|captures| Namespace::declared(&captures[1]))
}

fn header_module(grammar: &str) -> Option<Namespace> {
    let header = HEADER.captures(grammar)?;
    MODULE
        .captures(header.get(1).map_or("", |group| group.as_str()))
        .map(|captures| Namespace::declared(&captures[1]))
}

fn src_layout() -> DirectoryLayout {
    DirectoryLayout::from_pattern(r".*[\\/]src[\\/]antlr[234]?[\\/](.*)")
}

fn src_main_layout() -> DirectoryLayout {
    DirectoryLayout::from_pattern(r".*[\\/]src[\\/]main[\\/]antlr[234]?[\\/](.*)")
}

fn no_layout() -> DirectoryLayout {
    DirectoryLayout::none()
}
