//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Grammar files (positional, at least one unless --config is used).
pub fn grammars_arg() -> Arg {
    Arg::new("grammars")
        .value_name("GRAMMAR")
        .num_args(1..)
        .required_unless_present("config")
        .help("Grammar files, relative to the sandbox directory")
}

/// Generator major version (--tool-version).
pub fn version_arg() -> Arg {
    Arg::new("tool_version")
        .long("tool-version")
        .value_name("VERSION")
        .default_value("4")
        .help("Generator major version (2, 3 or 4)")
}

/// Classpath entries (--classpath, comma separated).
pub fn classpath_arg() -> Arg {
    Arg::new("classpath")
        .long("classpath")
        .value_name("ENTRIES")
        .value_delimiter(',')
        .help("Classpath entries for loading the generator tool")
}

/// Output directory (-o/--output-dir).
pub fn output_dir_arg() -> Arg {
    Arg::new("output_dir")
        .short('o')
        .long("output-dir")
        .value_name("DIR")
        .required_unless_present("config")
        .help("Directory the generator writes its raw output into")
}

/// Archive path (--srcjar).
pub fn srcjar_arg() -> Arg {
    Arg::new("srcjar")
        .long("srcjar")
        .value_name("FILE")
        .help("Package the generated sources into this archive")
}

/// Grammar file encoding (--encoding).
pub fn encoding_arg() -> Arg {
    Arg::new("encoding")
        .long("encoding")
        .value_name("ENCODING")
        .help("Text encoding of the grammar files (default: UTF-8)")
}

/// Namespace override (--namespace).
pub fn namespace_arg() -> Arg {
    Arg::new("namespace")
        .long("namespace")
        .value_name("NS")
        .help("Namespace to assign to all grammars")
}

/// Target language override (--language).
pub fn language_arg() -> Arg {
    Arg::new("language")
        .long("language")
        .value_name("LANG")
        .help("Target language (detected from the grammars if not specified)")
}

/// Directory layout override (--layout).
pub fn layout_arg() -> Arg {
    Arg::new("layout")
        .long("layout")
        .value_name("ROOT")
        .help("Custom grammar directory root, or 'flat'")
}

/// Keep C/C++ headers in the primary tree (--no-split-headers).
pub fn no_split_arg() -> Arg {
    Arg::new("no_split_headers")
        .long("no-split-headers")
        .action(ArgAction::SetTrue)
        .help("Do not route C/C++ headers into a separate tree")
}

/// JSON configuration file (--config).
pub fn config_arg() -> Arg {
    Arg::new("config")
        .long("config")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .conflicts_with_all(["grammars", "output_dir"])
        .help("Read the whole configuration from a JSON file")
}

/// Pass-through tool arguments (--tool-arg, repeatable).
pub fn tool_args_arg() -> Arg {
    Arg::new("tool_args")
        .long("tool-arg")
        .value_name("ARG")
        .action(ArgAction::Append)
        .allow_hyphen_values(true)
        .help("Argument passed through to the generator tool")
}
