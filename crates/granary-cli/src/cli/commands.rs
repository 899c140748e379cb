//! Command definitions.

use clap::Command;

use super::args::{
    classpath_arg, config_arg, encoding_arg, grammars_arg, language_arg, layout_arg,
    namespace_arg, no_split_arg, output_dir_arg, srcjar_arg, tool_args_arg, version_arg,
};

/// Builds the `granary` command with all subcommands.
pub fn build_cli() -> Command {
    Command::new("granary")
        .about("Packages ANTLR generated sources for build systems")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(generate_command())
        .subcommand(langs_command())
}

fn generate_command() -> Command {
    Command::new("generate")
        .about("Run the generator and assemble the output artifact")
        .arg(config_arg())
        .arg(grammars_arg())
        .arg(version_arg())
        .arg(classpath_arg())
        .arg(output_dir_arg())
        .arg(srcjar_arg())
        .arg(encoding_arg())
        .arg(namespace_arg())
        .arg(language_arg())
        .arg(layout_arg())
        .arg(no_split_arg())
        .arg(tool_args_arg())
}

fn langs_command() -> Command {
    Command::new("langs").about("List the supported target languages")
}
