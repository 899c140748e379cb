//! Dispatch logic: extract params from ArgMatches and convert to command
//! args.

use std::path::PathBuf;

use clap::ArgMatches;

use crate::commands::generate::GenerateArgs;

pub struct GenerateParams {
    pub config: Option<PathBuf>,
    pub grammars: Vec<String>,
    pub version: String,
    pub classpath: Vec<String>,
    pub output_dir: Option<String>,
    pub srcjar: Option<String>,
    pub encoding: Option<String>,
    pub namespace: Option<String>,
    pub language: Option<String>,
    pub layout: Option<String>,
    pub split_headers: bool,
    pub tool_args: Vec<String>,
}

impl GenerateParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            config: m.get_one::<PathBuf>("config").cloned(),
            grammars: collect(m, "grammars"),
            version: m
                .get_one::<String>("tool_version")
                .cloned()
                .unwrap_or_else(|| "4".to_owned()),
            classpath: collect(m, "classpath"),
            output_dir: m.get_one::<String>("output_dir").cloned(),
            srcjar: nonempty(m, "srcjar"),
            encoding: nonempty(m, "encoding"),
            namespace: nonempty(m, "namespace"),
            language: nonempty(m, "language"),
            layout: nonempty(m, "layout"),
            split_headers: !m.get_flag("no_split_headers"),
            tool_args: collect(m, "tool_args"),
        }
    }
}

impl From<GenerateParams> for GenerateArgs {
    fn from(params: GenerateParams) -> Self {
        GenerateArgs {
            config: params.config,
            grammars: params.grammars,
            version: params.version,
            classpath: params.classpath,
            output_dir: params.output_dir,
            srcjar: params.srcjar,
            encoding: params.encoding,
            namespace: params.namespace,
            language: params.language,
            layout: params.layout,
            split_headers: params.split_headers,
            tool_args: params.tool_args,
        }
    }
}

fn collect(m: &ArgMatches, id: &str) -> Vec<String> {
    m.get_many::<String>(id)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

/// Empty string values behave like absent flags, matching how build
/// orchestrators pass unset attributes through.
fn nonempty(m: &ArgMatches, id: &str) -> Option<String> {
    m.get_one::<String>(id)
        .filter(|value| !value.is_empty())
        .cloned()
}
