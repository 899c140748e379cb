use std::fs::File;
use std::path::PathBuf;

use granary_lib::{CodeGen, GenerateConfig, JavaTool};

pub struct GenerateArgs {
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

pub fn run(args: GenerateArgs) {
    let config = match build_config(&args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("error: {}", message);
            std::process::exit(1);
        }
    };

    let sandbox = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("error: cannot determine working directory: {}", e);
            std::process::exit(1);
        }
    };

    let codegen = match CodeGen::new(sandbox, config) {
        Ok(codegen) => codegen,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = codegen.generate(&JavaTool) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }

    // Silent on success (like cargo check)
}

fn build_config(args: &GenerateArgs) -> Result<GenerateConfig, String> {
    if let Some(path) = &args.config {
        let file = File::open(path)
            .map_err(|e| format!("cannot read config {}: {}", path.display(), e))?;

        return serde_json::from_reader(file)
            .map_err(|e| format!("invalid config {}: {}", path.display(), e));
    }

    Ok(GenerateConfig {
        grammars: args.grammars.clone(),
        version: args.version.clone(),
        classpath: args.classpath.clone(),
        output_directory: args.output_dir.clone().unwrap_or_default(),
        srcjar: args.srcjar.clone(),
        encoding: args.encoding.clone(),
        namespace: args.namespace.clone(),
        language: args.language.clone(),
        layout: args.layout.clone(),
        args: args.tool_args.clone(),
        split_headers: args.split_headers,
    })
}
