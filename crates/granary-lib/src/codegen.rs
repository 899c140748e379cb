//! The high-level generation facade.

use std::fs;
use std::path::{Path, PathBuf};

use encoding_rs::{Encoding, UTF_8};
use tracing::{debug, info};

use granary_langs::{Language, Namespace};

use crate::assemble::Assembler;
use crate::config::GenerateConfig;
use crate::grammar::Grammar;
use crate::groups::{BuildGroups, NameIndex, group_by_namespace};
use crate::invoke::{Invocation, ToolInvoker, resolve_classpath};
use crate::linker::link_supergrammars;
use crate::version::ToolVersion;
use crate::{Error, Result};

/// One generation request: runs the generator over the configured grammars
/// and assembles the output into an archive or directory tree.
///
/// The pipeline is synchronous and owns no shared state; the orchestrator
/// isolates parallel requests through separate sandbox directories.
#[derive(Debug)]
pub struct CodeGen {
    sandbox: PathBuf,
    version: ToolVersion,
    encoding: &'static Encoding,
    language: Option<Language>,
    namespace: Option<Namespace>,
    layout: Option<String>,
    grammars: Vec<PathBuf>,
    classpath: Vec<String>,
    output_directory: PathBuf,
    srcjar: Option<PathBuf>,
    args: Vec<String>,
    keep_imports: bool,
    split_headers: bool,
}

impl CodeGen {
    /// Validates the configuration against the sandbox directory.
    pub fn new(sandbox: impl Into<PathBuf>, config: GenerateConfig) -> Result<CodeGen> {
        let sandbox = sandbox.into();

        let version = ToolVersion::of(&config.version)?;

        let encoding = match &config.encoding {
            Some(label) if !label.is_empty() => Encoding::for_label(label.as_bytes())
                .ok_or_else(|| Error::UnsupportedEncoding(label.clone()))?,
            _ => UTF_8,
        };

        let language = match &config.language {
            Some(name) if !name.is_empty() => Some(Language::of(name)?),
            _ => None,
        };

        let namespace = config
            .namespace
            .as_deref()
            .filter(|id| !id.is_empty())
            .map(Namespace::of);

        let layout = config.layout.filter(|root| !root.is_empty());

        let grammars = config
            .grammars
            .iter()
            .map(|grammar| sandbox.join(grammar))
            .collect();

        let keep_imports = config.args.iter().any(|arg| arg == "-XsaveLexer");

        Ok(CodeGen {
            output_directory: sandbox.join(&config.output_directory),
            srcjar: config
                .srcjar
                .as_deref()
                .filter(|path| !path.is_empty())
                .map(|path| sandbox.join(path)),
            sandbox,
            version,
            encoding,
            language,
            namespace,
            layout,
            grammars,
            classpath: config.classpath,
            args: config.args,
            keep_imports,
            split_headers: config.split_headers,
        })
    }

    /// Runs the generator and assembles the final artifact.
    pub fn generate(&self, invoker: &dyn ToolInvoker) -> Result<()> {
        let groups = self.read_grammars()?;
        let classpath = resolve_classpath(&self.sandbox, &self.classpath)?;
        let arguments = Arguments::scan(&self.sandbox, &self.args);

        match self.version {
            ToolVersion::V2 => {
                // version 2 only accepts a single grammar per invocation;
                // supergrammar archives are linked up front
                let mut args = arguments.args.clone();
                link_supergrammars(&self.sandbox, &mut args)?;

                for grammar in &self.grammars {
                    args.push(grammar.display().to_string());
                    self.invoke(invoker, &classpath, args.clone())?;
                    args.pop();
                }
            }
            ToolVersion::V3 => {
                let mut args = arguments.args.clone();
                args.extend(self.grammars.iter().map(|path| path.display().to_string()));
                self.invoke(invoker, &classpath, args)?;
            }
            ToolVersion::V4 => {
                for (namespace, grammars) in &groups {
                    let args = arguments.for_group(namespace, grammars);
                    self.invoke(invoker, &classpath, args)?;
                }
            }
        }

        if arguments.log {
            self.collect_logs()?;
        }

        let names = NameIndex::new(&groups, self.version, self.keep_imports);
        let assembler = Assembler::new(
            &names,
            &self.output_directory,
            self.language,
            self.split_headers,
        );

        match &self.srcjar {
            Some(srcjar) => assembler.into_archive(srcjar)?,
            None => assembler.into_directory()?,
        }

        info!(grammars = self.grammars.len(), "generation finished");

        Ok(())
    }

    fn read_grammars(&self) -> Result<BuildGroups> {
        let mut grammars = Vec::with_capacity(self.grammars.len());

        for path in &self.grammars {
            grammars.push(Grammar::read(
                self.version,
                path,
                self.language,
                self.namespace.as_ref(),
                self.encoding,
                self.layout.as_deref(),
            )?);
        }

        Ok(group_by_namespace(grammars))
    }

    fn invoke(
        &self,
        invoker: &dyn ToolInvoker,
        classpath: &[PathBuf],
        args: Vec<String>,
    ) -> Result<()> {
        let invocation = Invocation {
            version: self.version,
            classpath: classpath.to_vec(),
            args,
            working_dir: self.sandbox.clone(),
        };

        let errors = invoker.invoke(&invocation)?;

        if errors > 0 {
            return Err(Error::GeneratorFailed(errors));
        }

        Ok(())
    }

    /// Moves tool log files left in the sandbox into the output directory.
    fn collect_logs(&self) -> Result<()> {
        fs::create_dir_all(&self.output_directory)?;

        for entry in fs::read_dir(&self.sandbox)? {
            let entry = entry?;
            let file_name = entry.file_name().to_string_lossy().into_owned();

            if file_name.starts_with("antlr-") && file_name.ends_with(".log") {
                debug!(log = %file_name, "collecting tool log");
                fs::rename(entry.path(), self.output_directory.join(&file_name))?;
            }
        }

        Ok(())
    }
}

/// The pass-through tool arguments, with the handful of recognized flags
/// applied.
struct Arguments {
    args: Vec<String>,
    /// `-Xlog` was given; tool log files are collected after the run.
    log: bool,
    /// The caller passed `-package` explicitly.
    package_attribute: bool,
}

impl Arguments {
    fn scan(sandbox: &Path, args: &[String]) -> Arguments {
        let mut args = args.to_vec();
        let mut log = false;
        let mut package_attribute = false;

        for i in 0..args.len() {
            match args[i].as_str() {
                "-lib" => {
                    // ensure absolute path
                    if i + 1 < args.len() {
                        let resolved = sandbox.join(&args[i + 1]).display().to_string();
                        args[i + 1] = resolved;
                    }
                }
                "-Xlog" => log = true,
                "-package" => package_attribute = true,
                _ => {}
            }
        }

        Arguments {
            args,
            log,
            package_attribute,
        }
    }

    /// The argument vector for one version 4 build group.
    fn for_group(&self, namespace: &Namespace, grammars: &[Grammar]) -> Vec<String> {
        let mut result = self.args.clone();

        let declared = grammars
            .iter()
            .any(|grammar| grammar.namespace.is_declared());

        // the package option may only be added if no grammar declares its
        // namespace itself and the caller did not pass one already
        if !self.package_attribute && !declared && !namespace.is_empty() {
            result.push("-package".to_owned());
            result.push(namespace.id().to_owned());
        }

        result.extend(grammars.iter().map(|grammar| grammar.path.display().to_string()));

        result
    }
}
