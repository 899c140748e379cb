//! The bridge to the external generator tool.
//!
//! The generator is an opaque, versioned black box: it either succeeds or
//! reports an error count. Everything version-specific hides behind the
//! [`ToolInvoker`] seam so the pipeline never links against any particular
//! tool release.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::version::ToolVersion;
use crate::{Error, Result};

/// A single invocation of the generator tool.
#[derive(Clone, Debug)]
pub struct Invocation {
    /// The tool version to run.
    pub version: ToolVersion,

    /// Resolved classpath entries for loading the tool.
    pub classpath: Vec<PathBuf>,

    /// The tool command line, including the grammar files.
    pub args: Vec<String>,

    /// The sandbox directory the tool runs in.
    pub working_dir: PathBuf,
}

/// Invokes the version-specific generator tool.
///
/// Returns the number of errors the tool reported; zero means success.
pub trait ToolInvoker {
    fn invoke(&self, invocation: &Invocation) -> Result<usize>;
}

/// Runs the generator in a `java` child process.
///
/// Every invocation gets a fresh JVM with exactly the configured classpath;
/// process isolation stands in for loading incompatible tool versions
/// through isolated class loaders.
#[derive(Clone, Copy, Debug, Default)]
pub struct JavaTool;

impl ToolInvoker for JavaTool {
    fn invoke(&self, invocation: &Invocation) -> Result<usize> {
        let separator = if cfg!(windows) { ";" } else { ":" };
        let classpath = invocation
            .classpath
            .iter()
            .map(|entry| entry.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(separator);

        debug!(
            version = ?invocation.version,
            args = ?invocation.args,
            "invoking generator"
        );

        let output = Command::new("java")
            .arg("-cp")
            .arg(classpath)
            .arg(invocation.version.main_class())
            .args(&invocation.args)
            .current_dir(&invocation.working_dir)
            .output()?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        let errors = count_errors(&stderr);

        if output.status.success() {
            Ok(errors)
        } else {
            // a crashed tool may not have printed countable error lines
            Ok(errors.max(1))
        }
    }
}

/// Counts tool error reports on stderr.
///
/// All supported versions prefix their reports with `error(<code>)` or
/// `error:`, one per line.
fn count_errors(stderr: &str) -> usize {
    stderr
        .lines()
        .map(str::trim_start)
        .filter(|line| line.starts_with("error(") || line.starts_with("error:"))
        .count()
}

/// Resolves classpath entries against the sandbox.
///
/// Every library entry must exist; a missing one is a configuration error
/// named after the entry.
pub fn resolve_classpath(sandbox: &Path, entries: &[String]) -> Result<Vec<PathBuf>> {
    let mut classpath = Vec::with_capacity(entries.len());

    for entry in entries {
        let lib = sandbox.join(entry);

        if lib.extension().is_some_and(|extension| extension == "jar") && !lib.exists() {
            return Err(Error::MissingClasspathEntry(PathBuf::from(entry)));
        }

        classpath.push(lib);
    }

    Ok(classpath)
}

#[cfg(test)]
mod tests {
    use super::count_errors;

    #[test]
    fn counts_error_lines() {
        let stderr = "error(50): Hello.g4:3:0: syntax error\nwarning(125): foo\nerror(99): bar\n";
        assert_eq!(2, count_errors(stderr));
    }

    #[test]
    fn counts_legacy_error_lines() {
        assert_eq!(1, count_errors("error: Hello.g:4: unexpected token\n"));
        assert_eq!(0, count_errors("warning: something minor\n"));
    }
}
