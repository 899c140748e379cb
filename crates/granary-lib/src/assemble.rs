//! Relocation and packaging of generated sources.
//!
//! The generator drops all output files flat into the output directory,
//! named after the grammar that produced them. Assembly maps every file
//! back to its grammar and relocates it below the grammar's namespace
//! path, either directly on disk or into a source archive.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use granary_langs::Language;

use crate::groups::NameIndex;
use crate::Result;

const HEADER_EXTENSIONS: [&str; 7] = ["h", "hh", "hpp", "hxx", "inc", "inl", "H"];
const SOURCE_EXTENSIONS: [&str; 6] = ["c", "cc", "cpp", "cxx", "c++", "C"];

/// Assembles the generator's raw output directory into the final artifact.
pub struct Assembler<'a> {
    names: &'a NameIndex<'a>,
    output_directory: &'a Path,
    /// The global language override; per-grammar detection never splits.
    language: Option<Language>,
    split_headers: bool,
}

impl<'a> Assembler<'a> {
    pub fn new(
        names: &'a NameIndex<'a>,
        output_directory: &'a Path,
        language: Option<Language>,
        split_headers: bool,
    ) -> Self {
        Assembler {
            names,
            output_directory,
            language,
            split_headers,
        }
    }

    /// Relocates the generated sources in place, leaving a directory tree.
    ///
    /// Besides the namespace-qualified primary tree this produces two
    /// sibling locations: logs and unrecognized auxiliary files move next
    /// to the output directory, and for C/C++ targets header files go into
    /// a separate include tree. Moves overwrite, so re-running over the
    /// same raw output is idempotent.
    pub fn into_directory(&self) -> Result<()> {
        fs::create_dir_all(self.output_directory)?;

        let name = self
            .output_directory
            .file_name()
            .unwrap_or_default()
            .to_string_lossy();
        let parent = self.output_directory.parent().unwrap_or(Path::new(""));
        let auxiliary = parent.join(name.replace(".cc", ".antlr"));
        let headers = parent.join(name.replace(".cc", ".inc"));

        fs::create_dir_all(&auxiliary)?;
        fs::create_dir_all(&headers)?;

        let entries: Vec<PathBuf> = WalkDir::new(self.output_directory)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .collect();

        for entry in entries {
            let file_name = entry.file_name().unwrap_or_default().to_string_lossy().into_owned();

            // for extended grammars version 2 creates a new grammar file
            // that merges the two grammars and must be ignored
            if file_name.starts_with("expanded") && file_name.ends_with(".g") {
                fs::remove_file(&entry)?;
                continue;
            }

            if file_name.ends_with(".log") {
                move_file(&entry, &auxiliary.join(&file_name))?;
                continue;
            }

            let Some(grammar) = self.names.find(&file_name)? else {
                // imported file that should not be kept
                fs::remove_file(&entry)?;
                continue;
            };

            if matches!(self.language, Some(Language::C | Language::Cpp)) {
                if has_extension(&file_name, &HEADER_EXTENSIONS) {
                    if self.split_headers {
                        let target = headers.join(grammar.namespace_path()).join(&file_name);
                        move_file(&entry, &target)?;
                        continue;
                    }
                } else if !has_extension(&file_name, &SOURCE_EXTENSIONS) {
                    move_file(&entry, &auxiliary.join(&file_name))?;
                    continue;
                }
            }

            // source files are stored below their corresponding namespace
            let target = self
                .output_directory
                .join(grammar.namespace_path())
                .join(&file_name);

            if target != entry {
                move_file(&entry, &target)?;
            }
        }

        debug!(output = %self.output_directory.display(), "assembled directory tree");

        Ok(())
    }

    /// Packages the generated sources into a source archive.
    ///
    /// The archive is written from scratch on every run. Log files keep
    /// their location relative to the output directory; everything else is
    /// stored below its grammar's namespace path.
    pub fn into_archive(&self, srcjar: &Path) -> Result<()> {
        let mut archive = ZipWriter::new(File::create(srcjar)?);
        let options = SimpleFileOptions::default();

        for entry in WalkDir::new(self.output_directory)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
        {
            let file_name = entry.file_name().to_string_lossy().into_owned();

            if file_name.ends_with(".srcjar") || file_name.starts_with("expanded") {
                continue;
            }

            let target = if file_name.ends_with(".log") {
                entry
                    .path()
                    .strip_prefix(self.output_directory)
                    .unwrap_or(entry.path())
                    .to_path_buf()
            } else {
                let Some(grammar) = self.names.find(&file_name)? else {
                    // imported file that does not belong into the archive
                    continue;
                };

                grammar.namespace_path().join(&file_name)
            };

            archive.start_file(archive_entry_name(&target), options)?;
            io::copy(&mut File::open(entry.path())?, &mut archive)?;
        }

        archive.finish()?;

        debug!(srcjar = %srcjar.display(), "assembled source archive");

        Ok(())
    }
}

fn has_extension(file_name: &str, extensions: &[&str]) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| extensions.contains(&extension))
}

fn move_file(from: &Path, to: &Path) -> Result<()> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::rename(from, to)?;

    Ok(())
}

fn archive_entry_name(path: &Path) -> String {
    path.components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
