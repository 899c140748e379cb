//! Supergrammar metadata from sibling archives.
//!
//! A version 2 grammar may extend a supergrammar that was generated into a
//! different archive. The tool expects the supergrammar's token vocabulary
//! files next to the supergrammar itself and does not understand archive
//! paths, so the required files are extracted up front and the archive
//! reference is dropped from the argument again.

use std::fs::{self, File};
use std::io;
use std::path::Path;

use tracing::debug;
use zip::ZipArchive;

use crate::{Error, Result};

/// Resolves `-glib` supergrammar references that cross artifact boundaries.
///
/// The `-glib` value is a `;`-separated list in which, by convention, the
/// archive of a separately generated supergrammar directly follows the
/// supergrammar path itself. Every token vocabulary file contained in such
/// an archive is extracted next to the supergrammar (existing files are
/// kept), and the rewritten argument no longer mentions the archive. An
/// argument without any archive entry fails: the caller has to supply the
/// artifact the supergrammar was generated into.
pub fn link_supergrammars(sandbox: &Path, arguments: &mut [String]) -> Result<()> {
    let Some(glib) = arguments.iter().position(|argument| argument == "-glib") else {
        return Ok(());
    };

    let Some(value) = arguments.get(glib + 1).cloned() else {
        return Ok(());
    };

    let libs: Vec<&str> = value.split(';').collect();
    let mut rewritten = value.clone();
    let mut found = false;

    for (i, lib) in libs.iter().enumerate() {
        if !lib.ends_with(".srcjar") {
            continue;
        }

        if i == 0 {
            return Err(Error::MissingDependencyArtifact(value));
        }

        found = true;
        rewritten = rewritten.replace(&format!(";{lib}"), "");

        let supergrammar = sandbox.join(libs[i - 1]);
        let target = supergrammar.parent().unwrap_or(sandbox);
        fs::create_dir_all(target)?;

        debug!(archive = %lib, target = %target.display(), "extracting token vocabularies");
        extract_token_files(&sandbox.join(lib), target)?;
    }

    if !found {
        return Err(Error::MissingDependencyArtifact(value));
    }

    arguments[glib + 1] = rewritten;

    Ok(())
}

/// Extracts every `.txt` token vocabulary file into the target directory,
/// skipping files that already exist there.
fn extract_token_files(archive: &Path, target: &Path) -> Result<()> {
    let mut archive = ZipArchive::new(File::open(archive)?)?;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;

        let Some(file_name) = Path::new(entry.name())
            .file_name()
            .map(|name| name.to_os_string())
        else {
            continue;
        };

        if !file_name.to_string_lossy().ends_with(".txt") {
            continue;
        }

        let copy = target.join(file_name);

        if !copy.exists() {
            let mut out = File::create(&copy)?;
            io::copy(&mut entry, &mut out)?;
        }
    }

    Ok(())
}
