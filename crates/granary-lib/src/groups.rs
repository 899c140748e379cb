//! Namespace grouping, dependency ordering, and the name index.

use std::cmp::Ordering;

use indexmap::IndexMap;
use tracing::debug;

use granary_langs::{Namespace, case};

use crate::grammar::Grammar;
use crate::version::ToolVersion;
use crate::{Error, Result};

/// Grammars grouped by resolved namespace, in first-seen order.
///
/// Each group is generated together in one invocation of the external
/// tool; within a group, grammars are ordered so imported grammars come
/// before their importers.
pub type BuildGroups = IndexMap<Namespace, Vec<Grammar>>;

/// Partitions the grammars by resolved namespace.
pub fn group_by_namespace(grammars: Vec<Grammar>) -> BuildGroups {
    let mut groups = BuildGroups::new();

    for grammar in grammars {
        let group = groups
            .entry(grammar.namespace.clone())
            .or_insert_with(Vec::new);
        group.push(grammar);

        // enforce order to avoid problems with imported grammars
        sort_by_dependencies(group);
    }

    debug!(groups = groups.len(), "grouped grammars by namespace");

    groups
}

/// Dependency order between two grammars of the same group.
///
/// Imported grammars must be generated before their importers because the
/// tool processes its file list in a single, dependency-unaware pass. Only
/// the direct import relation is considered; groups of three or more
/// mutually referencing grammars are not fully ordered.
fn dependency_order(a: &Grammar, b: &Grammar) -> Ordering {
    if a.imports_grammar(b) {
        return Ordering::Greater;
    }

    if b.imports_grammar(a) {
        return Ordering::Less;
    }

    match (a.imports.is_empty(), b.imports.is_empty()) {
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        _ => Ordering::Equal,
    }
}

/// Stable insertion sort under the partial dependency order.
///
/// The comparator deliberately has no opinion for unrelated grammars, so
/// encounter order is preserved for them.
fn sort_by_dependencies(group: &mut [Grammar]) {
    for i in 1..group.len() {
        let mut j = i;

        while j > 0 && dependency_order(&group[j - 1], &group[j]) == Ordering::Greater {
            group.swap(j - 1, j);
            j -= 1;
        }
    }
}

/// Mapping of possible output file name prefixes to their grammars, sorted
/// from longest name to shortest.
///
/// Names of imports that must not be retained map to `None`, the discard
/// marker: files attributed to them are transitively generated dependency
/// output that does not belong into the artifact.
pub struct NameIndex<'a> {
    entries: Vec<(&'a str, Option<&'a Grammar>)>,
    version: ToolVersion,
}

impl<'a> NameIndex<'a> {
    /// Builds the index over all groups.
    ///
    /// With `keep_imports`, files generated for an imported grammar are
    /// attributed to the importing grammar instead of being discarded.
    pub fn new(groups: &'a BuildGroups, version: ToolVersion, keep_imports: bool) -> Self {
        let mut entries: IndexMap<&str, Option<&Grammar>> = IndexMap::new();

        for grammars in groups.values() {
            for grammar in grammars {
                for name in &grammar.names {
                    entries.insert(name, Some(grammar));
                }

                for import in &grammar.imports {
                    entries.insert(import, keep_imports.then_some(grammar));
                }
            }
        }

        let mut entries: Vec<_> = entries.into_iter().collect();
        entries.sort_by(|(a, _), (b, _)| longest_first(a, b));

        NameIndex { entries, version }
    }

    /// Finds the grammar that corresponds to the given generated file.
    ///
    /// Returns the discard marker (`Ok(None)`) for files attributed to an
    /// unkept import. A file that matches no known name at all is an
    /// internal consistency failure.
    pub fn find(&self, file_name: &str) -> Result<Option<&'a Grammar>> {
        for (name, grammar) in &self.entries {
            if starts_with_name(file_name, name)
                || starts_with_name(file_name, &case::to_lower_underscore(name))
                || starts_with_name(file_name, &name.to_lowercase())
            {
                return Ok(*grammar);
            }

            // version 2 does not enforce casing for grammars
            if self.version == ToolVersion::V2
                && starts_with_name(&file_name.to_lowercase(), &name.to_lowercase())
            {
                return Ok(*grammar);
            }
        }

        Err(Error::UnmatchedOutputFile(file_name.to_owned()))
    }
}

/// Prefix check for a candidate name against a generated file name.
///
/// A digit directly after the prefix continues the grammar name, so
/// `HelloWorld` must not claim files generated for `HelloWorld2`.
fn starts_with_name(file_name: &str, name: &str) -> bool {
    if name.is_empty() {
        return false;
    }

    match file_name.strip_prefix(name) {
        Some(rest) => !rest.starts_with(|c: char| c.is_ascii_digit()),
        None => false,
    }
}

/// Sorts names from longest to shortest; equal lengths compare
/// case-insensitively.
fn longest_first(first: &str, second: &str) -> Ordering {
    second
        .len()
        .cmp(&first.len())
        .then_with(|| first.to_lowercase().cmp(&second.to_lowercase()))
}
