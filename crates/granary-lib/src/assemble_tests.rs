use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use encoding_rs::UTF_8;
use tempfile::TempDir;
use zip::ZipArchive;

use granary_langs::Language;

use crate::assemble::Assembler;
use crate::grammar::Grammar;
use crate::groups::{NameIndex, group_by_namespace};
use crate::version::ToolVersion;

fn grammar(root: &Path, relative: &str, contents: &str) -> Grammar {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, contents).unwrap();
    Grammar::read(ToolVersion::V4, &path, None, None, UTF_8, None).unwrap()
}

fn touch(root: &Path, relative: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, relative).unwrap();
}

fn archive_names(path: &Path) -> Vec<String> {
    let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn archive_without_namespace_stays_at_root() {
    let sandbox = TempDir::new().unwrap();
    let hello = grammar(sandbox.path(), "Hello.g4", "grammar Hello; r : 'hello';");

    let out = sandbox.path().join("out");
    touch(&out, "Hello.tokens");
    touch(&out, "HelloLexer.java");
    touch(&out, "HelloParser.java");

    let groups = group_by_namespace(vec![hello]);
    let names = NameIndex::new(&groups, ToolVersion::V4, false);
    let srcjar = sandbox.path().join("hello.srcjar");

    Assembler::new(&names, &out, None, true)
        .into_archive(&srcjar)
        .unwrap();

    assert_eq!(
        vec!["Hello.tokens", "HelloLexer.java", "HelloParser.java"],
        archive_names(&srcjar)
    );
}

#[test]
fn archive_places_sources_below_namespace() {
    let sandbox = TempDir::new().unwrap();
    let first = grammar(
        sandbox.path(),
        "work/src/main/antlr4/foo/bar/First.g4",
        "grammar First; r : 'a';",
    );
    let second = grammar(
        sandbox.path(),
        "work/src/main/antlr4/foo/bar/Second.g4",
        "grammar Second; r : 'b';",
    );

    let out = sandbox.path().join("out");
    touch(&out, "FirstLexer.java");
    touch(&out, "SecondLexer.java");

    let groups = group_by_namespace(vec![first, second]);
    let names = NameIndex::new(&groups, ToolVersion::V4, false);
    let srcjar = sandbox.path().join("foo.srcjar");

    Assembler::new(&names, &out, None, true)
        .into_archive(&srcjar)
        .unwrap();

    assert_eq!(
        vec!["foo/bar/FirstLexer.java", "foo/bar/SecondLexer.java"],
        archive_names(&srcjar)
    );
}

#[test]
fn archive_drops_unkept_import_output() {
    let sandbox = TempDir::new().unwrap();
    let hello = grammar(
        sandbox.path(),
        "Hello.g4",
        "grammar Hello;\nimport CommonTokens;\nr : 'hello';",
    );

    let out = sandbox.path().join("out");
    touch(&out, "HelloParser.java");
    touch(&out, "CommonTokensLexer.java");

    let groups = group_by_namespace(vec![hello]);
    let names = NameIndex::new(&groups, ToolVersion::V4, false);
    let srcjar = sandbox.path().join("hello.srcjar");

    Assembler::new(&names, &out, None, true)
        .into_archive(&srcjar)
        .unwrap();

    assert_eq!(vec!["HelloParser.java"], archive_names(&srcjar));
}

#[test]
fn archive_is_rebuilt_on_rerun() {
    let sandbox = TempDir::new().unwrap();
    let hello = grammar(sandbox.path(), "Hello.g4", "grammar Hello; r : 'hello';");

    let out = sandbox.path().join("out");
    touch(&out, "HelloLexer.java");

    let groups = group_by_namespace(vec![hello]);
    let names = NameIndex::new(&groups, ToolVersion::V4, false);
    let srcjar = sandbox.path().join("hello.srcjar");

    let assembler = Assembler::new(&names, &out, None, true);
    assembler.into_archive(&srcjar).unwrap();
    assembler.into_archive(&srcjar).unwrap();

    assert_eq!(vec!["HelloLexer.java"], archive_names(&srcjar));
}

#[test]
fn directory_relocates_below_namespace() {
    let sandbox = TempDir::new().unwrap();
    let hello = grammar(
        sandbox.path(),
        "work/src/main/antlr4/foo/bar/Hello.g4",
        "grammar Hello; r : 'hello';",
    );

    let out = sandbox.path().join("out");
    touch(&out, "HelloLexer.java");
    touch(&out, "Hello.tokens");

    let groups = group_by_namespace(vec![hello]);
    let names = NameIndex::new(&groups, ToolVersion::V4, false);

    Assembler::new(&names, &out, None, true)
        .into_directory()
        .unwrap();

    assert!(out.join("foo/bar/HelloLexer.java").exists());
    assert!(out.join("foo/bar/Hello.tokens").exists());
    assert!(!out.join("HelloLexer.java").exists());
}

#[test]
fn directory_deletes_merge_artifacts_and_import_output() {
    let sandbox = TempDir::new().unwrap();
    let hello = grammar(
        sandbox.path(),
        "Hello.g4",
        "grammar Hello;\nimport CommonTokens;\nr : 'hello';",
    );

    let out = sandbox.path().join("out");
    touch(&out, "HelloParser.java");
    touch(&out, "CommonTokensLexer.java");
    touch(&out, "expandedHello.g");

    let groups = group_by_namespace(vec![hello]);
    let names = NameIndex::new(&groups, ToolVersion::V4, false);

    Assembler::new(&names, &out, None, true)
        .into_directory()
        .unwrap();

    assert!(out.join("HelloParser.java").exists());
    assert!(!out.join("CommonTokensLexer.java").exists());
    assert!(!out.join("expandedHello.g").exists());
}

#[test]
fn directory_segregates_logs() {
    let sandbox = TempDir::new().unwrap();
    let hello = grammar(sandbox.path(), "Hello.g4", "grammar Hello; r : 'hello';");

    let out = sandbox.path().join("gen.cc");
    touch(&out, "HelloLexer.java");
    touch(&out, "antlr-2024.log");

    let groups = group_by_namespace(vec![hello]);
    let names = NameIndex::new(&groups, ToolVersion::V4, false);

    Assembler::new(&names, &out, None, true)
        .into_directory()
        .unwrap();

    assert!(sandbox.path().join("gen.antlr/antlr-2024.log").exists());
    assert!(!out.join("antlr-2024.log").exists());
}

#[test]
fn directory_splits_cpp_headers() {
    let sandbox = TempDir::new().unwrap();
    let path = sandbox.path().join("Hello.g4");
    fs::write(&path, "grammar Hello; r : 'hello';").unwrap();
    let hello = Grammar::read(
        ToolVersion::V4,
        &path,
        Some(Language::Cpp),
        None,
        UTF_8,
        None,
    )
    .unwrap();

    let out = sandbox.path().join("gen.cc");
    touch(&out, "HelloLexer.cpp");
    touch(&out, "HelloLexer.h");
    touch(&out, "Hello.tokens");

    let groups = group_by_namespace(vec![hello]);
    let names = NameIndex::new(&groups, ToolVersion::V4, false);

    Assembler::new(&names, &out, Some(Language::Cpp), true)
        .into_directory()
        .unwrap();

    assert!(out.join("HelloLexer.cpp").exists());
    assert!(sandbox.path().join("gen.inc/HelloLexer.h").exists());
    // neither header nor source: auxiliary location
    assert!(sandbox.path().join("gen.antlr/Hello.tokens").exists());
}

#[test]
fn directory_keeps_headers_in_place_without_split() {
    let sandbox = TempDir::new().unwrap();
    let path = sandbox.path().join("Hello.g4");
    fs::write(&path, "grammar Hello; r : 'hello';").unwrap();
    let hello = Grammar::read(
        ToolVersion::V4,
        &path,
        Some(Language::Cpp),
        None,
        UTF_8,
        None,
    )
    .unwrap();

    let out = sandbox.path().join("gen.cc");
    touch(&out, "HelloLexer.h");

    let groups = group_by_namespace(vec![hello]);
    let names = NameIndex::new(&groups, ToolVersion::V4, false);

    Assembler::new(&names, &out, Some(Language::Cpp), false)
        .into_directory()
        .unwrap();

    assert!(out.join("HelloLexer.h").exists());
}

#[test]
fn directory_rerun_is_idempotent() {
    let sandbox = TempDir::new().unwrap();
    let hello = grammar(
        sandbox.path(),
        "work/src/main/antlr4/foo/Hello.g4",
        "grammar Hello; r : 'hello';",
    );

    let out = sandbox.path().join("out");
    touch(&out, "HelloLexer.java");

    let groups = group_by_namespace(vec![hello]);
    let names = NameIndex::new(&groups, ToolVersion::V4, false);
    let assembler = Assembler::new(&names, &out, None, true);

    assembler.into_directory().unwrap();
    // a second run over the already-relocated tree changes nothing
    assembler.into_directory().unwrap();

    assert!(out.join("foo/HelloLexer.java").exists());
}

#[test]
fn archive_entries_are_readable() {
    let sandbox = TempDir::new().unwrap();
    let hello = grammar(sandbox.path(), "Hello.g4", "grammar Hello; r : 'hello';");

    let out = sandbox.path().join("out");
    touch(&out, "HelloLexer.java");

    let groups = group_by_namespace(vec![hello]);
    let names = NameIndex::new(&groups, ToolVersion::V4, false);
    let srcjar = sandbox.path().join("hello.srcjar");

    Assembler::new(&names, &out, None, true)
        .into_archive(&srcjar)
        .unwrap();

    let mut archive = ZipArchive::new(File::open(&srcjar).unwrap()).unwrap();
    let mut entry = archive.by_name("HelloLexer.java").unwrap();
    let mut contents = String::new();
    entry.read_to_string(&mut contents).unwrap();
    assert_eq!("HelloLexer.java", contents);
}
