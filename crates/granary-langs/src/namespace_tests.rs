use std::path::Path;

use crate::{Language, Namespace};

#[test]
fn equality_ignores_provenance() {
    let namespace = Namespace::of("a");
    assert_eq!(Namespace::of(""), Namespace::of(""));
    assert_eq!(namespace, namespace.clone());
    assert_ne!(Namespace::of(""), Namespace::of("a"));
    assert_eq!(Namespace::of("foo.bar"), Namespace::declared("foo.bar"));
}

#[test]
fn is_empty() {
    assert!(Namespace::of("").is_empty());
    assert!(!Namespace::of("a").is_empty());
}

#[test]
fn is_declared() {
    assert!(Namespace::declared("foo.bar").is_declared());
    assert!(!Namespace::of("foo.bar").is_declared());
}

#[test]
fn from_path() {
    let path = Path::new(r"org\antlr/test");

    assert_eq!("org::antlr::test", Namespace::from_path(path, Language::Cpp).id());
    assert_eq!("org.antlr.test", Namespace::from_path(path, Language::CSharp).id());
    assert_eq!("org.antlr.test", Namespace::from_path(path, Language::Dart).id());
    assert_eq!("org/antlr/test", Namespace::from_path(path, Language::Go).id());
    assert_eq!("org.antlr.test", Namespace::from_path(path, Language::Java).id());
    assert_eq!(
        "org/antlr/test",
        Namespace::from_path(path, Language::JavaScript).id()
    );
    assert_eq!(r"org\antlr/test", Namespace::from_path(path, Language::ObjC).id());
    assert_eq!("org/antlr/test", Namespace::from_path(path, Language::Python).id());
    assert_eq!("org::antlr::test", Namespace::from_path(path, Language::Ruby).id());
    assert_eq!("org.antlr.test", Namespace::from_path(path, Language::Swift).id());
}

#[test]
fn to_path() {
    assert_eq!("org/antlr/test", Namespace::of("org::antlr::test").to_path(Language::Cpp));
    assert_eq!("org/antlr/test", Namespace::of("org.antlr.test").to_path(Language::CSharp));
    assert_eq!("org/antlr/test", Namespace::of("org.antlr.test").to_path(Language::Dart));
    assert_eq!("org/antlr/test", Namespace::of("org/antlr/test").to_path(Language::Go));
    assert_eq!("org/antlr/test", Namespace::of("org.antlr.test").to_path(Language::Java));
    assert_eq!(
        "org/antlr/test",
        Namespace::of("org/antlr/test").to_path(Language::JavaScript)
    );
    assert_eq!("org/antlr/test", Namespace::of("org/antlr/test").to_path(Language::ObjC));
    assert_eq!("org/antlr/test", Namespace::of("org.antlr.test").to_path(Language::Python));
    assert_eq!("org/antlr/test", Namespace::of("org::antlr::test").to_path(Language::Ruby));
    assert_eq!("org/antlr/test", Namespace::of("org.antlr.test").to_path(Language::Swift));
}

#[test]
fn round_trip_modulo_separators() {
    let path = Path::new("org/antlr/test");

    for language in Language::all() {
        let id = language.to_id(path);
        assert_eq!(
            "org/antlr/test",
            language.to_path(&id),
            "round trip for {language}"
        );
    }
}
