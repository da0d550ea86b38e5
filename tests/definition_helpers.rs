use oscript_lsp::Backend;
use oscript_lsp::documents::{current_doc_name, document_uri};
use tower_lsp::lsp_types::Position;

const PKG_CLASS: &str = "Class Pkg.Name Extends %Library.Persistent\n{\n}\n";

// ─── Class Name Normalization ───────────────────────────────────────────────

#[test]
fn test_normalize_unqualified_name_uses_declared_package() {
    assert_eq!(
        Backend::normalize_class_name(PKG_CLASS, "Name"),
        "Pkg.Name.cls"
    );
    assert_eq!(
        Backend::normalize_class_name(PKG_CLASS, "Other"),
        "Pkg.Other.cls"
    );
}

#[test]
fn test_normalize_percent_shorthand() {
    assert_eq!(
        Backend::normalize_class_name(PKG_CLASS, "%Foo"),
        "%Library.Foo.cls"
    );
}

#[test]
fn test_normalize_qualified_name_is_kept() {
    assert_eq!(
        Backend::normalize_class_name(PKG_CLASS, "Other.Thing"),
        "Other.Thing.cls"
    );
    assert_eq!(
        Backend::normalize_class_name(PKG_CLASS, "%XML.Adaptor"),
        "%XML.Adaptor.cls"
    );
}

#[test]
fn test_normalize_without_declaration_has_empty_package() {
    assert_eq!(Backend::normalize_class_name("", "Widget"), ".Widget.cls");
}

#[test]
fn test_normalize_routine_name() {
    assert_eq!(Backend::normalize_routine_name("MyMacros", "inc"), "MyMacros.inc");
    assert_eq!(Backend::normalize_routine_name("Demo.Utils", "mac"), "Demo.Utils.mac");
}

#[test]
fn test_package_name_first_class_line_wins() {
    let text = concat!(
        "/// docs\n",
        "Class First.One Extends %RegisteredObject\n",
        "Class Second.Two\n",
    );
    assert_eq!(Backend::package_name(text), "First");
    assert_eq!(Backend::package_name(""), "");
}

// ─── Cursor Containment ─────────────────────────────────────────────────────

#[test]
fn test_is_valid_inclusive_bounds() {
    let at = |character| Position::new(0, character);
    assert!(Backend::is_valid(at(5), 5, 3), "start column is inside");
    assert!(Backend::is_valid(at(7), 5, 3));
    assert!(
        Backend::is_valid(at(8), 5, 3),
        "column just past the last character is inside"
    );
    assert!(!Backend::is_valid(at(9), 5, 3));
    assert!(!Backend::is_valid(at(4), 5, 3));
}

// ─── Document Identity ──────────────────────────────────────────────────────

#[test]
fn test_current_doc_name_from_class_declaration() {
    assert_eq!(
        current_doc_name("file:///x", "Class Demo.Task Extends %Library.Persistent\n{\n}\n"),
        "Demo.Task.cls"
    );
}

#[test]
fn test_current_doc_name_from_routine_header() {
    assert_eq!(
        current_doc_name("file:///x", "ROUTINE Macros [Type=INC]\n#define A 1\n"),
        "Macros.inc"
    );
    assert_eq!(
        current_doc_name("file:///x", "ROUTINE Util\n    Quit\n"),
        "Util.mac"
    );
}

#[test]
fn test_current_doc_name_falls_back_to_uri_segment() {
    assert_eq!(
        current_doc_name("file:///tmp/Thing.mac", "no header here\n"),
        "Thing.mac"
    );
}

// ─── Target URIs ────────────────────────────────────────────────────────────

#[test]
fn test_document_uri_without_namespace() {
    let uri = document_uri("Demo.Task.cls", None).expect("valid uri");
    assert_eq!(uri.scheme(), "objectscript");
    assert_eq!(uri.path(), "/Demo.Task.cls");
    assert_eq!(uri.query(), None);
}

#[test]
fn test_document_uri_with_namespace() {
    let uri = document_uri("Demo.Task.cls", Some("USER")).expect("valid uri");
    assert_eq!(uri.path(), "/Demo.Task.cls");
    assert_eq!(uri.query(), Some("ns=USER"));
}

#[test]
fn test_document_uri_percent_class() {
    let uri = document_uri("%Library.Foo.cls", None).expect("valid uri");
    assert!(uri.path().ends_with("Library.Foo.cls"));
}
