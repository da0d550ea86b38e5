//! Document identity: canonical resource names and their target URIs.
//!
//! Server-side documents are virtualized behind the `objectscript` scheme;
//! the editor resolves their content. This module maps a canonical name
//! like `Demo.Task.cls` to `objectscript:///Demo.Task.cls` (with the
//! active namespace as a query parameter), and derives the canonical name
//! of an open document from its text.

use std::sync::LazyLock;

use regex::Regex;
use tower_lsp::lsp_types::Url;

static CLASS_DECL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^Class +(%?\w+(?:\.\w+)+)").expect("valid regex"));

static ROUTINE_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^ROUTINE +(%?\w+(?:\.\w+)*)(?: *\[ *Type *= *(\w+))?").expect("valid regex")
});

/// Addressable URI for a canonical document name.
pub fn document_uri(name: &str, namespace: Option<&str>) -> Option<Url> {
    let mut uri = format!("objectscript:///{name}");
    if let Some(ns) = namespace
        && !ns.is_empty()
    {
        uri.push_str("?ns=");
        uri.push_str(ns);
    }
    Url::parse(&uri).ok()
}

/// Canonical name of an open document, derived from its text.
///
/// A `Class Pkg.Name` declaration yields `Pkg.Name.cls`; a
/// `ROUTINE Name [Type=INC]` header yields `Name.inc` (type lower-cased,
/// default `mac`); anything else falls back to the URI's final path
/// segment. First matching line wins.
pub fn current_doc_name(uri: &str, content: &str) -> String {
    for line in content.lines() {
        if let Some(caps) = CLASS_DECL.captures(line) {
            return format!("{}.cls", &caps[1]);
        }
        if let Some(caps) = ROUTINE_DECL.captures(line) {
            let ext = caps
                .get(2)
                .map(|m| m.as_str().to_lowercase())
                .unwrap_or_else(|| "mac".to_string());
            return format!("{}.{}", &caps[1], ext);
        }
    }
    uri.rsplit('/').next().unwrap_or(uri).to_string()
}
