/// `$$$MACRO` resolution.
///
/// The macro name is looked for in the current document first (`#define`
/// and `#def1arg` directives). A miss falls back to the Atelier query
/// service, passing the class's `Include` files so the server can search
/// them and the rest of the macro inheritance chain.
use std::sync::LazyLock;

use regex::Regex;
use tower_lsp::lsp_types::*;
use tracing::debug;

use crate::Backend;
use crate::documents;
use crate::util::word_range_at;

/// The word under the cursor, dollar markers included.
static MACRO_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$*\w+").expect("valid regex"));

/// A full macro invocation: exactly three markers and a name.
static MACRO_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\${3}(\b\w+\b)$").expect("valid regex"));

/// `Include X` / `Include (X, Y)` directives of a class document.
static INCLUDE_FILES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*Include (?:\(([^)]+)\)|(%?[A-Za-z][A-Za-z0-9]*(?:\.[A-Za-z][A-Za-z0-9]*)*))")
        .expect("valid regex")
});

impl Backend {
    /// `$$$MACRO` under the cursor.
    pub(crate) async fn macro_ref(
        &self,
        uri: &str,
        content: &str,
        position: Position,
        line_text: &str,
    ) -> Option<Vec<LocationLink>> {
        let (start, word) = word_range_at(line_text, position.character, &MACRO_WORD)?;
        let caps = MACRO_NAME.captures(word)?;
        let name = caps.get(1)?.as_str();

        let origin = Range::new(
            Position::new(position.line, start as u32),
            Position::new(position.line, (start + word.len()) as u32),
        );
        let doc_name = documents::current_doc_name(uri, content);
        Some(self.macro_links(&doc_name, content, name, origin).await)
    }

    /// Locate a macro definition: the current document first, then the
    /// query service (searching the class's include files server-side).
    async fn macro_links(
        &self,
        doc_name: &str,
        content: &str,
        name: &str,
        origin: Range,
    ) -> Vec<LocationLink> {
        // Same-document definition. The target line is the number of line
        // breaks before the match, with carriage returns stripped first so
        // CRLF documents count the same as LF ones.
        let text = content.replace('\r', "");
        let pattern = Regex::new(&format!(
            r"(?m)^[\t ]*#def(?:ine|1arg) \b{}\b",
            regex::escape(name)
        ))
        .expect("valid regex");
        if let Some(m) = pattern.find(&text) {
            let line = text[..m.start()].matches('\n').count() as u32;
            return self
                .macro_target(doc_name, line, origin)
                .into_iter()
                .collect();
        }

        let includes = if doc_name.to_lowercase().ends_with(".cls") {
            include_files(content)
        } else {
            Vec::new()
        };

        match self.query.macro_location(doc_name, name, &includes).await {
            Ok(Some(row)) if !row.document.is_empty() => self
                .macro_target(&row.document, row.line, origin)
                .into_iter()
                .collect(),
            Ok(_) => Vec::new(),
            Err(err) => {
                debug!(doc_name, name, %err, "macro lookup failed");
                Vec::new()
            }
        }
    }

    /// Link to line `line` of `document`, the one definition shape with a
    /// precise target line.
    fn macro_target(&self, document: &str, line: u32, origin: Range) -> Option<LocationLink> {
        let target_uri = documents::document_uri(document, self.namespace().as_deref())?;
        let target = Position::new(line, 0);
        let target_range = Range::new(target, target);
        Some(LocationLink {
            origin_selection_range: Some(origin),
            target_uri,
            target_range,
            target_selection_range: target_range,
        })
    }
}

/// Names of the include files a class document pulls in statically.
fn include_files(content: &str) -> Vec<String> {
    let mut names = Vec::new();
    for caps in INCLUDE_FILES.captures_iter(content) {
        if let Some(list) = caps.get(1) {
            names.extend(
                list.as_str()
                    .split(',')
                    .map(|name| name.trim().to_string())
                    .filter(|name| !name.is_empty()),
            );
        } else if let Some(one) = caps.get(2) {
            names.push(one.as_str().to_string());
        }
    }
    names
}
