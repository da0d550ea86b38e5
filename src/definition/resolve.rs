/// Goto-definition resolution.
///
/// Given a cursor position in an ObjectScript document this module:
///   1. Matches the cursor's line (and, for class references, self
///      references and macros, the word under the cursor) against a fixed
///      sequence of syntactic shapes.
///   2. Normalizes the matched name to a canonical document name
///      (`Pkg.Name.cls`, `Macros.inc`).
///   3. Builds `LocationLink`s pointing at the target document.
///
/// The strategy list in [`Backend::resolve_definition`] is the single
/// source of truth for matcher precedence.
use std::sync::LazyLock;

use regex::Regex;
use tower_lsp::lsp_types::*;

use crate::Backend;
use crate::documents;
use crate::util::line_at;

/// `(Of|As|Extends) Name`: a single superclass or type reference.
static KEYWORD_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:Of|As|Extends)\b %?\b[a-zA-Z][a-zA-Z0-9]+(?:\.[a-zA-Z][a-zA-Z0-9]+)*\b")
        .expect("valid regex")
});

/// `Extends (A, B, C)`: a parenthesized superclass list.
static SUPERCLASS_LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bExtends\b \([^)]+\)").expect("valid regex"));

/// `#Include Name` anchored at the start of the line.
static INCLUDE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*#?(?:Include|IncludeGenerator) (%?\b[a-zA-Z][a-zA-Z0-9]+(?:\.[a-zA-Z][a-zA-Z0-9]+)*\b)")
        .expect("valid regex")
});

/// `Include (A, B)`: a parenthesized include list.
static INCLUDE_LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:Include|IncludeGenerator)\b \([^)]+\)").expect("valid regex"));

impl Backend {
    /// Handle a "go to definition" request.
    ///
    /// Strategies run in a fixed order and the first one that yields a
    /// result wins; a strategy that does not recognize the line (or whose
    /// match does not contain the cursor) declines and the next one runs:
    ///
    ///   1. `##class(Name).Member` references
    ///   2. `..Member` self references
    ///   3. `$$$MACRO` invocations
    ///   4. `Of` / `As` / `Extends` followed by a single class name
    ///   5. `Extends (A, B, C)` superclass lists
    ///   6. `#Include Name` directives
    ///   7. `Include (A, B)` include lists
    pub(crate) async fn resolve_definition(
        &self,
        uri: &str,
        content: &str,
        position: Position,
    ) -> Vec<LocationLink> {
        let Some(line_text) = line_at(content, position.line) else {
            return Vec::new();
        };

        if let Some(links) = self.class_ref(content, position, line_text).await {
            return links;
        }
        if let Some(links) = self.self_ref(uri, content, position, line_text).await {
            return links;
        }
        if let Some(links) = self.macro_ref(uri, content, position, line_text).await {
            return links;
        }
        if let Some(links) = self.keyword_class(content, position, line_text) {
            return links;
        }
        if let Some(links) = self.superclass_list(content, position, line_text) {
            return links;
        }
        if let Some(links) = self.include_directive(position, line_text) {
            return links;
        }
        if let Some(links) = self.include_list(position, line_text) {
            return links;
        }

        Vec::new()
    }

    // ─── Span Matchers ──────────────────────────────────────────────────────

    /// `Of` / `As` / `Extends` followed by a single class name. The first
    /// segment whose name span contains the cursor wins. A name
    /// immediately followed by ` of` introduces a collection element type
    /// (`As array Of %String`) and is skipped.
    fn keyword_class(
        &self,
        content: &str,
        position: Position,
        line_text: &str,
    ) -> Option<Vec<LocationLink>> {
        for m in KEYWORD_CLASS.find_iter(line_text) {
            let tail = &line_text[m.end()..];
            if tail.get(..3).is_some_and(|t| t.eq_ignore_ascii_case(" of")) {
                continue;
            }
            let Some((keyword, name)) = m.as_str().split_once(' ') else {
                continue;
            };
            let start = m.start() + keyword.len() + 1;
            if Self::is_valid(position, start, name.len()) {
                let link = self.make_class_definition(
                    position,
                    start,
                    name.len(),
                    &Self::normalize_class_name(content, name),
                )?;
                return Some(vec![link]);
            }
        }
        None
    }

    /// `Extends (A, B, C)`. Every listed class becomes a link, whichever
    /// entry the cursor sits on; callers treat the result as "all
    /// superclass candidates on this line".
    fn superclass_list(
        &self,
        content: &str,
        position: Position,
        line_text: &str,
    ) -> Option<Vec<LocationLink>> {
        let m = SUPERCLASS_LIST.find(line_text)?;
        let part = m.as_str();
        let open = part.find('(')?;
        let close = part.find(')')?;

        let mut links = Vec::new();
        for name in part[open + 1..close].split(',') {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            let Some(offset) = part.find(name) else {
                continue;
            };
            let start = m.start() + offset;
            if let Some(link) = self.make_class_definition(
                position,
                start,
                name.len(),
                &Self::normalize_class_name(content, name),
            ) {
                links.push(link);
            }
        }
        Some(links)
    }

    /// `#Include Name` at the start of the line. Cursor elsewhere on the
    /// line falls through to the include-list matcher.
    fn include_directive(&self, position: Position, line_text: &str) -> Option<Vec<LocationLink>> {
        let caps = INCLUDE.captures(line_text)?;
        let name = caps.get(1)?.as_str();
        let start = line_text.find(name)?;
        if Self::is_valid(position, start, name.len()) {
            let link = self.make_routine_definition(
                position,
                start,
                name.len(),
                &Self::normalize_routine_name(name, "inc"),
            )?;
            return Some(vec![link]);
        }
        None
    }

    /// `Include (A, B)`. Unlike the superclass list, only the first entry
    /// whose span contains the cursor is returned.
    fn include_list(&self, position: Position, line_text: &str) -> Option<Vec<LocationLink>> {
        for m in INCLUDE_LIST.find_iter(line_text) {
            let part = m.as_str();
            let Some(open) = part.find('(') else { continue };
            let Some(close) = part.find(')') else { continue };
            for name in part[open + 1..close].split(',') {
                let name = name.trim();
                if name.is_empty() {
                    continue;
                }
                let Some(offset) = part.find(name) else {
                    continue;
                };
                let start = m.start() + offset;
                if Self::is_valid(position, start, name.len()) {
                    let link = self.make_routine_definition(
                        position,
                        start,
                        name.len(),
                        &Self::normalize_routine_name(name, "inc"),
                    )?;
                    return Some(vec![link]);
                }
            }
        }
        None
    }

    // ─── Name Normalization ─────────────────────────────────────────────────

    /// Canonical class document name for a possibly-unqualified `name`.
    ///
    /// `%Foo` expands to `%Library.Foo`; any other unqualified name gets
    /// the package of the class declared in `content`. Always appends
    /// `.cls`.
    pub fn normalize_class_name(content: &str, name: &str) -> String {
        let mut name = name.to_string();
        if !name.contains('.') {
            if let Some(rest) = name.strip_prefix('%') {
                name = format!("%Library.{rest}");
            } else {
                name = format!("{}.{}", Self::package_name(content), name);
            }
        }
        name.push_str(".cls");
        name
    }

    /// Routine names are not packaged; the extension is just appended.
    pub fn normalize_routine_name(name: &str, extension: &str) -> String {
        format!("{name}.{extension}")
    }

    /// Package of the class declared in `content`: the first line starting
    /// with `Class`, second whitespace-separated token, minus its final
    /// dot segment. Empty when no declaration is found.
    pub fn package_name(content: &str) -> String {
        for line in content.lines() {
            if line.starts_with("Class") {
                let declared = line.split(' ').nth(1).unwrap_or("");
                let mut parts: Vec<&str> = declared.split('.').collect();
                parts.pop();
                return parts.join(".");
            }
        }
        String::new()
    }

    /// Cursor-containment check shared by every matcher. Inclusive at both
    /// ends: `character == start + length` still counts as inside.
    pub fn is_valid(position: Position, start: usize, length: usize) -> bool {
        (position.character as usize) >= start && (position.character as usize) <= start + length
    }

    // ─── Link Builders ──────────────────────────────────────────────────────

    pub(crate) fn make_class_definition(
        &self,
        position: Position,
        start: usize,
        length: usize,
        name: &str,
    ) -> Option<LocationLink> {
        self.make_definition(position, start, length, name)
    }

    pub(crate) fn make_routine_definition(
        &self,
        position: Position,
        start: usize,
        length: usize,
        name: &str,
    ) -> Option<LocationLink> {
        self.make_definition(position, start, length, name)
    }

    /// Definition link whose origin is `[start, start + length)` on the
    /// cursor's line. The target anchor is the document start; only the
    /// macro path knows a precise target line.
    fn make_definition(
        &self,
        position: Position,
        start: usize,
        length: usize,
        name: &str,
    ) -> Option<LocationLink> {
        let target_uri = documents::document_uri(name, self.namespace().as_deref())?;
        let first_line = Position::new(0, 0);
        let target_range = Range::new(first_line, first_line);
        Some(LocationLink {
            origin_selection_range: Some(Range::new(
                Position::new(position.line, start as u32),
                Position::new(position.line, (start + length) as u32),
            )),
            target_uri,
            target_range,
            target_selection_range: target_range,
        })
    }
}
