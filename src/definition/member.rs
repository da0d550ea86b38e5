/// `##class(...)` and `..Member` resolution.
///
/// A cursor inside the class-name span of `##class(Name)` resolves
/// locally to the class document. A cursor on the member side, or on a
/// `..Member` self reference, needs the class dictionary (the member may
/// be inherited), so resolution is delegated to the Atelier query service
/// and its rows are mapped back into links.
use std::sync::LazyLock;

use regex::Regex;
use tower_lsp::lsp_types::*;
use tracing::debug;

use crate::Backend;
use crate::documents;
use crate::util::word_range_at;

/// `##class(Name).Member`, optionally with a `$this` qualifier between
/// the closing parenthesis and the member dot.
static CLASS_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)##class\(([^)]+)\)(?:\$this)?\.(#?%?[a-zA-Z][a-zA-Z0-9]*)")
        .expect("valid regex")
});

/// `..Member`, with an optional `#` or `%` marker on the member name.
static SELF_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.\.#?%?[a-zA-Z][a-zA-Z0-9]+").expect("valid regex"));

impl Backend {
    /// `##class(Name).Member` under the cursor. Cursor within the class
    /// name resolves to the class document; anywhere else in the match,
    /// the member is looked up remotely against that class.
    pub(crate) async fn class_ref(
        &self,
        content: &str,
        position: Position,
        line_text: &str,
    ) -> Option<Vec<LocationLink>> {
        let (match_start, matched) = word_range_at(line_text, position.character, &CLASS_REF)?;
        let caps = CLASS_REF.captures(matched)?;
        let class_name = caps.get(1)?.as_str();
        let member = caps.get(2)?.as_str();

        let start = match_start + "##class(".len();
        if Self::is_valid(position, start, class_name.len()) {
            let link = self.make_class_definition(
                position,
                start,
                class_name.len(),
                &Self::normalize_class_name(content, class_name),
            )?;
            return Some(vec![link]);
        }

        let owner = Self::normalize_class_name(content, class_name);
        let owner = owner.strip_suffix(".cls").unwrap_or(&owner);
        Some(self.member_links(owner, member, None).await)
    }

    /// `..Member`: a member of the class owning the current document.
    /// The origin span and the member name both drop the leading dots.
    pub(crate) async fn self_ref(
        &self,
        uri: &str,
        content: &str,
        position: Position,
        line_text: &str,
    ) -> Option<Vec<LocationLink>> {
        let (start, matched) = word_range_at(line_text, position.character, &SELF_REF)?;
        let member = &matched[2..];
        let origin = Range::new(
            Position::new(position.line, (start + 2) as u32),
            Position::new(position.line, (start + matched.len()) as u32),
        );

        let doc_name = documents::current_doc_name(uri, content);
        let owner = doc_name.strip_suffix(".cls").unwrap_or(&doc_name);
        Some(self.member_links(owner, member, Some(origin)).await)
    }

    /// Remote member lookup, mapped into links. Transport faults and
    /// malformed rows degrade to an empty result.
    async fn member_links(
        &self,
        class_name: &str,
        member: &str,
        origin: Option<Range>,
    ) -> Vec<LocationLink> {
        let rows = match self.query.member_locations(class_name, member).await {
            Ok(rows) => rows,
            Err(err) => {
                debug!(class_name, member, %err, "member lookup failed");
                return Vec::new();
            }
        };

        rows.into_iter()
            .filter_map(|row| {
                let target_uri = Url::parse(&row.uri).ok()?;
                let target = Position::new(row.line, row.character);
                let target_range = Range::new(target, target);
                Some(LocationLink {
                    origin_selection_range: origin,
                    target_uri,
                    target_range,
                    target_selection_range: target_range,
                })
            })
            .collect()
    }
}
