//! Position and word-range helpers.
use regex::Regex;
use tower_lsp::lsp_types::MessageType;

use crate::Backend;

/// The text of `line` within `content`, or `None` past the last line.
pub(crate) fn line_at(content: &str, line: u32) -> Option<&str> {
    content.lines().nth(line as usize)
}

/// The regex match on `line` whose range contains `character`, inclusive
/// of the end column (a caret sitting just past the last character still
/// selects the word).
///
/// Columns are byte offsets. ObjectScript identifiers and directives are
/// ASCII, so this lines up with the LSP's UTF-16 columns for all the text
/// these matchers inspect.
pub(crate) fn word_range_at<'a>(
    line: &'a str,
    character: u32,
    pattern: &Regex,
) -> Option<(usize, &'a str)> {
    let character = character as usize;
    pattern
        .find_iter(line)
        .find(|m| character >= m.start() && character <= m.end())
        .map(|m| (m.start(), m.as_str()))
}

impl Backend {
    pub(crate) async fn log(&self, typ: MessageType, message: String) {
        if let Some(client) = &self.client {
            client.log_message(typ, message).await;
        }
    }
}
