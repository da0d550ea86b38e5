//! Data types used throughout the OScriptLSP server.
//!
//! These are the row models for Atelier query responses. The transport
//! lives outside this crate; rows arrive as JSON, hence the serde derives.

use serde::Deserialize;

/// One row of a macro-location query response.
#[derive(Debug, Clone, Deserialize)]
pub struct MacroLocation {
    /// Canonical name of the document holding the definition
    /// (e.g. "MyMacros.inc"). Empty when the server found nothing.
    pub document: String,
    /// 0-based line of the `#define` inside that document.
    pub line: u32,
}

/// One row of a member-location query response.
#[derive(Debug, Clone, Deserialize)]
pub struct MemberLocation {
    /// Target document URI, already addressable by the editor.
    pub uri: String,
    /// 0-based line of the member declaration.
    pub line: u32,
    /// 0-based column of the member declaration.
    pub character: u32,
}
