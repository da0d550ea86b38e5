//! Seam to the Atelier query API.
//!
//! The resolver consults the server in exactly two situations it cannot
//! settle from document text alone: locating a member declared on another
//! class (or inherited from a superclass), and locating a macro defined
//! outside the current document. Transport belongs to the embedder; this
//! module only fixes the request and response shapes.

use thiserror::Error;

use crate::types::{MacroLocation, MemberLocation};

/// Failure at the remote boundary.
///
/// Callers convert these into "no definition found"; a transport fault
/// must never surface as an error from a navigation request.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("query transport failed: {0}")]
    Transport(String),
    #[error("malformed query response: {0}")]
    Response(String),
}

#[tower_lsp::async_trait]
pub trait QueryService: Send + Sync {
    /// Locate the definition of `macro_name`, searching `document` and the
    /// given include files server-side.
    async fn macro_location(
        &self,
        document: &str,
        macro_name: &str,
        includes: &[String],
    ) -> Result<Option<MacroLocation>, QueryError>;

    /// Locate `member` on `class_name`, walking the inheritance chain
    /// server-side. An empty list means the member is unknown.
    async fn member_locations(
        &self,
        class_name: &str,
        member: &str,
    ) -> Result<Vec<MemberLocation>, QueryError>;
}

/// Query service for running without a server connection: every lookup
/// comes back empty, so navigation degrades to same-document targets.
pub struct NullQueryService;

#[tower_lsp::async_trait]
impl QueryService for NullQueryService {
    async fn macro_location(
        &self,
        _document: &str,
        _macro_name: &str,
        _includes: &[String],
    ) -> Result<Option<MacroLocation>, QueryError> {
        Ok(None)
    }

    async fn member_locations(
        &self,
        _class_name: &str,
        _member: &str,
    ) -> Result<Vec<MemberLocation>, QueryError> {
        Ok(Vec::new())
    }
}
