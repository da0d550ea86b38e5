#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use oscript_lsp::Backend;
use oscript_lsp::atelier::{QueryError, QueryService};
use oscript_lsp::types::{MacroLocation, MemberLocation};
use tower_lsp::LanguageServer;
use tower_lsp::lsp_types::*;

pub fn create_test_backend() -> Backend {
    Backend::new_test()
}

/// Scripted query service: hands back fixed rows and records every call
/// so tests can assert what reached the remote side.
pub struct StubQueryService {
    pub macro_response: Option<MacroLocation>,
    pub member_response: Vec<MemberLocation>,
    pub fail: bool,
    pub calls: Mutex<Vec<String>>,
}

impl StubQueryService {
    pub fn empty() -> Arc<Self> {
        Arc::new(Self {
            macro_response: None,
            member_response: Vec::new(),
            fail: false,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn with_macro(row: MacroLocation) -> Arc<Self> {
        Arc::new(Self {
            macro_response: Some(row),
            member_response: Vec::new(),
            fail: false,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn with_members(rows: Vec<MemberLocation>) -> Arc<Self> {
        Arc::new(Self {
            macro_response: None,
            member_response: rows,
            fail: false,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            macro_response: None,
            member_response: Vec::new(),
            fail: true,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn recorded_calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[tower_lsp::async_trait]
impl QueryService for StubQueryService {
    async fn macro_location(
        &self,
        document: &str,
        macro_name: &str,
        includes: &[String],
    ) -> Result<Option<MacroLocation>, QueryError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(format!("macro:{document}:{macro_name}:{}", includes.join("+")));
        }
        if self.fail {
            return Err(QueryError::Transport("connection refused".to_string()));
        }
        Ok(self.macro_response.clone())
    }

    async fn member_locations(
        &self,
        class_name: &str,
        member: &str,
    ) -> Result<Vec<MemberLocation>, QueryError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(format!("member:{class_name}:{member}"));
        }
        if self.fail {
            return Err(QueryError::Transport("connection refused".to_string()));
        }
        Ok(self.member_response.clone())
    }
}

/// Open `text` as a document on `backend` and return its URI.
pub async fn open_document(backend: &Backend, path: &str, text: &str) -> Url {
    let uri = Url::parse(path).expect("valid test uri");
    backend
        .did_open(DidOpenTextDocumentParams {
            text_document: TextDocumentItem {
                uri: uri.clone(),
                language_id: "objectscript".to_string(),
                version: 1,
                text: text.to_string(),
            },
        })
        .await;
    uri
}

/// Issue a goto-definition request at `(line, character)`.
pub async fn definition_at(
    backend: &Backend,
    uri: &Url,
    line: u32,
    character: u32,
) -> Option<GotoDefinitionResponse> {
    backend
        .goto_definition(GotoDefinitionParams {
            text_document_position_params: TextDocumentPositionParams {
                text_document: TextDocumentIdentifier { uri: uri.clone() },
                position: Position { line, character },
            },
            work_done_progress_params: WorkDoneProgressParams::default(),
            partial_result_params: PartialResultParams::default(),
        })
        .await
        .expect("goto_definition should not error")
}

/// Unwrap the Link variant of a definition response.
pub fn links(response: GotoDefinitionResponse) -> Vec<LocationLink> {
    match response {
        GotoDefinitionResponse::Link(links) => links,
        other => panic!("Expected Link response, got: {:?}", other),
    }
}
