//! OScriptLSP: a lightweight language server for InterSystems ObjectScript.
//!
//! The server keeps no AST and no symbol index. Every go-to-definition
//! request re-scans the line under the cursor with a fixed sequence of
//! regex matchers (class references, self references, macros, superclass
//! and include directives) and falls back to the Atelier query API when
//! text inspection alone cannot name a target, as with macro expansion
//! and inherited member lookup.

pub mod atelier;
pub mod config;
mod definition;
pub mod documents;
mod server;
pub mod types;
mod util;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tower_lsp::Client;

use crate::atelier::{NullQueryService, QueryService};
use crate::config::Config;

pub struct Backend {
    name: String,
    version: String,
    /// Full text of every open document, keyed by URI.
    open_files: Arc<Mutex<HashMap<String, String>>>,
    /// Settings received in `initializationOptions`.
    config: Arc<Mutex<Config>>,
    /// Remote query service consulted when text inspection cannot name a
    /// target (macro expansion, inherited member lookup).
    query: Arc<dyn QueryService>,
    client: Option<Client>,
}

impl Backend {
    pub fn new(client: Client) -> Self {
        Self::with_service(Some(client), Arc::new(NullQueryService))
    }

    pub fn new_test() -> Self {
        Self::with_service(None, Arc::new(NullQueryService))
    }

    /// Test constructor with an injected query service, so integration
    /// tests can script the remote side.
    pub fn new_test_with_service(query: Arc<dyn QueryService>) -> Self {
        Self::with_service(None, query)
    }

    fn with_service(client: Option<Client>, query: Arc<dyn QueryService>) -> Self {
        Self {
            name: "OScriptLSP".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            open_files: Arc::new(Mutex::new(HashMap::new())),
            config: Arc::new(Mutex::new(Config::default())),
            query,
            client,
        }
    }

    /// Active namespace from the client configuration, if any.
    pub(crate) fn namespace(&self) -> Option<String> {
        self.config
            .lock()
            .ok()
            .and_then(|cfg| cfg.namespace.clone())
    }
}
