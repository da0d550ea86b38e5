//! Server configuration received from the client.
//!
//! Clients pass settings through `initializationOptions`, e.g.
//! `{ "namespace": "USER" }`. Missing or malformed options fall back to
//! defaults; configuration must never prevent the server from starting.

use serde::Deserialize;

/// Settings accepted in `initializationOptions`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Active server namespace, carried on target URIs as `?ns=`.
    pub namespace: Option<String>,
}

impl Config {
    pub fn from_initialization_options(value: Option<serde_json::Value>) -> Self {
        value
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default()
    }
}
