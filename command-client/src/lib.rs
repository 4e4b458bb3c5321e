//! Private HTTP command client for Plex player communication
//!
//! This crate provides the thin transport used by `plex-api`: plain HTTP GET
//! commands that answer with an (optional) XML body, and the JSON-RPC dialect
//! some players expose on `/jsonrpc`.

mod error;

pub use error::CommandError;

use std::time::Duration;

use serde_json::{json, Value};
use tracing::{debug, info};
use xmltree::Element;

/// JSON-RPC protocol version sent in every envelope
pub const JSON_RPC_VERSION: &str = "2.0";

/// A header or query pair, in the order it should be sent
pub type Pair = (String, String);

/// A minimal HTTP client for player commands
#[derive(Debug, Clone)]
pub struct CommandClient {
    agent: ureq::Agent,
}

impl CommandClient {
    /// Create a new command client with default configuration
    pub fn new() -> Self {
        Self::with_timeouts(Duration::from_secs(5), Duration::from_secs(10))
    }

    /// Create a command client with custom connect and read timeouts
    pub fn with_timeouts(connect: Duration, read: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .timeout_connect(connect)
                .timeout_read(read)
                .build(),
        }
    }

    /// Send a GET command and return the parsed XML body, if any
    ///
    /// # Arguments
    /// * `url` - Fully formed command URL (without query string)
    /// * `query` - Query parameters, URL-encoded on the wire
    /// * `headers` - Extra request headers
    ///
    /// # Returns
    /// `None` when the player answered 200 with an empty body
    pub fn get(&self, url: &str, query: &[Pair], headers: &[Pair]) -> Result<Option<Element>, CommandError> {
        let text = self.send(url, query, headers)?;
        parse_body(&text)
    }

    /// Send a GET command, tolerating a body that is not XML
    ///
    /// Registered devices frequently answer commands with plain text; those
    /// bodies are dropped instead of failing the command.
    pub fn get_lenient(&self, url: &str, query: &[Pair], headers: &[Pair]) -> Result<Option<Element>, CommandError> {
        let text = self.send(url, query, headers)?;
        Ok(parse_body(&text).unwrap_or_else(|e| {
            debug!("Ignoring unparseable command response from {}: {}", url, e);
            None
        }))
    }

    /// Send a JSON-RPC request to a player
    ///
    /// The envelope travels URL-encoded in the `request` query parameter of
    /// `GET {base_url}/jsonrpc`.
    ///
    /// # Returns
    /// The `result` member of the reply (`Value::Null` when absent)
    pub fn rpc(&self, base_url: &str, method: &str, params: Option<Value>, id: u64) -> Result<Value, CommandError> {
        let envelope = build_envelope(method, params, id);
        let url = format!("{}/jsonrpc", base_url.trim_end_matches('/'));
        info!("GET {} ({} #{})", url, method, id);

        let response = self
            .agent
            .get(&url)
            .set("content-type", "application/json")
            .query("request", &envelope.to_string())
            .call()
            .map_err(map_ureq_error)?;

        let reply: Value = response
            .into_json()
            .map_err(|e| CommandError::Parse(e.to_string()))?;

        extract_result(reply)
    }

    fn send(&self, url: &str, query: &[Pair], headers: &[Pair]) -> Result<String, CommandError> {
        info!("GET {}", url);
        let mut request = self.agent.get(url);
        for (name, value) in headers {
            request = request.set(name, value);
        }
        for (name, value) in query {
            request = request.query(name, value);
        }

        let response = request.call().map_err(map_ureq_error)?;
        if response.status() != 200 {
            return Err(CommandError::Http {
                status: response.status(),
                reason: response.status_text().to_string(),
            });
        }

        response
            .into_string()
            .map_err(|e| CommandError::Network(e.to_string()))
    }
}

impl Default for CommandClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the JSON-RPC envelope for a method call
///
/// `params` is omitted from the envelope entirely when `None`.
pub fn build_envelope(method: &str, params: Option<Value>, id: u64) -> Value {
    let mut envelope = json!({
        "jsonrpc": JSON_RPC_VERSION,
        "method": method,
        "id": id,
    });
    if let (Some(params), Some(map)) = (params, envelope.as_object_mut()) {
        map.insert("params".to_string(), params);
    }
    envelope
}

fn parse_body(text: &str) -> Result<Option<Element>, CommandError> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    Element::parse(text.as_bytes())
        .map(Some)
        .map_err(|e| CommandError::Parse(e.to_string()))
}

fn extract_result(reply: Value) -> Result<Value, CommandError> {
    if let Some(error) = reply.get("error") {
        return Err(CommandError::Rpc {
            code: error.get("code").and_then(Value::as_i64).unwrap_or(-1),
            message: error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_string(),
        });
    }
    Ok(reply.get("result").cloned().unwrap_or(Value::Null))
}

fn map_ureq_error(error: ureq::Error) -> CommandError {
    match error {
        ureq::Error::Status(status, response) => CommandError::Http {
            status,
            reason: response.status_text().to_string(),
        },
        ureq::Error::Transport(transport) => CommandError::Network(transport.to_string()),
    }
}
