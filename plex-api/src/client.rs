use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use command_client::{CommandClient, Pair};
use tracing::debug;
use xmltree::Element;

use crate::error::{ApiError, Result};
use crate::operation::PlayerOperation;
use crate::rpc::RpcOperation;
use crate::target::Target;

/// A client for executing player operations
///
/// Bridges the stateless operation definitions and the HTTP command client.
/// Clones share the JSON-RPC request id counter.
///
/// ```rust,no_run
/// use plex_api::{Playback, PlaybackOperation, PlexClient, Target};
///
/// let client = PlexClient::new();
/// let target = Target::direct("192.168.1.20", 3005);
/// client.execute::<PlaybackOperation>(&target, &Playback::Pause)?;
/// # Ok::<(), plex_api::ApiError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PlexClient {
    commands: CommandClient,
    rpc_ids: Arc<AtomicU64>,
}

impl PlexClient {
    pub fn new() -> Self {
        Self::with_command_client(CommandClient::new())
    }

    /// Create a client with a custom command client (for timeouts)
    pub fn with_command_client(commands: CommandClient) -> Self {
        Self {
            commands,
            rpc_ids: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Execute a player operation against a target
    ///
    /// # Returns
    /// The parsed response data or an error
    pub fn execute<Op: PlayerOperation>(&self, target: &Target, request: &Op::Request) -> Result<Op::Response> {
        debug!(operation = Op::NAME, "Sending player command");
        let xml = self.query(target, Op::path(request), &Op::build_query(request))?;
        Op::parse_response(xml.as_ref())
    }

    /// Send a raw `GET` for `path` to a target
    ///
    /// # Returns
    /// The parsed XML body, `None` when the reply was empty
    pub fn query(&self, target: &Target, path: &str, query: &[Pair]) -> Result<Option<Element>> {
        let url = target.url(path);
        let headers = target.headers();

        let xml = if target.is_lenient() {
            self.commands.get_lenient(&url, query, &headers)?
        } else {
            self.commands.get(&url, query, &headers)?
        };
        Ok(xml)
    }

    /// Call a JSON-RPC method on a directly addressed player
    ///
    /// # Errors
    /// `InvalidParameter` when the target has no JSON-RPC endpoint.
    pub fn call<Op: RpcOperation>(&self, target: &Target, operation: &Op) -> Result<Op::Response> {
        let base_url = target.rpc_base().ok_or_else(|| {
            ApiError::InvalidParameter(format!("{} requires a directly addressed player", Op::METHOD))
        })?;
        let id = self.rpc_ids.fetch_add(1, Ordering::SeqCst);

        debug!(method = Op::METHOD, id, "Sending JSON-RPC call");

        let result = self.commands.rpc(&base_url, Op::METHOD, operation.params(), id)?;
        Op::parse_result(result)
    }
}

impl Default for PlexClient {
    fn default() -> Self {
        Self::new()
    }
}
