//! Operation framework for player commands
//!
//! Every command a player understands is an HTTP `GET` against a path under
//! `/player/`, with its arguments in the query string. An operation type
//! describes one such command: where it goes, what it sends and how its
//! reply is read. Execution and routing live in [`crate::PlexClient`] and
//! [`crate::Target`].

pub mod macros;

use command_client::Pair;
use xmltree::Element;

use crate::error::Result;

/// Base trait for player operations
pub trait PlayerOperation {
    /// Typed request data
    type Request;

    /// Typed response data
    type Response;

    /// Operation name, used in logs
    const NAME: &'static str;

    /// Command path relative to the player root, e.g. `playback/play`
    fn path(request: &Self::Request) -> &'static str;

    /// Query parameters for the request
    fn build_query(request: &Self::Request) -> Vec<Pair>;

    /// Parse the reply body; `None` when the reply was empty
    fn parse_response(xml: Option<&Element>) -> Result<Self::Response>;
}

/// Build a query pair from anything displayable
pub(crate) fn pair(name: &str, value: impl ToString) -> Pair {
    (name.to_string(), value.to_string())
}
