//! Show a media item's detail screen on a player

use command_client::Pair;
use xmltree::Element;

use crate::error::Result;
use crate::operation::{pair, PlayerOperation};

/// Command id players expect on mirror requests
pub const MIRROR_COMMAND_ID: u32 = 2;

/// Navigate the player to the details of `key` on the given server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorDetails {
    pub key: String,
    pub machine_identifier: String,
    /// Server host the player fetches the details from
    pub address: String,
    pub port: u16,
}

pub struct MirrorDetailsOperation;

impl PlayerOperation for MirrorDetailsOperation {
    type Request = MirrorDetails;
    type Response = ();

    const NAME: &'static str = "MirrorDetails";

    fn path(_request: &MirrorDetails) -> &'static str {
        "mirror/details"
    }

    fn build_query(request: &MirrorDetails) -> Vec<Pair> {
        vec![
            pair("type", "video"),
            pair("key", &request.key),
            pair("machineIdentifier", &request.machine_identifier),
            pair("protocol", "http"),
            pair("address", &request.address),
            pair("port", request.port),
            pair("commandID", MIRROR_COMMAND_ID),
        ]
    }

    fn parse_response(_xml: Option<&Element>) -> Result<()> {
        Ok(())
    }
}
