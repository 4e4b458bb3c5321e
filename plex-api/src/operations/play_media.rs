//! Start playback of a server play queue on a player

use command_client::Pair;
use xmltree::Element;

use crate::error::Result;
use crate::operation::{pair, PlayerOperation};

/// Window of play queue items the player fetches at once
pub const PLAY_QUEUE_WINDOW: u32 = 100;

/// Play a queue created on the server identified by `machine_identifier`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayMedia {
    /// Server the queue and media live on
    pub machine_identifier: String,
    pub play_queue_id: u64,
    /// Media key, e.g. `/library/metadata/1234`
    pub key: String,
    /// Start offset in milliseconds
    pub offset: u64,
}

impl PlayMedia {
    pub fn new(machine_identifier: impl Into<String>, play_queue_id: u64, key: impl Into<String>) -> Self {
        Self {
            machine_identifier: machine_identifier.into(),
            play_queue_id,
            key: key.into(),
            offset: 0,
        }
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    /// Container key of the play queue, as the player expects it
    pub fn container_key(&self) -> String {
        format!("/playQueues/{}?window={}&own=1", self.play_queue_id, PLAY_QUEUE_WINDOW)
    }
}

pub struct PlayMediaOperation;

impl PlayerOperation for PlayMediaOperation {
    type Request = PlayMedia;
    type Response = ();

    const NAME: &'static str = "PlayMedia";

    fn path(_request: &PlayMedia) -> &'static str {
        "playback/playMedia"
    }

    fn build_query(request: &PlayMedia) -> Vec<Pair> {
        vec![
            pair("machineIdentifier", &request.machine_identifier),
            pair("containerKey", request.container_key()),
            pair("key", &request.key),
            pair("offset", request.offset),
        ]
    }

    fn parse_response(_xml: Option<&Element>) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_media_query() {
        let request = PlayMedia::new("abc123", 42, "/library/metadata/7");
        let query = PlayMediaOperation::build_query(&request);

        assert_eq!(
            query,
            vec![
                ("machineIdentifier".to_string(), "abc123".to_string()),
                ("containerKey".to_string(), "/playQueues/42?window=100&own=1".to_string()),
                ("key".to_string(), "/library/metadata/7".to_string()),
                ("offset".to_string(), "0".to_string()),
            ]
        );
        assert_eq!(PlayMediaOperation::path(&request), "playback/playMedia");
    }

    #[test]
    fn test_offset() {
        let request = PlayMedia::new("abc123", 42, "/library/metadata/7").with_offset(90_000);
        assert!(PlayMediaOperation::build_query(&request).contains(&("offset".to_string(), "90000".to_string())));
    }
}
