//! Poll a player's timeline

use command_client::Pair;
use xmltree::Element;

use crate::error::Result;
use crate::operation::{pair, PlayerOperation};

/// Command id used for timeline polls
pub const TIMELINE_COMMAND_ID: u32 = 4;

/// Timeline poll request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeline {
    /// Ask the target to hold the request until something changes
    pub wait: bool,
}

impl Default for Timeline {
    fn default() -> Self {
        Self { wait: true }
    }
}

/// One media type's entry in a timeline reply
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimelineEntry {
    /// `video`, `music` or `photo`
    pub media_type: Option<String>,
    /// `playing`, `paused`, `stopped` or `buffering`
    pub state: Option<String>,
    pub key: Option<String>,
    pub time: Option<u64>,
    pub duration: Option<u64>,
    pub machine_identifier: Option<String>,
}

impl TimelineEntry {
    fn from_element(element: &Element) -> Self {
        let attr = |name: &str| element.attributes.get(name).cloned();
        Self {
            media_type: attr("type"),
            state: attr("state"),
            key: attr("key"),
            time: attr("time").and_then(|v| v.parse().ok()),
            duration: attr("duration").and_then(|v| v.parse().ok()),
            machine_identifier: attr("machineIdentifier"),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.state.as_deref() == Some("playing")
    }
}

/// Whether any entry reports playing media
pub fn is_playing(entries: &[TimelineEntry]) -> bool {
    entries.iter().any(TimelineEntry::is_playing)
}

pub struct TimelineOperation;

impl PlayerOperation for TimelineOperation {
    type Request = Timeline;
    type Response = Vec<TimelineEntry>;

    const NAME: &'static str = "Timeline";

    fn path(_request: &Timeline) -> &'static str {
        "timeline/poll"
    }

    fn build_query(request: &Timeline) -> Vec<Pair> {
        vec![
            pair("wait", u8::from(request.wait)),
            pair("commandID", TIMELINE_COMMAND_ID),
        ]
    }

    fn parse_response(xml: Option<&Element>) -> Result<Vec<TimelineEntry>> {
        let Some(container) = xml else {
            return Ok(Vec::new());
        };

        Ok(container
            .children
            .iter()
            .filter_map(|node| node.as_element())
            .map(TimelineEntry::from_element)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POLL: &str = r#"<MediaContainer commandID="4" location="fullScreenVideo">
  <Timeline type="music" state="stopped" />
  <Timeline type="photo" state="stopped" />
  <Timeline type="video" state="playing" key="/library/metadata/7" time="61000" duration="5400000" machineIdentifier="abc123" />
</MediaContainer>"#;

    #[test]
    fn test_timeline_query() {
        let query = TimelineOperation::build_query(&Timeline::default());
        assert_eq!(
            query,
            vec![
                ("wait".to_string(), "1".to_string()),
                ("commandID".to_string(), "4".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_timeline() {
        let xml = Element::parse(POLL.as_bytes()).unwrap();
        let entries = TimelineOperation::parse_response(Some(&xml)).unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[2].media_type.as_deref(), Some("video"));
        assert_eq!(entries[2].time, Some(61000));
        assert!(is_playing(&entries));
    }

    #[test]
    fn test_nothing_playing() {
        let xml = Element::parse(r#"<MediaContainer><Timeline type="video" state="paused"/></MediaContainer>"#.as_bytes()).unwrap();
        let entries = TimelineOperation::parse_response(Some(&xml)).unwrap();
        assert!(!is_playing(&entries));
        assert!(TimelineOperation::parse_response(None).unwrap().is_empty());
    }
}
