//! Signed-in account parsing.

use serde::Deserialize;

use crate::error::{DiscoveryError, Result};

/// The account returned by a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    #[serde(rename = "@id")]
    pub id: Option<String>,
    #[serde(rename = "@email")]
    pub email: Option<String>,
    #[serde(rename = "@username")]
    pub username: Option<String>,
    #[serde(rename = "@title")]
    pub title: Option<String>,
    #[serde(rename = "@thumb")]
    pub thumb: Option<String>,
    #[serde(rename = "@cloudSyncDevice")]
    pub cloud_sync_device: Option<String>,
    /// Token presented to the account service and owned servers
    #[serde(rename = "@authenticationToken")]
    pub authentication_token: String,
    #[serde(rename = "@queueEmail")]
    pub queue_email: Option<String>,
    #[serde(rename = "@queueUid")]
    pub queue_uid: Option<String>,
}

impl User {
    /// Parse the `user` document returned by `users/sign_in.xml`.
    pub fn from_xml(xml: &str) -> Result<Self> {
        quick_xml::de::from_str(xml)
            .map_err(|e| DiscoveryError::ParseError(format!("Failed to parse user XML: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_from_xml() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<user email="jane@example.com" id="1234" thumb="https://plex.tv/users/abc/avatar" username="jane" title="jane" cloudSyncDevice="" authenticationToken="tok-123" queueEmail="queue@example.com" queueUid="q-1">
  <subscription active="1" status="Active" plan="lifetime"/>
  <authentication-token>tok-123</authentication-token>
</user>"#;

        let user = User::from_xml(xml).unwrap();
        assert_eq!(user.username.as_deref(), Some("jane"));
        assert_eq!(user.id.as_deref(), Some("1234"));
        assert_eq!(user.authentication_token, "tok-123");
        assert_eq!(user.queue_uid.as_deref(), Some("q-1"));
    }

    #[test]
    fn test_user_without_token_is_parse_error() {
        let xml = r#"<user email="jane@example.com" username="jane"/>"#;
        assert!(matches!(User::from_xml(xml), Err(DiscoveryError::ParseError(_))));
    }
}
