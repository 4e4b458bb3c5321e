//! Registered device listing parsing.
//!
//! `devices.xml` lists every device that ever signed in to the account,
//! including players that can be commanded through their published URIs.

use serde::Deserialize;

use crate::error::{DiscoveryError, Result};

/// A device registered to the account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredDevice {
    pub name: String,
    pub id: Option<String>,
    pub public_address: Option<String>,
    pub product: Option<String>,
    pub product_version: Option<String>,
    pub platform: Option<String>,
    pub platform_version: Option<String>,
    pub device: Option<String>,
    pub model: Option<String>,
    pub vendor: Option<String>,
    pub provides: Vec<String>,
    pub client_identifier: Option<String>,
    pub version: Option<String>,
    pub token: Option<String>,
    pub screen_resolution: Option<String>,
    pub screen_density: Option<String>,
    pub connection_uris: Vec<String>,
}

impl RegisteredDevice {
    /// Whether at least one connection URI is published
    pub fn is_reachable(&self) -> bool {
        !self.connection_uris.is_empty()
    }

    /// Base URL commands are sent to (the first published connection)
    ///
    /// # Errors
    ///
    /// Returns `DiscoveryError::Unreachable` when the device publishes no URI.
    pub fn base_url(&self) -> Result<&str> {
        self.connection_uris
            .first()
            .map(|uri| uri.trim_end_matches('/'))
            .ok_or_else(|| DiscoveryError::Unreachable(self.name.clone()))
    }
}

#[derive(Debug, Deserialize)]
struct MediaContainer {
    #[serde(rename = "Device", default)]
    devices: Vec<DeviceXml>,
}

#[derive(Debug, Deserialize)]
struct DeviceXml {
    #[serde(rename = "@name")]
    name: Option<String>,
    #[serde(rename = "@id")]
    id: Option<String>,
    #[serde(rename = "@publicAddress")]
    public_address: Option<String>,
    #[serde(rename = "@product")]
    product: Option<String>,
    #[serde(rename = "@productVersion")]
    product_version: Option<String>,
    #[serde(rename = "@platform")]
    platform: Option<String>,
    #[serde(rename = "@platformVersion")]
    platform_version: Option<String>,
    #[serde(rename = "@device")]
    device: Option<String>,
    #[serde(rename = "@model")]
    model: Option<String>,
    #[serde(rename = "@vendor")]
    vendor: Option<String>,
    #[serde(rename = "@provides")]
    provides: Option<String>,
    #[serde(rename = "@clientIdentifier")]
    client_identifier: Option<String>,
    #[serde(rename = "@version")]
    version: Option<String>,
    #[serde(rename = "@token")]
    token: Option<String>,
    #[serde(rename = "@screenResolution")]
    screen_resolution: Option<String>,
    #[serde(rename = "@screenDensity")]
    screen_density: Option<String>,
    #[serde(rename = "Connection", default)]
    connections: Vec<DeviceConnectionXml>,
}

#[derive(Debug, Deserialize)]
struct DeviceConnectionXml {
    #[serde(rename = "@uri")]
    uri: Option<String>,
}

/// Parse a `devices.xml` listing.
pub fn parse_devices(xml: &str) -> Result<Vec<RegisteredDevice>> {
    let container: MediaContainer = quick_xml::de::from_str(xml)
        .map_err(|e| DiscoveryError::ParseError(format!("Failed to parse devices XML: {}", e)))?;

    Ok(container
        .devices
        .into_iter()
        .map(|d| RegisteredDevice {
            name: d.name.unwrap_or_default(),
            id: d.id,
            public_address: d.public_address,
            product: d.product,
            product_version: d.product_version,
            platform: d.platform,
            platform_version: d.platform_version,
            device: d.device,
            model: d.model,
            vendor: d.vendor,
            provides: d
                .provides
                .map(|p| {
                    p.split(',')
                        .map(str::trim)
                        .filter(|c| !c.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
            client_identifier: d.client_identifier,
            version: d.version,
            token: d.token,
            screen_resolution: d.screen_resolution,
            screen_density: d.screen_density,
            connection_uris: d.connections.into_iter().filter_map(|c| c.uri).collect(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_devices() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<MediaContainer publicAddress="203.0.113.7">
  <Device name="Living Room TV" publicAddress="203.0.113.7" product="Plex for Android" productVersion="9.0" platform="Android" model="bravia" vendor="Sony" provides="player,controller" clientIdentifier="tv-1" version="9.0" id="42" token="device-token">
    <Connection uri="http://192.168.1.20:32500"/>
    <Connection uri="http://203.0.113.7:32500"/>
  </Device>
  <Device name="Phone" provides="" clientIdentifier="phone-1"/>
</MediaContainer>"#;

        let devices = parse_devices(xml).unwrap();
        assert_eq!(devices.len(), 2);

        let tv = &devices[0];
        assert_eq!(tv.name, "Living Room TV");
        assert_eq!(tv.provides, vec!["player".to_string(), "controller".to_string()]);
        assert_eq!(tv.client_identifier.as_deref(), Some("tv-1"));
        assert_eq!(tv.connection_uris.len(), 2);
        assert!(tv.is_reachable());
        assert_eq!(tv.base_url().unwrap(), "http://192.168.1.20:32500");

        let phone = &devices[1];
        assert!(phone.provides.is_empty());
        assert!(!phone.is_reachable());
        assert!(matches!(phone.base_url(), Err(DiscoveryError::Unreachable(_))));
    }
}
