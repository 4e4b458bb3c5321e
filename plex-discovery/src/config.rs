//! Client identification and directory configuration.

use std::time::Duration;

/// Default account service location
pub const DEFAULT_BASE_URL: &str = "https://plex.tv";

/// How this client identifies itself to the account service and to servers.
///
/// Every request builds its own header list from this value; nothing is
/// shared or mutated between requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIdentity {
    /// Product name (`X-Plex-Product`)
    pub product: String,
    /// Product version (`X-Plex-Version`)
    pub version: String,
    /// Stable identifier of this client installation (`X-Plex-Client-Identifier`)
    pub client_identifier: String,
    /// Operating system (`X-Plex-Platform`)
    pub platform: String,
    /// Device name shown in the account's device list (`X-Plex-Device-Name`)
    pub device_name: String,
}

impl Default for ClientIdentity {
    fn default() -> Self {
        Self {
            product: "plex-sdk".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            client_identifier: uuid::Uuid::new_v4().to_string(),
            platform: std::env::consts::OS.to_string(),
            device_name: "plex-sdk".to_string(),
        }
    }
}

impl ClientIdentity {
    /// Create an identity with a fixed client identifier
    pub fn with_client_identifier(client_identifier: impl Into<String>) -> Self {
        Self {
            client_identifier: client_identifier.into(),
            ..Default::default()
        }
    }

    /// Identification headers sent with every request
    pub fn headers(&self) -> Vec<(String, String)> {
        vec![
            ("X-Plex-Product".to_string(), self.product.clone()),
            ("X-Plex-Version".to_string(), self.version.clone()),
            ("X-Plex-Client-Identifier".to_string(), self.client_identifier.clone()),
            ("X-Plex-Platform".to_string(), self.platform.clone()),
            ("X-Plex-Device-Name".to_string(), self.device_name.clone()),
            ("X-Plex-Provides".to_string(), "controller".to_string()),
        ]
    }
}

/// Configuration for the account service client
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    /// Base URL of the account service
    /// Default: https://plex.tv
    pub base_url: String,

    /// Timeout applied to every directory request
    /// Default: 30 seconds
    pub timeout: Duration,

    /// Identification headers
    pub identity: ClientIdentity,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            identity: ClientIdentity::default(),
        }
    }
}

impl DirectoryConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the client at a different account service (mirrors, tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the client identity
    pub fn with_identity(mut self, identity: ClientIdentity) -> Self {
        self.identity = identity;
        self
    }

    /// Join a service path onto the base URL
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let config = DirectoryConfig::new().with_base_url("http://127.0.0.1:8080/");
        assert_eq!(config.url("/devices.xml"), "http://127.0.0.1:8080/devices.xml");
        assert_eq!(
            config.url("api/resources?includeHttps=1"),
            "http://127.0.0.1:8080/api/resources?includeHttps=1"
        );
    }

    #[test]
    fn test_identity_headers() {
        let identity = ClientIdentity::with_client_identifier("fixed-id");
        let headers = identity.headers();

        assert!(headers.contains(&("X-Plex-Client-Identifier".to_string(), "fixed-id".to_string())));
        assert!(headers.iter().any(|(name, _)| name == "X-Plex-Product"));
        assert!(!headers.iter().any(|(name, _)| name == "X-Plex-Token"));
    }

    #[test]
    fn test_default_identifiers_are_unique() {
        assert_ne!(
            ClientIdentity::default().client_identifier,
            ClientIdentity::default().client_identifier
        );
    }
}
