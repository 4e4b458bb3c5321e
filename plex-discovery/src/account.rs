//! Account service client.
//!
//! Signs in, then lists the resources and registered devices available to the
//! account. Every request carries its own header list built from the client
//! identity and the token of that call.

use reqwest::StatusCode;
use tracing::info;

use crate::config::DirectoryConfig;
use crate::device::{parse_devices, RegisteredDevice};
use crate::error::{DiscoveryError, Result};
use crate::resource::{parse_resources, Resource};
use crate::user::User;

/// Sign-in endpoint, relative to the service base URL
pub const SIGN_IN_PATH: &str = "users/sign_in.xml";
/// Resource listing endpoint; `includeHttps` asks for TLS host names in `uri`
pub const RESOURCES_PATH: &str = "api/resources?includeHttps=1";
/// Registered device listing endpoint
pub const DEVICES_PATH: &str = "devices.xml";

/// Client for the account service.
#[derive(Debug, Clone)]
pub struct AccountClient {
    http: reqwest::Client,
    config: DirectoryConfig,
}

impl AccountClient {
    /// Create a client for the given configuration
    pub fn new(config: DirectoryConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DiscoveryError::NetworkError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// The configuration this client was built with
    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    /// Sign in with username and password
    ///
    /// # Errors
    ///
    /// `Unauthorized` on HTTP 401, `BadRequest` on any status other than 201.
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<User> {
        let url = self.config.url(SIGN_IN_PATH);
        info!("POST {}", url);

        let response = self
            .request(reqwest::Method::POST, &url, None)
            .basic_auth(username, Some(password))
            .send()
            .await
            .map_err(|e| DiscoveryError::NetworkError(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::CREATED {
            return Err(status_error(status));
        }

        let body = response
            .text()
            .await
            .map_err(|e| DiscoveryError::NetworkError(format!("Failed to read response body: {}", e)))?;
        User::from_xml(&body)
    }

    /// List the resources (servers and players) available to `token`
    pub async fn resources(&self, token: &str) -> Result<Vec<Resource>> {
        let body = self.fetch(RESOURCES_PATH, token).await?;
        parse_resources(&body)
    }

    /// List the devices registered to `token`'s account
    pub async fn devices(&self, token: &str) -> Result<Vec<RegisteredDevice>> {
        let body = self.fetch(DEVICES_PATH, token).await?;
        parse_devices(&body)
    }

    async fn fetch(&self, path: &str, token: &str) -> Result<String> {
        let url = self.config.url(path);
        info!("GET {}", url);

        let response = self
            .request(reqwest::Method::GET, &url, Some(token))
            .send()
            .await
            .map_err(|e| DiscoveryError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status));
        }

        response
            .text()
            .await
            .map_err(|e| DiscoveryError::NetworkError(format!("Failed to read response body: {}", e)))
    }

    fn request(&self, method: reqwest::Method, url: &str, token: Option<&str>) -> reqwest::RequestBuilder {
        let mut builder = self.http.request(method, url);
        for (name, value) in self.config.identity.headers() {
            builder = builder.header(name, value);
        }
        if let Some(token) = token {
            builder = builder.header("X-Plex-Token", token);
        }
        builder
    }
}

fn status_error(status: StatusCode) -> DiscoveryError {
    let reason = status.canonical_reason().unwrap_or("Unknown").to_string();
    if status == StatusCode::UNAUTHORIZED {
        DiscoveryError::Unauthorized(format!("({}) {}", status.as_u16(), reason))
    } else {
        DiscoveryError::BadRequest {
            status: status.as_u16(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_mapping() {
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED),
            DiscoveryError::Unauthorized(_)
        ));
        match status_error(StatusCode::SERVICE_UNAVAILABLE) {
            DiscoveryError::BadRequest { status, reason } => {
                assert_eq!(status, 503);
                assert_eq!(reason, "Service Unavailable");
            }
            other => panic!("Expected BadRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_client_creation() {
        let client = AccountClient::new(DirectoryConfig::default()).unwrap();
        assert_eq!(client.config().base_url, crate::config::DEFAULT_BASE_URL);
    }
}
