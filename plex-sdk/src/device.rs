//! Registered device handle

use plex_api::{Element, Navigation, NavigationOperation, Pair, Playback, PlaybackOperation, PlexClient, Target};
use plex_discovery::RegisteredDevice;
use tracing::info;

use crate::error::{Result, SdkError};
use crate::remote::remote_control_methods;

/// Commands a device registered with the account, through its first
/// connection URI
#[derive(Debug, Clone)]
pub struct DeviceHandle {
    device: RegisteredDevice,
    target: Target,
    client: PlexClient,
}

impl DeviceHandle {
    /// Build a handle; the device's own token wins over `account_token`
    ///
    /// # Errors
    /// The device advertises no connection URI or no client identifier.
    pub fn new(device: RegisteredDevice, account_token: &str) -> Result<Self> {
        let base_url = device.base_url()?.to_string();
        let client_identifier = device
            .client_identifier
            .clone()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| SdkError::DeviceNotAddressable(device.name.clone()))?;
        let token = device
            .token
            .clone()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| account_token.to_string());

        Ok(Self {
            target: Target::device(base_url, client_identifier, token),
            device,
            client: PlexClient::new(),
        })
    }

    pub fn with_client(mut self, client: PlexClient) -> Self {
        self.client = client;
        self
    }

    pub fn device(&self) -> &RegisteredDevice {
        &self.device
    }

    pub fn name(&self) -> &str {
        &self.device.name
    }

    /// Send a raw command; non-XML replies come back as `None`
    pub fn send(&self, path: &str, params: &[Pair]) -> Result<Option<Element>> {
        Ok(self.client.query(&self.target, path, params)?)
    }

    pub fn navigation(&self, command: Navigation) -> Result<()> {
        info!(device = %self.device.name, "{}", command);
        Ok(self.client.execute::<NavigationOperation>(&self.target, &command)?)
    }

    pub fn playback(&self, command: Playback) -> Result<()> {
        info!(device = %self.device.name, "{}", command);
        Ok(self.client.execute::<PlaybackOperation>(&self.target, &command)?)
    }

    remote_control_methods!();
}
