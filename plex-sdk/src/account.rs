//! Account entry point: directory lookups and server connections

use std::fmt;

use plex_connect::{AddressForm, Endpoint, HttpProbe, ResolutionRequest, Resolver, ResolverConfig};
use plex_discovery::{find_resource, AccountClient, Connection, DirectoryConfig, RegisteredDevice, Resource, User};
use tracing::info;

use crate::device::DeviceHandle;
use crate::error::Result;
use crate::server::ServerSession;

/// A signed-in account
///
/// ```rust,no_run
/// use plex_sdk::{DirectoryConfig, PlexAccount};
///
/// # async fn run() -> plex_sdk::Result<()> {
/// let account = PlexAccount::sign_in(DirectoryConfig::default(), "jane", "secret").await?;
/// let resource = account.resource("Media Server").await?;
/// let session = account.connect(&resource, None).await?;
/// for player in session.clients()? {
///     println!("{}", player.name());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PlexAccount {
    client: AccountClient,
    token: String,
    user: Option<User>,
    resolver_config: ResolverConfig,
}

impl PlexAccount {
    /// Sign in with username and password
    pub async fn sign_in(config: DirectoryConfig, username: &str, password: &str) -> Result<Self> {
        let client = AccountClient::new(config)?;
        let user = client.sign_in(username, password).await?;
        info!("Signed in as {}", user.username.as_deref().unwrap_or(username));

        Ok(Self {
            client,
            token: user.authentication_token.clone(),
            user: Some(user),
            resolver_config: ResolverConfig::default(),
        })
    }

    /// Use an existing account token
    pub fn from_token(config: DirectoryConfig, token: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: AccountClient::new(config)?,
            token: token.into(),
            user: None,
            resolver_config: ResolverConfig::default(),
        })
    }

    /// Timeouts used when connecting to resources
    pub fn with_resolver_config(mut self, config: ResolverConfig) -> Self {
        self.resolver_config = config;
        self
    }

    /// Signed-in user, when created through [`PlexAccount::sign_in`]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub async fn resources(&self) -> Result<Vec<Resource>> {
        Ok(self.client.resources(&self.token).await?)
    }

    /// Find a resource by name, ignoring case
    pub async fn resource(&self, name: &str) -> Result<Resource> {
        let resources = self.resources().await?;
        Ok(find_resource(&resources, name)?.clone())
    }

    pub async fn devices(&self) -> Result<Vec<RegisteredDevice>> {
        Ok(self.client.devices(&self.token).await?)
    }

    /// Find a registered device by name, ignoring case, and wrap it for commands
    pub async fn device(&self, name: &str) -> Result<DeviceHandle> {
        let search = name.to_lowercase();
        let device = self
            .devices()
            .await?
            .into_iter()
            .find(|d| d.name.to_lowercase() == search)
            .ok_or_else(|| plex_discovery::DiscoveryError::NotFound(name.to_string()))?;
        DeviceHandle::new(device, &self.token)
    }

    /// Resolve a live connection to `resource`
    ///
    /// Every advertised connection is probed concurrently with the resource's
    /// access token (the account token when the resource has none). Local
    /// connections are only tried for owned resources. `preference` limits
    /// probing to one address form.
    pub async fn connect(&self, resource: &Resource, preference: Option<AddressForm>) -> Result<ServerSession> {
        let request = resolution_request(resource, preference);
        let token = resource
            .access_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(self.token.as_str());

        let probe = HttpProbe::with_headers(self.client.config().identity.headers());
        let resolver = Resolver::with_config(probe, self.resolver_config.clone());
        let resolution = resolver.resolve(&request, token).await?;

        Ok(ServerSession::new(resolution.into_session()))
    }
}

impl fmt::Debug for PlexAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlexAccount")
            .field("base_url", &self.client.config().base_url)
            .field("user", &self.user.as_ref().and_then(|u| u.username.as_deref()))
            .finish_non_exhaustive()
    }
}

/// Resolution request for a directory resource
pub fn resolution_request(resource: &Resource, preference: Option<AddressForm>) -> ResolutionRequest {
    let endpoints = resource.connections.iter().map(endpoint).collect();
    ResolutionRequest::new(resource.name.clone(), endpoints)
        .owned(resource.owned)
        .prefer(preference)
}

fn endpoint(connection: &Connection) -> Endpoint {
    Endpoint::new(
        connection.protocol.clone(),
        connection.address.clone(),
        connection.port,
        connection.local,
    )
    .with_uri(connection.uri.clone())
}
